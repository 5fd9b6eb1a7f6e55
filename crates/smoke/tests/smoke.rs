//! Smoke suite entry point
//!
//! This file is the test binary that runs the suite against a live backend.
//! Run with: cargo test --package posmate-smoke --test smoke

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use posmate_smoke::runner::{RunnerConfig, SmokeRunner};
use posmate_smoke::{SmokeResult, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[command(name = "posmate-smoke")]
#[command(about = "Smoke-test runner for the Posmate jewelry POS backend")]
struct Args {
    /// Backend deployment to run against
    #[arg(short, long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Run only a specific case by its display name
    #[arg(short, long)]
    name: Option<String>,

    /// Delay between cases in milliseconds
    #[arg(long, default_value = "500")]
    pace_ms: u64,

    /// Output directory for the results file
    #[arg(short, long, default_value = "test-results")]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    match rt.block_on(async_main(args)) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn async_main(args: Args) -> SmokeResult<bool> {
    let config = RunnerConfig {
        base_url: args.base_url,
        pace: Duration::from_millis(args.pace_ms),
        output_dir: args.output,
    };

    let runner = SmokeRunner::with_config(config)?;

    let report = match args.name {
        Some(name) => runner.run_named(&name).await?,
        None => runner.run_all().await,
    };

    runner.write_results(&report)?;

    Ok(report.all_passed())
}
