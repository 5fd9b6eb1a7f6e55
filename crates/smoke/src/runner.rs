//! Suite runner: ordered execution, fault barrier, aggregation, report

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::cases::{CaseOutcome, SmokeTest};
use crate::client::{ApiClient, DEFAULT_BASE_URL};
use crate::error::{SmokeError, SmokeResult};
use crate::state::SuiteState;

/// Recorded outcome of a single case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    pub name: String,
    pub status: CaseStatus,
    pub duration_ms: u64,
    /// Pass detail, failure reason, or skip reason.
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    Failed,
    Skipped,
}

/// Result of running the whole suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<CaseResult>,
}

impl SuiteReport {
    pub fn from_results(results: Vec<CaseResult>, duration_ms: u64) -> Self {
        let passed = results
            .iter()
            .filter(|r| r.status == CaseStatus::Passed)
            .count();
        let failed = results
            .iter()
            .filter(|r| r.status == CaseStatus::Failed)
            .count();
        let skipped = results
            .iter()
            .filter(|r| r.status == CaseStatus::Skipped)
            .count();

        Self {
            total: results.len(),
            passed,
            failed,
            skipped,
            duration_ms,
            results,
        }
    }

    /// The exit-status contract: success only when every case genuinely
    /// passed. A skip means an upstream failure starved a dependent case, so
    /// it does not count as success either.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.skipped == 0 && self.total > 0
    }

    /// Integer percentage of passed cases, matching the summary line.
    pub fn pass_percent(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            (self.passed * 100 / self.total) as u64
        }
    }
}

/// Configuration for the suite runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Backend deployment under test.
    pub base_url: String,

    /// Delay between cases, to avoid hammering the remote deployment.
    pub pace: Duration,

    /// Directory the JSON results file is written into.
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            pace: Duration::from_millis(500),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Sequential smoke-suite runner.
pub struct SmokeRunner {
    client: ApiClient,
    pace: Duration,
    output_dir: PathBuf,
}

impl SmokeRunner {
    pub fn new() -> SmokeResult<Self> {
        Self::with_config(RunnerConfig::default())
    }

    pub fn with_config(config: RunnerConfig) -> SmokeResult<Self> {
        Ok(Self {
            client: ApiClient::new(config.base_url)?,
            pace: config.pace,
            output_dir: config.output_dir,
        })
    }

    /// Run the full table in declared order.
    pub async fn run_all(&self) -> SuiteReport {
        self.run_cases(SmokeTest::ALL).await
    }

    /// Run a single case by display name. Preconditions are still evaluated,
    /// so a dependent case run in isolation reports SKIPPED.
    pub async fn run_named(&self, name: &str) -> SmokeResult<SuiteReport> {
        let case = SmokeTest::by_name(name)
            .ok_or_else(|| SmokeError::UnknownCase(name.to_string()))?;
        Ok(self.run_cases(&[case]).await)
    }

    async fn run_cases(&self, cases: &[SmokeTest]) -> SuiteReport {
        let start = Instant::now();

        info!("Posmate backend smoke suite");
        info!("Base URL: {}", self.client.base_url());
        info!(
            "Started at: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        info!("Running {} case(s)...", cases.len());

        let mut state = SuiteState::new();
        let mut results = Vec::with_capacity(cases.len());

        for (index, case) in cases.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.pace).await;
            }
            results.push(self.run_case(*case, &mut state).await);
        }

        let report = SuiteReport::from_results(results, start.elapsed().as_millis() as u64);
        self.print_summary(&report);
        report
    }

    async fn run_case(&self, case: SmokeTest, state: &mut SuiteState) -> CaseResult {
        let start = Instant::now();

        // Fault barrier: an Err escaping the case body is this case's
        // failure, never the end of the run.
        let outcome = match case.run(&self.client, state).await {
            Ok(outcome) => outcome,
            Err(e) => CaseOutcome::fail(e.to_string()),
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        let (status, detail) = match outcome {
            CaseOutcome::Passed(detail) => {
                info!("✓ {} ({} ms) - {}", case.name(), duration_ms, detail);
                (CaseStatus::Passed, detail)
            }
            CaseOutcome::Failed(why) => {
                error!("✗ {} - {}", case.name(), why);
                (CaseStatus::Failed, why)
            }
            CaseOutcome::Skipped(why) => {
                warn!("~ {} - skipped: {}", case.name(), why);
                (CaseStatus::Skipped, why)
            }
        };

        CaseResult {
            name: case.name().to_string(),
            status,
            duration_ms,
            detail,
        }
    }

    fn print_summary(&self, report: &SuiteReport) {
        info!("");
        info!("Summary:");
        for result in &report.results {
            match result.status {
                CaseStatus::Passed => info!("  ✓ {}", result.name),
                CaseStatus::Failed => error!("  ✗ {} - {}", result.name, result.detail),
                CaseStatus::Skipped => warn!("  ~ {} - {}", result.name, result.detail),
            }
        }
        info!(
            "{}/{} cases passed ({}%), {} failed, {} skipped ({} ms)",
            report.passed,
            report.total,
            report.pass_percent(),
            report.failed,
            report.skipped,
            report.duration_ms
        );
    }

    /// Write the report to `<output_dir>/smoke-results.json`.
    pub fn write_results(&self, report: &SuiteReport) -> SmokeResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join("smoke-results.json");
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}
