//! Posmate Backend Smoke Suite
//!
//! A sequential HTTP smoke-test harness for the Posmate jewelry POS backend.
//! It walks a fixed, ordered table of cases against a live deployment -
//! settings, product CRUD, barcode rendering, invoicing, PDF rendering -
//! threading the identifiers created by earlier cases into later ones, and
//! aggregates three-valued outcomes into an exit status.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   SmokeRunner (sequential)                 │
//! ├────────────────────────────────────────────────────────────┤
//! │  for case in SmokeTest::ALL   (fault barrier per case)     │
//! │    ├── case.run(&ApiClient, &mut SuiteState)               │
//! │    │     ├── ApiClient::request -> Exchange                │
//! │    │     ├── checks:: (PDF magic, PNG size, totals)        │
//! │    │     └── SuiteState (created product/invoice ids)      │
//! │    └── CaseResult { Passed | Failed | Skipped, ms }        │
//! │  SuiteReport -> summary lines + smoke-results.json         │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod cases;
pub mod checks;
pub mod client;
pub mod error;
pub mod runner;
pub mod state;

pub use cases::{CaseOutcome, SmokeTest};
pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::{SmokeError, SmokeResult};
pub use runner::{CaseResult, CaseStatus, RunnerConfig, SmokeRunner, SuiteReport};
pub use state::SuiteState;
