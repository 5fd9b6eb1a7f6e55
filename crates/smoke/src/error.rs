//! Error types for the smoke suite

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmokeError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown test case: {0}")]
    UnknownCase(String),
}

pub type SmokeResult<T> = Result<T, SmokeError>;
