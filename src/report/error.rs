//! Error types for the orchestrator collaborators.

use thiserror::Error;

/// The orchestrator could not be confirmed reachable before the run.
///
/// Logged and otherwise ignored.
#[derive(Debug, Error)]
pub enum ReadinessError {
    #[error("reporting endpoint not contactable within {0}s")]
    Timeout(u64),

    #[error("readiness check misconfigured: {0}")]
    Configuration(String),
}

/// The verdict could not be delivered. Fatal for the process.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid reporting URL: {0}")]
    InvalidUrl(String),

    #[error("failed to send report: {0}")]
    Request(#[from] reqwest::Error),

    #[error("reporting endpoint rejected report with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
