//! Configuration error types

use thiserror::Error;

/// Configuration-related errors
///
/// Any of these is fatal before the first request is issued and is routed
/// straight to the failure report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required URL: set {0}")]
    MissingUrl(&'static str),

    #[error("unsupported protocol in {0}: URL must start with http or https")]
    UnsupportedProtocol(String),

    #[error("cannot parse provided URL: {0}")]
    InvalidUrl(String),

    #[error("invalid integer for {field}: {value:?}")]
    InvalidInteger { field: &'static str, value: String },
}
