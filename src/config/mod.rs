//! Configuration module for the HTTP check
//!
//! The check is configured entirely through named string values supplied by
//! the orchestrator, normally environment variables. [`CheckConfig`] is built
//! once at startup and then passed explicitly to the loop; nothing downstream
//! reads the environment again.
//!
//! # Variables
//!
//! | Variable | Default | Notes |
//! |---|---|---|
//! | `CHECK_URL` | required | must start with `http` |
//! | `COUNT` | `0` | number of requests |
//! | `SECONDS` | `0` | pause between requests |
//! | `PASSING_PERCENT` | `100` | `0` means `100` |
//! | `REQUEST_TYPE` | `GET` | checked when the request is sent |
//! | `REQUEST_BODY` | `{}` | ignored for `GET` |
//! | `EXPECTED_STATUS_CODE` | `200` | `0` means `200` |
//!
//! # Example
//!
//! ```rust
//! use http_check::config::CheckConfig;
//! use std::collections::HashMap;
//!
//! let source = HashMap::from([("CHECK_URL", "http://example.com"), ("COUNT", "5")]);
//! let config = CheckConfig::from_source(&source).unwrap();
//! assert_eq!(config.count, 5);
//! assert_eq!(config.passing_percent, 100);
//! ```

pub mod error;
pub mod logging;
pub mod source;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use source::{ConfigSource, EnvSource};

use reqwest::Url;

pub const CHECK_URL_ENV: &str = "CHECK_URL";
pub const COUNT_ENV: &str = "COUNT";
pub const SECONDS_ENV: &str = "SECONDS";
pub const PASSING_PERCENT_ENV: &str = "PASSING_PERCENT";
pub const REQUEST_TYPE_ENV: &str = "REQUEST_TYPE";
pub const REQUEST_BODY_ENV: &str = "REQUEST_BODY";
pub const EXPECTED_STATUS_CODE_ENV: &str = "EXPECTED_STATUS_CODE";

pub const DEFAULT_COUNT: u64 = 0;
pub const DEFAULT_SECONDS: u64 = 0;
pub const DEFAULT_PASSING_PERCENT: i64 = 100;
pub const DEFAULT_REQUEST_TYPE: &str = "GET";
pub const DEFAULT_REQUEST_BODY: &str = "{}";
pub const DEFAULT_EXPECTED_STATUS_CODE: i64 = 200;

/// Validated configuration for one check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Endpoint every request is sent to
    pub target_url: Url,
    /// Number of requests to perform
    pub count: u64,
    /// Pause between requests, in seconds (0 disables pacing)
    pub delay_seconds: u64,
    /// Minimum percentage of requests that must return the expected status
    pub passing_percent: i64,
    /// HTTP method; unknown methods fail per request, not here
    pub request_method: String,
    /// Payload for non-GET requests
    pub request_body: String,
    /// Status code that counts as a pass; values no server can send never match
    pub expected_status_code: i64,
}

impl CheckConfig {
    /// Configuration for `target_url` with every other field at its default.
    pub fn new(target_url: Url) -> Self {
        Self {
            target_url,
            count: DEFAULT_COUNT,
            delay_seconds: DEFAULT_SECONDS,
            passing_percent: DEFAULT_PASSING_PERCENT,
            request_method: DEFAULT_REQUEST_TYPE.to_string(),
            request_body: DEFAULT_REQUEST_BODY.to_string(),
            expected_status_code: DEFAULT_EXPECTED_STATUS_CODE,
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(&EnvSource)
    }

    /// Load configuration from any named string source.
    ///
    /// Unset and empty values both fall back to their defaults. A zero
    /// `PASSING_PERCENT` or `EXPECTED_STATUS_CODE` also means "use the
    /// default" rather than a literal zero.
    pub fn from_source<S: ConfigSource + ?Sized>(source: &S) -> Result<Self, ConfigError> {
        let target_url = parse_target_url(source.get_non_empty(CHECK_URL_ENV))?;
        let mut config = Self::new(target_url);

        if let Some(count) = parse_integer(source, COUNT_ENV)? {
            config.count = clamp_to_zero(count);
        }

        if let Some(seconds) = parse_integer(source, SECONDS_ENV)? {
            config.delay_seconds = clamp_to_zero(seconds);
        }

        if let Some(percent) = parse_integer(source, PASSING_PERCENT_ENV)? {
            config.passing_percent = percent;
        }
        if config.passing_percent == 0 {
            config.passing_percent = DEFAULT_PASSING_PERCENT;
        }

        if let Some(method) = source.get_non_empty(REQUEST_TYPE_ENV) {
            config.request_method = method;
        }

        if let Some(body) = source.get_non_empty(REQUEST_BODY_ENV) {
            config.request_body = body;
        }

        if let Some(code) = parse_integer(source, EXPECTED_STATUS_CODE_ENV)? {
            config.expected_status_code = code;
        }
        if config.expected_status_code == 0 {
            config.expected_status_code = DEFAULT_EXPECTED_STATUS_CODE;
        }

        Ok(config)
    }
}

fn parse_target_url(raw: Option<String>) -> Result<Url, ConfigError> {
    let raw = raw.ok_or(ConfigError::MissingUrl(CHECK_URL_ENV))?;
    if !raw.starts_with("http") {
        return Err(ConfigError::UnsupportedProtocol(raw));
    }
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(e.to_string()))
}

fn parse_integer<S: ConfigSource + ?Sized>(
    source: &S,
    field: &'static str,
) -> Result<Option<i64>, ConfigError> {
    match source.get_non_empty(field) {
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidInteger { field, value }),
        None => Ok(None),
    }
}

/// Negative counts run nothing and negative delays disable pacing.
fn clamp_to_zero(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
