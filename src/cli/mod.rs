//! Command-line interface for the HTTP check.
//!
//! The check itself is configured through the orchestrator's environment
//! variables (see [`crate::config`]); the flags here only tune the process
//! around it.
//!
//! # Example
//!
//! ```bash
//! CHECK_URL=http://svc.default:8080/healthz COUNT=10 SECONDS=1 \
//!     http-check --log-format json
//! ```

use crate::config::logging::parse_component_level;
use crate::config::{LogFormat, LoggingConfig};
use crate::dispatch::DEFAULT_REQUEST_TIMEOUT_SECONDS;
use crate::report::DEFAULT_READY_TIMEOUT_SECONDS;
use clap::Parser;
use std::time::Duration;

/// http-check - Kuberhealthy HTTP endpoint check
#[derive(Parser, Debug)]
#[command(
    name = "http-check",
    version,
    about = "Check an HTTP endpoint repeatedly and report a pass/fail verdict to Kuberhealthy"
)]
pub struct Cli {
    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HTTP_CHECK_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format (pretty, json)
    #[arg(long, env = "HTTP_CHECK_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// Per-module log level, e.g. `dispatch=debug` (repeatable)
    #[arg(
        long = "log-component",
        env = "HTTP_CHECK_LOG_COMPONENTS",
        value_name = "MODULE=LEVEL",
        value_delimiter = ',',
        value_parser = parse_component_level
    )]
    pub log_components: Vec<(String, String)>,

    /// Seconds to wait for the reporting endpoint before starting anyway
    #[arg(
        long,
        env = "HTTP_CHECK_READY_TIMEOUT",
        default_value_t = DEFAULT_READY_TIMEOUT_SECONDS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub ready_timeout: u64,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "HTTP_CHECK_REQUEST_TIMEOUT",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECONDS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub request_timeout: u64,
}

impl Cli {
    /// Later `--log-component` entries for the same module win.
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format,
            component_levels: self.log_components.iter().cloned().collect(),
        }
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}
