//! Drives one complete check: readiness wait, request loop, verdict, report.

use crate::check::{run_checks, CheckSummary};
use crate::config::{CheckConfig, ConfigError};
use crate::dispatch::Dispatch;
use crate::report::{Reporter, SinkError, Waiter};
use crate::verdict::{decide, required_passes};
use std::time::Duration;

/// How a run ended, once its verdict has been delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Threshold met; success was reported.
    Passed(CheckSummary),
    /// Threshold missed; the detail was reported as a failure.
    Failed(CheckSummary),
    /// Configuration was rejected before any request was made.
    Misconfigured,
}

/// Wires the collaborators of a run together.
pub struct Runner<W, R, D> {
    waiter: W,
    reporter: R,
    dispatcher: D,
    ready_timeout: Duration,
}

impl<W, R, D> Runner<W, R, D>
where
    W: Waiter,
    R: Reporter,
    D: Dispatch,
{
    pub fn new(waiter: W, reporter: R, dispatcher: D, ready_timeout: Duration) -> Self {
        Self {
            waiter,
            reporter,
            dispatcher,
            ready_timeout,
        }
    }

    /// Execute a run and deliver exactly one report.
    ///
    /// Only a failure to deliver that report is returned as an error; every
    /// other problem ends up in the report itself.
    pub async fn run(
        &self,
        config: Result<CheckConfig, ConfigError>,
    ) -> Result<RunOutcome, SinkError> {
        let config = match config {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Invalid configuration");
                self.reporter.report_failure(vec![e.to_string()]).await?;
                return Ok(RunOutcome::Misconfigured);
            }
        };

        if let Err(e) = self.waiter.wait_ready(self.ready_timeout).await {
            tracing::error!(
                error = %e,
                "Error waiting for Kuberhealthy endpoint to be contactable, continuing"
            );
        }

        tracing::info!(
            passing_percent = config.passing_percent,
            count = config.count,
            required = required_passes(config.passing_percent, config.count),
            "Looking for at least {} percent of {} checks to pass",
            config.passing_percent,
            config.count
        );

        let summary = run_checks(&config, &self.dispatcher).await;

        tracing::info!(
            attempted = summary.attempted,
            passed = summary.passed,
            failed = summary.failed,
            "Check run complete"
        );

        match decide(&summary, &config).into_result() {
            Ok(()) => {
                self.reporter.report_success().await?;
                Ok(RunOutcome::Passed(summary))
            }
            Err(e) => {
                tracing::error!(error = %e, "Check failed");
                self.reporter.report_failure(vec![e.to_string()]).await?;
                Ok(RunOutcome::Failed(summary))
            }
        }
    }
}
