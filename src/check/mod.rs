//! The check loop: a bounded, strictly sequential run of requests.
//!
//! Requests are never issued in parallel. The check samples availability over
//! wall-clock time, so each request waits for the previous one (and for the
//! pacing tick, when configured) before it is sent.


use crate::config::CheckConfig;
use crate::dispatch::{redact_url, Dispatch};
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Counters accumulated over one run.
///
/// `attempted == passed + failed` holds after every iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub attempted: u64,
    pub passed: u64,
    pub failed: u64,
}

impl CheckSummary {
    fn record_pass(&mut self) {
        self.attempted += 1;
        self.passed += 1;
    }

    fn record_failure(&mut self) {
        self.attempted += 1;
        self.failed += 1;
    }
}

/// Run `config.count` requests through `dispatcher` and tally the results.
///
/// Request failures are counted, never returned. When a delay is configured
/// the loop waits for the next pacing tick after every request, the last one
/// included.
pub async fn run_checks<D>(config: &CheckConfig, dispatcher: &D) -> CheckSummary
where
    D: Dispatch + ?Sized,
{
    tracing::info!(
        count = config.count,
        delay_seconds = config.delay_seconds,
        "Beginning check"
    );

    let mut summary = CheckSummary::default();
    let mut pacer = pacing_interval(config.delay_seconds);
    let target = redact_url(&config.target_url);

    while summary.attempted < config.count {
        let result = dispatcher
            .dispatch(
                &config.request_method,
                &config.target_url,
                config.request_body.clone().into_bytes(),
            )
            .await;

        match result {
            Err(e) => {
                summary.record_failure();
                tracing::error!(
                    url = %target,
                    error = %e,
                    attempt = summary.attempted,
                    "Failed to reach URL"
                );
            }
            Ok(status) if i64::from(status) == config.expected_status_code => {
                summary.record_pass();
                tracing::info!(
                    status,
                    method = %config.request_method,
                    url = %target,
                    attempt = summary.attempted,
                    "Got expected status"
                );
            }
            Ok(status) => {
                summary.record_failure();
                tracing::error!(
                    status,
                    expected = config.expected_status_code,
                    method = %config.request_method,
                    url = %target,
                    attempt = summary.attempted,
                    "Got unexpected status"
                );
            }
        }

        if let Some(pacer) = pacer.as_mut() {
            pacer.tick().await;
        }
    }

    summary
}

/// Recurring timer whose first tick lands one full period after arming.
///
/// A slow request does not bank extra ticks: at most one late tick fires
/// immediately and the schedule then realigns.
fn pacing_interval(delay_seconds: u64) -> Option<Interval> {
    if delay_seconds == 0 {
        return None;
    }
    let period = Duration::from_secs(delay_seconds);
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    Some(interval)
}
