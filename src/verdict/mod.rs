//! Turns a run summary into the final pass/fail verdict.

use crate::check::CheckSummary;
use crate::config::CheckConfig;
use crate::dispatch::redact_url;
use thiserror::Error;

/// The pass threshold was not met.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct VerdictError(pub String);

/// Final health determination for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub ok: bool,
    /// Diagnostic message, empty when `ok`.
    pub detail: String,
}

impl Verdict {
    pub fn into_result(self) -> Result<(), VerdictError> {
        if self.ok {
            Ok(())
        } else {
            Err(VerdictError(self.detail))
        }
    }
}

/// Number of passing requests needed out of `count`.
///
/// The product is computed in single precision and truncated toward zero,
/// so some percent/count pairs require one pass fewer than exact arithmetic
/// would (e.g. 53% of 100 yields 52).
pub fn required_passes(passing_percent: i64, count: u64) -> i64 {
    let score = (passing_percent as f32 / 100.0) * count as f32;
    score as i64
}

/// Decide whether `summary` meets the threshold in `config`.
pub fn decide(summary: &CheckSummary, config: &CheckConfig) -> Verdict {
    let required = required_passes(config.passing_percent, config.count);
    let passed = i64::try_from(summary.passed).unwrap_or(i64::MAX);

    if passed >= required {
        return Verdict {
            ok: true,
            detail: String::new(),
        };
    }

    Verdict {
        ok: false,
        detail: format!(
            "unable to retrieve a valid response (expected status: {}) from {} {}: checks failed {} out of {} attempts",
            config.expected_status_code,
            config.request_method,
            redact_url(&config.target_url),
            summary.failed,
            summary.attempted,
        ),
    }
}
