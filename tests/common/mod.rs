//! Shared test utilities for http-check integration tests.
//!
//! Provides fake orchestrator collaborators and config builders so the
//! runner can be exercised against mock HTTP servers.

#![allow(dead_code)]

use async_trait::async_trait;
use http_check::config::CheckConfig;
use http_check::report::{ReadinessError, Reporter, SinkError, Waiter};
use reqwest::Url;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// Config Builders
// =============================================================================

/// Config targeting `url` with `count` requests and defaults elsewhere.
pub fn make_config(url: &str, count: u64) -> CheckConfig {
    CheckConfig {
        count,
        ..CheckConfig::new(Url::parse(url).unwrap())
    }
}

// =============================================================================
// Fake Collaborators
// =============================================================================

/// Waiter that answers immediately with a fixed result.
#[derive(Debug, Clone, Default)]
pub struct FakeWaiter {
    pub fail: bool,
    pub calls: Arc<AtomicUsize>,
}

impl FakeWaiter {
    pub fn ready() -> Self {
        Self::default()
    }

    pub fn never_ready() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Waiter for FakeWaiter {
    async fn wait_ready(&self, deadline: Duration) -> Result<(), ReadinessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(ReadinessError::Timeout(deadline.as_secs()))
        } else {
            Ok(())
        }
    }
}

/// A report captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Success,
    Failure(Vec<String>),
}

/// Reporter that stores every report it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    pub reports: Arc<Mutex<Vec<Recorded>>>,
    pub reject: bool,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn reports(&self) -> Vec<Recorded> {
        self.reports.lock().unwrap().clone()
    }

    fn record(&self, report: Recorded) -> Result<(), SinkError> {
        self.reports.lock().unwrap().push(report);
        if self.reject {
            Err(SinkError::Rejected {
                status: 503,
                body: "unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Reporter for RecordingReporter {
    async fn report_success(&self) -> Result<(), SinkError> {
        self.record(Recorded::Success)
    }

    async fn report_failure(&self, messages: Vec<String>) -> Result<(), SinkError> {
        self.record(Recorded::Failure(messages))
    }
}
