//! Collaborators at the edges of a run: the readiness wait before the first
//! request and the result sink that receives the verdict.
//!
//! Both are narrow traits so the runner can be driven by fakes in tests. The
//! Kuberhealthy implementations talk to the reporting endpoint the
//! orchestrator injects into the check pod.

mod error;
mod kuberhealthy;

pub use error::{ReadinessError, SinkError};
pub use kuberhealthy::{
    KuberhealthyReporter, KuberhealthyWaiter, Report, KH_REPORTING_URL_ENV, KH_RUN_UUID_ENV,
    RUN_UUID_HEADER,
};

use async_trait::async_trait;
use std::time::Duration;

/// Default bound on the readiness wait.
pub const DEFAULT_READY_TIMEOUT_SECONDS: u64 = 60;

/// Waits until the orchestrator is ready to receive a report.
#[async_trait]
pub trait Waiter: Send + Sync {
    async fn wait_ready(&self, deadline: Duration) -> Result<(), ReadinessError>;
}

/// Delivers the final verdict. Exactly one call per run.
#[async_trait]
pub trait Reporter: Send + Sync {
    async fn report_success(&self) -> Result<(), SinkError>;

    async fn report_failure(&self, messages: Vec<String>) -> Result<(), SinkError>;
}
