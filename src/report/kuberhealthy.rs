//! Kuberhealthy reporting endpoint client.

use super::{ReadinessError, Reporter, SinkError, Waiter};
use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use std::time::Duration;

pub const KH_REPORTING_URL_ENV: &str = "KH_REPORTING_URL";
pub const KH_RUN_UUID_ENV: &str = "KH_RUN_UUID";
pub const RUN_UUID_HEADER: &str = "kh-run-uuid";

const REPORT_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Payload accepted by the reporting endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(rename = "OK")]
    pub ok: bool,
    #[serde(rename = "Errors")]
    pub errors: Vec<String>,
}

fn reporting_url_from_env() -> Result<Url, SinkError> {
    let raw = std::env::var(KH_REPORTING_URL_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(SinkError::MissingEnv(KH_REPORTING_URL_ENV))?;
    Url::parse(&raw).map_err(|e| SinkError::InvalidUrl(e.to_string()))
}

/// Posts the verdict to `KH_REPORTING_URL`, tagged with `KH_RUN_UUID`.
#[derive(Debug, Clone)]
pub struct KuberhealthyReporter {
    client: reqwest::Client,
    reporting_url: Url,
    run_uuid: String,
}

impl KuberhealthyReporter {
    pub fn new(reporting_url: Url, run_uuid: impl Into<String>) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder().timeout(REPORT_TIMEOUT).build()?;
        Ok(Self {
            client,
            reporting_url,
            run_uuid: run_uuid.into(),
        })
    }

    /// Build from the variables Kuberhealthy injects into check pods.
    pub fn from_env() -> Result<Self, SinkError> {
        let reporting_url = reporting_url_from_env()?;
        let run_uuid = std::env::var(KH_RUN_UUID_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(SinkError::MissingEnv(KH_RUN_UUID_ENV))?;
        Self::new(reporting_url, run_uuid)
    }

    async fn send(&self, report: &Report) -> Result<(), SinkError> {
        let response = self
            .client
            .post(self.reporting_url.clone())
            .header(RUN_UUID_HEADER, &self.run_uuid)
            .json(report)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(ok = report.ok, "Successfully reported to Kuberhealthy");
        Ok(())
    }
}

#[async_trait]
impl Reporter for KuberhealthyReporter {
    async fn report_success(&self) -> Result<(), SinkError> {
        self.send(&Report {
            ok: true,
            errors: vec![],
        })
        .await
    }

    async fn report_failure(&self, messages: Vec<String>) -> Result<(), SinkError> {
        self.send(&Report {
            ok: false,
            errors: messages,
        })
        .await
    }
}

/// Polls the reporting endpoint until it answers at all.
///
/// Any HTTP response, whatever its status, counts as contactable; only
/// transport failures are retried.
#[derive(Debug, Clone)]
pub struct KuberhealthyWaiter {
    client: reqwest::Client,
    reporting_url: Option<Url>,
    poll_interval: Duration,
}

impl KuberhealthyWaiter {
    pub fn new(reporting_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            reporting_url: Some(reporting_url),
            poll_interval: POLL_INTERVAL,
        }
    }

    /// Build from `KH_REPORTING_URL`.
    ///
    /// A missing or invalid variable is not an error here; it surfaces from
    /// [`Waiter::wait_ready`], which the caller only logs.
    pub fn from_env() -> Self {
        Self {
            client: reqwest::Client::new(),
            reporting_url: reporting_url_from_env().ok(),
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    async fn poll_until_contactable(&self, url: &Url) {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self
                .client
                .get(url.clone())
                .timeout(self.poll_interval.max(Duration::from_secs(1)))
                .send()
                .await
            {
                Ok(response) => {
                    tracing::debug!(
                        status = response.status().as_u16(),
                        attempt,
                        "Kuberhealthy reporting endpoint is contactable"
                    );
                    return;
                }
                Err(e) => {
                    tracing::debug!(
                        error = %e.without_url(),
                        attempt,
                        "Kuberhealthy reporting endpoint not yet contactable"
                    );
                }
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl Waiter for KuberhealthyWaiter {
    async fn wait_ready(&self, deadline: Duration) -> Result<(), ReadinessError> {
        let url = self.reporting_url.as_ref().ok_or_else(|| {
            ReadinessError::Configuration(format!("{} is not a valid URL", KH_REPORTING_URL_ENV))
        })?;

        tokio::time::timeout(deadline, self.poll_until_contactable(url))
            .await
            .map_err(|_| ReadinessError::Timeout(deadline.as_secs()))
    }
}
