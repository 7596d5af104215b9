//! Request dispatch: one HTTP call per invocation.
//!
//! [`Dispatch`] is the seam the check loop talks to. [`HttpDispatcher`] is the
//! real implementation over a pooled `reqwest::Client`; tests substitute
//! scripted fakes.

mod error;

#[cfg(test)]
mod tests;

pub use error::DispatchError;

use async_trait::async_trait;
use reqwest::{Method, Url};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Placeholder written over URL passwords before they reach logs or reports.
const REDACTED_PASSWORD: &str = "xxxxx";

/// HTTP methods the check is allowed to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
            RequestMethod::Patch => "PATCH",
        }
    }

    /// Whether the configured body is sent with this method.
    pub fn carries_body(&self) -> bool {
        !matches!(self, RequestMethod::Get)
    }
}

impl From<RequestMethod> for Method {
    fn from(method: RequestMethod) -> Self {
        match method {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
            RequestMethod::Put => Method::PUT,
            RequestMethod::Delete => Method::DELETE,
            RequestMethod::Patch => Method::PATCH,
        }
    }
}

/// Method names are matched exactly, as sent on the wire.
impl FromStr for RequestMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(RequestMethod::Get),
            "POST" => Ok(RequestMethod::Post),
            "PUT" => Ok(RequestMethod::Put),
            "DELETE" => Ok(RequestMethod::Delete),
            "PATCH" => Ok(RequestMethod::Patch),
            _ => Err(format!("unsupported method: {}", s)),
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render `url` with any password replaced by `xxxxx`.
///
/// The username is kept so operators can still tell which credentials were
/// used.
pub fn redact_url(url: &Url) -> String {
    if url.password().is_none() {
        return url.to_string();
    }
    let mut redacted = url.clone();
    // Only fails for URLs that cannot carry credentials, which have no password.
    let _ = redacted.set_password(Some(REDACTED_PASSWORD));
    redacted.to_string()
}

/// Performs exactly one HTTP request and reports its status code.
#[async_trait]
pub trait Dispatch: Send + Sync {
    /// Send `method` to `url`, with `body` as payload for non-GET methods.
    ///
    /// Implementations must not retry.
    async fn dispatch(&self, method: &str, url: &Url, body: Vec<u8>)
        -> Result<u16, DispatchError>;
}

/// [`Dispatch`] implementation backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpDispatcher {
    /// Create a dispatcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl Dispatch for HttpDispatcher {
    async fn dispatch(
        &self,
        method: &str,
        url: &Url,
        body: Vec<u8>,
    ) -> Result<u16, DispatchError> {
        let method = method
            .parse::<RequestMethod>()
            .map_err(|_| DispatchError::UnsupportedMethod {
                method: method.to_string(),
                url: redact_url(url),
            })?;

        let mut request = self.client.request(method.into(), url.clone());
        if method.carries_body() {
            request = request.body(body);
        }

        tracing::debug!(method = %method, url = %redact_url(url), "Dispatching request");

        let response = request
            .send()
            .await
            .map_err(|e| DispatchError::from_reqwest(e, redact_url(url), self.timeout))?;

        Ok(response.status().as_u16())
    }
}
