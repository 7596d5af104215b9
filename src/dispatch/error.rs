//! Error types for request dispatch.

use std::time::Duration;
use thiserror::Error;

/// Errors from a single dispatched request.
///
/// These never abort a run; the loop counts them as failed checks. Every
/// `url` carried here has already been redacted.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Method outside GET/POST/PUT/DELETE/PATCH. No request was sent.
    #[error("error occurred while calling {url}: unsupported method {method:?}")]
    UnsupportedMethod { method: String, url: String },

    /// Request did not complete within the client timeout.
    #[error("error occurred while calling {url}: request timeout after {timeout:?}")]
    Timeout {
        url: String,
        timeout: Duration,
        #[source]
        source: reqwest::Error,
    },

    /// DNS, connection or protocol failure.
    #[error("error occurred while calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl DispatchError {
    /// Redacted target of the failed request.
    pub fn url(&self) -> &str {
        match self {
            DispatchError::UnsupportedMethod { url, .. }
            | DispatchError::Timeout { url, .. }
            | DispatchError::Transport { url, .. } => url,
        }
    }

    /// Classify a reqwest error, stripping any URL it carries so that
    /// credentials cannot leak through its message.
    pub(crate) fn from_reqwest(e: reqwest::Error, url: String, timeout: Duration) -> Self {
        if e.is_timeout() {
            DispatchError::Timeout {
                url,
                timeout,
                source: e.without_url(),
            }
        } else {
            DispatchError::Transport {
                url,
                source: e.without_url(),
            }
        }
    }
}
