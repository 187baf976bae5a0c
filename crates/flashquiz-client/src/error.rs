//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the flashquiz API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connection, DNS, TLS).
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The server refused the credentials or session (401/403, or any
    /// non-2xx answer from an auth endpoint).
    #[error("authentication rejected (HTTP {status}): {message}")]
    AuthRejected { status: u16, message: String },

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The configured base URL and path did not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Returns `true` if no response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::TransportFailure(_) | ClientError::Timeout(_)
        )
    }

    /// HTTP status of the failing response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::AuthRejected { status, .. } | ClientError::Api { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_secs: u64) -> Self {
        if e.is_timeout() {
            ClientError::Timeout(timeout_secs)
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::TransportFailure(e.to_string())
        }
    }
}
