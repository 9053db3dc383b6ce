//! Error types for the Pulsar client.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the Pulsar API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API rejected the credential (HTTP 401 or 403).
    #[error("authorization denied: invalid API key")]
    AuthDenied,

    /// The time-series endpoint rejected the query parameters (HTTP 400).
    ///
    /// The remote API bounds a single query to a 30-day span and requires
    /// `start < end`, so the message points the caller at both constraints.
    #[error(
        "error retrieving data at {url}: make sure the start and end times \
         don't overlap and the time span is no longer than 30 days"
    )]
    DataRetrieval {
        /// Query URL that was rejected.
        url: String,
    },

    /// The query succeeded but returned an empty result set.
    #[error("no data found for the requested window")]
    NoDataFound,

    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out")]
    Timeout {
        /// URL of the request that timed out.
        url: String,
    },

    /// Connection-level failure from the HTTP stack.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Unexpected HTTP status outside the specifically handled ones.
    #[error("API error {status} at {url}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Request URL.
        url: String,
        /// Response body, or the canonical status text when the body is empty.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// An endpoint or path could not be assembled into a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Whether retrying the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Transport(_))
    }

    /// Whether the error indicates a rejected credential.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthDenied)
    }

    /// Whether the error is the empty-result marker rather than a failure.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoDataFound)
    }
}
