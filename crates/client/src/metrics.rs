//! Metric names and error categorization.
//!
//! The crate emits counters through the `metrics` facade. Hosts decide which
//! recorder (if any) to install; without one the calls are no-ops.

use crate::error::ClientError;

/// Total HTTP requests issued against the Pulsar API.
pub const METRIC_REQUESTS_TOTAL: &str = "pulsar_api_requests_total";

/// Total request failures, labeled by `category`.
pub const METRIC_ERRORS_TOTAL: &str = "pulsar_api_errors_total";

/// Metadata lookups answered from the in-memory snapshot.
pub const METRIC_CACHE_HITS: &str = "pulsar_metadata_cache_hits_total";

/// Metadata lookups that required a remote refresh.
pub const METRIC_CACHE_MISSES: &str = "pulsar_metadata_cache_misses_total";

/// Coarse error classification used as a metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Auth,
    BadRequest,
    NoData,
    Timeout,
    Transport,
    Api,
    Decode,
    InvalidUrl,
}

impl ErrorCategory {
    /// Stable label value for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::BadRequest => "bad_request",
            Self::NoData => "no_data",
            Self::Timeout => "timeout",
            Self::Transport => "transport",
            Self::Api => "api",
            Self::Decode => "decode",
            Self::InvalidUrl => "invalid_url",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::AuthDenied => Self::Auth,
            ClientError::DataRetrieval { .. } => Self::BadRequest,
            ClientError::NoDataFound => Self::NoData,
            ClientError::Timeout { .. } => Self::Timeout,
            ClientError::Transport(_) => Self::Transport,
            ClientError::Api { .. } => Self::Api,
            ClientError::MalformedResponse(_) => Self::Decode,
            ClientError::InvalidUrl(_) => Self::InvalidUrl,
        }
    }
}

/// Record one failure under [`METRIC_ERRORS_TOTAL`].
pub(crate) fn record_error(err: &ClientError) {
    let category = ErrorCategory::from(err);
    metrics::counter!(METRIC_ERRORS_TOTAL, "category" => category.as_str()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_are_stable() {
        assert_eq!(ErrorCategory::Auth.as_str(), "auth");
        assert_eq!(ErrorCategory::Timeout.as_str(), "timeout");
        assert_eq!(ErrorCategory::Decode.as_str(), "decode");
    }

    #[test]
    fn test_error_to_category() {
        assert_eq!(
            ErrorCategory::from(&ClientError::AuthDenied),
            ErrorCategory::Auth
        );
        assert_eq!(
            ErrorCategory::from(&ClientError::NoDataFound),
            ErrorCategory::NoData
        );
        assert_eq!(
            ErrorCategory::from(&ClientError::DataRetrieval { url: "u".into() }),
            ErrorCategory::BadRequest
        );
    }
}
