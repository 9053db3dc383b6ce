//! HTTP endpoint functions for the Pulsar API.
//!
//! Endpoints are free async functions taking a `reqwest::Client`, the base
//! endpoint and a credential. The registry/cache layers above decide which
//! handle and snapshot to use; this layer only speaks HTTP.

mod apps;
mod jobs;
pub mod query;
pub mod url_encoding;

pub use apps::list_applications;
pub use jobs::{list_jobs, probe_jobs};
pub use query::{build_query_url, fetch_time_series};

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{ClientError, Result};
use crate::metrics::METRIC_REQUESTS_TOTAL;

/// Header carrying the API credential on every request.
pub(crate) const NSONE_KEY_HEADER: &str = "X-NSONE-Key";

/// Join a resource path onto the base endpoint.
///
/// The endpoint is normalized to end in `/` at build time, so joining never
/// discards a path segment.
pub(crate) fn join_url(endpoint: &str, path: &str) -> Result<Url> {
    let base = Url::parse(endpoint)
        .map_err(|e| ClientError::InvalidUrl(format!("{endpoint}: {e}")))?;
    base.join(path)
        .map_err(|e| ClientError::InvalidUrl(format!("{endpoint}{path}: {e}")))
}

/// Issue an authenticated GET and classify transport-level failures.
pub(crate) async fn send_get(
    client: &reqwest::Client,
    url: &Url,
    api_key: &SecretString,
) -> Result<reqwest::Response> {
    metrics::counter!(METRIC_REQUESTS_TOTAL).increment(1);
    client
        .get(url.clone())
        .header(NSONE_KEY_HEADER, api_key.expose_secret())
        .send()
        .await
        .map_err(classify_transport)
}

/// Split timeouts out of the general transport error.
pub(crate) fn classify_transport(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        ClientError::Timeout { url }
    } else {
        ClientError::Transport(err)
    }
}

/// Turn a non-success response into the matching error.
///
/// 401 and 403 collapse into [`ClientError::AuthDenied`]; everything else
/// keeps its status and body for diagnostics.
pub(crate) async fn error_for_status(response: reqwest::Response) -> ClientError {
    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return ClientError::AuthDenied;
    }
    let url = response.url().to_string();
    let message = match response.text().await {
        Ok(body) if !body.is_empty() => body,
        _ => status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string(),
    };
    ClientError::Api {
        status: status.as_u16(),
        url,
        message,
    }
}
