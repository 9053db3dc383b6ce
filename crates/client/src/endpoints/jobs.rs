//! Job listing endpoint and the credential probe.

use secrecy::SecretString;
use tracing::instrument;

use crate::endpoints::url_encoding::encode_path_segment;
use crate::endpoints::{error_for_status, join_url, send_get};
use crate::error::{ClientError, Result};
use crate::models::jobs::JobRecord;

/// List the jobs of one application.
///
/// `GET {endpoint}apps/{appid}/jobs`
#[instrument(skip(client, api_key))]
pub async fn list_jobs(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &SecretString,
    app_id: &str,
) -> Result<Vec<JobRecord>> {
    let path = format!("apps/{}/jobs", encode_path_segment(app_id));
    let url = join_url(endpoint, &path)?;
    let response = send_get(client, &url, api_key).await?;

    if !response.status().is_success() {
        return Err(error_for_status(response).await);
    }

    response
        .json::<Vec<JobRecord>>()
        .await
        .map_err(|e| ClientError::MalformedResponse(format!("job list for {app_id}: {e}")))
}

/// Issue the credential probe request and return the raw response.
///
/// `GET {endpoint}apps/*/jobs` with the wildcard application. The caller
/// inspects the status: only 401/403 prove the key invalid, any other
/// answer (including 400) proves the key was accepted.
#[instrument(skip(client, api_key))]
pub async fn probe_jobs(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &SecretString,
) -> Result<reqwest::Response> {
    let path = format!("apps/{}/jobs", encode_path_segment("*"));
    let url = join_url(endpoint, &path)?;
    send_get(client, &url, api_key).await
}
