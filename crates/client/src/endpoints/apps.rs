//! Application listing endpoint.

use secrecy::SecretString;
use tracing::instrument;

use crate::endpoints::{error_for_status, join_url, send_get};
use crate::error::{ClientError, Result};
use crate::models::apps::ApplicationRecord;

/// List all Pulsar applications on the account.
///
/// `GET {endpoint}apps`
#[instrument(skip(client, api_key))]
pub async fn list_applications(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &SecretString,
) -> Result<Vec<ApplicationRecord>> {
    let url = join_url(endpoint, "apps")?;
    let response = send_get(client, &url, api_key).await?;

    if !response.status().is_success() {
        return Err(error_for_status(response).await);
    }

    response
        .json::<Vec<ApplicationRecord>>()
        .await
        .map_err(|e| ClientError::MalformedResponse(format!("application list: {e}")))
}
