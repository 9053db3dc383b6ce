//! Per-credential handle registry.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use pulsar_config::constants::DEFAULT_MAX_REDIRECTS;
use secrecy::SecretString;
use tracing::{debug, warn};

use crate::endpoints::probe_jobs;
use crate::error::{ClientError, Result};

/// One configured HTTP handle bound to a single API credential.
///
/// The credential never appears in `Debug` output; `SecretString` redacts it.
#[derive(Debug)]
pub struct ApiHandle {
    http: reqwest::Client,
    endpoint: String,
    credential: SecretString,
}

impl ApiHandle {
    fn new(endpoint: String, timeout: Duration, credential: SecretString) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .build()
            .map_err(ClientError::Transport)?;
        Ok(Self {
            http,
            endpoint,
            credential,
        })
    }

    /// Underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Base endpoint this handle talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The credential sent with every request.
    pub fn credential(&self) -> &SecretString {
        &self.credential
    }
}

/// Registry of API handles, one per distinct credential.
///
/// Handles are shared behind `Arc`, so two callers presenting the same key
/// reuse one connection pool. The map is guarded by a `std` lock because
/// nothing async happens while it is held.
#[derive(Debug)]
pub struct ClientRegistry {
    handles: RwLock<HashMap<String, Arc<ApiHandle>>>,
    endpoint: String,
    timeout: Duration,
}

impl ClientRegistry {
    /// Create an empty registry for the given endpoint and timeout.
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        Self {
            handles: RwLock::new(HashMap::new()),
            endpoint,
            timeout,
        }
    }

    /// Base endpoint shared by every handle in this registry.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Return the handle for a credential, constructing it on first use.
    ///
    /// When two callers race on a new credential, the handle that lands in
    /// the map first wins and both callers receive it.
    pub fn resolve(&self, credential: &str) -> Result<Arc<ApiHandle>> {
        {
            let handles = self
                .handles
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(handle) = handles.get(credential) {
                return Ok(Arc::clone(handle));
            }
        }

        let handle = Arc::new(ApiHandle::new(
            self.endpoint.clone(),
            self.timeout,
            SecretString::from(credential.to_string()),
        )?);

        let mut handles = self
            .handles
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = handles
            .entry(credential.to_string())
            .or_insert(handle);
        Ok(Arc::clone(entry))
    }

    /// Validate a credential against the API and install a fresh handle.
    ///
    /// Probes the wildcard job listing. The probe itself often answers 400;
    /// only its authorization outcome matters. On 401/403 nothing is
    /// installed and any cached handle for the credential is left alone.
    pub async fn validate(&self, credential: &str) -> Result<()> {
        let handle = ApiHandle::new(
            self.endpoint.clone(),
            self.timeout,
            SecretString::from(credential.to_string()),
        )?;

        let response =
            probe_jobs(handle.http(), handle.endpoint(), handle.credential()).await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            warn!(%status, "credential probe rejected");
            return Err(ClientError::AuthDenied);
        }
        debug!(%status, "credential probe accepted");

        let mut handles = self
            .handles
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        handles.insert(credential.to_string(), Arc::new(handle));
        Ok(())
    }

    /// Whether a handle for this credential is currently cached.
    pub fn contains(&self, credential: &str) -> bool {
        self.handles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(credential)
    }
}
