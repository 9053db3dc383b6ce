//! High-level Pulsar client.

pub mod builder;
pub mod metadata;
pub mod registry;

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::endpoints::fetch_time_series;
use crate::error::Result;
use crate::metrics::record_error;
use crate::models::metadata::{MetadataParams, MetadataSnapshot};
use crate::models::query::{QuerySpec, TimeSeries};

use builder::PulsarClientBuilder;
use metadata::MetadataCache;
use registry::ClientRegistry;

/// Entry point tying the handle registry and metadata cache together.
#[derive(Debug)]
pub struct PulsarClient {
    pub(crate) registry: ClientRegistry,
    pub(crate) metadata: MetadataCache,
}

/// Outcome of one executed query.
#[derive(Debug)]
pub struct QueryResult {
    /// Display label for the series. `None` for preview queries.
    pub label: Option<String>,
    /// Windowed series. `None` for preview queries.
    pub series: Option<TimeSeries>,
    /// The snapshot the label was resolved against.
    pub metadata: Arc<MetadataSnapshot>,
}

impl PulsarClient {
    /// Start building a client.
    pub fn builder() -> PulsarClientBuilder {
        PulsarClientBuilder::new()
    }

    /// The per-credential handle registry.
    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    /// The metadata snapshot cache.
    pub fn metadata_cache(&self) -> &MetadataCache {
        &self.metadata
    }

    /// Check a credential against the API without executing a query.
    pub async fn validate_credential(&self, credential: &str) -> Result<()> {
        self.registry
            .validate(credential)
            .await
            .inspect_err(record_error)
    }

    /// Return a fresh metadata snapshot for the credential.
    pub async fn metadata(
        &self,
        credential: &str,
        params: &MetadataParams,
    ) -> Result<Arc<MetadataSnapshot>> {
        self.metadata
            .get(&self.registry, credential, params)
            .await
            .inspect_err(record_error)
    }

    /// Execute one query.
    ///
    /// Incomplete queries (missing application, job, metric type or
    /// aggregation) resolve to a result without a series rather than an
    /// error, since hosts send them while the user is still composing.
    #[instrument(skip(self, credential, spec), fields(app_id = %spec.app_id, job_id = %spec.job_id))]
    pub async fn query(&self, credential: &str, spec: &QuerySpec) -> Result<QueryResult> {
        let handle = self.registry.resolve(credential).inspect_err(record_error)?;
        let snapshot = self
            .metadata
            .get(
                &self.registry,
                credential,
                &MetadataParams {
                    fetch_jobs: true,
                    ..MetadataParams::default()
                },
            )
            .await
            .inspect_err(record_error)?;

        if !spec.is_executable() {
            debug!("incomplete preview query, skipping time-series fetch");
            return Ok(QueryResult {
                label: None,
                series: None,
                metadata: snapshot,
            });
        }

        let series = fetch_time_series(
            handle.http(),
            handle.endpoint(),
            handle.credential(),
            spec,
        )
        .await
        .inspect_err(record_error)?;

        Ok(QueryResult {
            label: Some(build_label(&snapshot, spec)),
            series: Some(series),
            metadata: snapshot,
        })
    }
}

/// Compose the display label of a series.
///
/// `{app name} ({app id}):{job id}:{metric}:{geo}:{asn}`, falling back to
/// the application id when the snapshot does not know the application.
fn build_label(snapshot: &MetadataSnapshot, spec: &QuerySpec) -> String {
    let app_name = snapshot
        .application(&spec.app_id)
        .map(|app| app.name.as_str())
        .unwrap_or(spec.app_id.as_str());
    let metric = spec
        .metric_type
        .map(|m| m.as_str())
        .unwrap_or_default();
    let geo = spec.geo.as_deref().unwrap_or("*");
    let asn = spec.asn.as_deref().unwrap_or("*");
    format!(
        "{} ({}):{}:{}:{}:{}",
        app_name, spec.app_id, spec.job_id, metric, geo, asn
    )
}
