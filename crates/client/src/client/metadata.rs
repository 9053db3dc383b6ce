//! TTL-bounded cache of the application/job metadata snapshot.

use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use pulsar_config::constants::DEFAULT_METADATA_TTL_SECS;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::client::registry::{ApiHandle, ClientRegistry};
use crate::endpoints::{list_applications, list_jobs};
use crate::error::Result;
use crate::metrics::{METRIC_CACHE_HITS, METRIC_CACHE_MISSES};
use crate::models::apps::Application;
use crate::models::jobs::Job;
use crate::models::metadata::{MetadataParams, MetadataSnapshot};

/// Fetch a fresh snapshot of the application/job hierarchy.
///
/// Applications are listed first; job listings then run concurrently, one
/// per kept application, preserving API order. The fetch is all-or-nothing:
/// any failed job listing fails the whole snapshot, so a snapshot never
/// holds a partial hierarchy.
#[instrument(skip(handle, params), fields(fetch_jobs = params.fetch_jobs))]
pub async fn fetch_metadata(
    handle: &ApiHandle,
    params: &MetadataParams,
    ttl: Duration,
) -> Result<MetadataSnapshot> {
    let records =
        list_applications(handle.http(), handle.endpoint(), handle.credential()).await?;

    let kept: Vec<_> = records
        .into_iter()
        .filter(|app| app.active || params.include_inactive_apps)
        .collect();

    let job_lists: Vec<Vec<Job>> = if params.fetch_jobs {
        let fetches = kept.iter().map(|app| async move {
            let records = list_jobs(
                handle.http(),
                handle.endpoint(),
                handle.credential(),
                &app.app_id,
            )
            .await?;
            Ok::<Vec<Job>, crate::error::ClientError>(
                records
                    .into_iter()
                    .filter(|job| job.active || params.include_inactive_jobs)
                    .map(Job::from)
                    .collect(),
            )
        });
        try_join_all(fetches).await?
    } else {
        kept.iter().map(|_| Vec::new()).collect()
    };

    let applications = kept
        .into_iter()
        .zip(job_lists)
        .map(|(record, jobs)| Application {
            app_id: record.app_id,
            name: record.name,
            jobs,
        })
        .collect();

    Ok(MetadataSnapshot::new(applications, ttl))
}

/// Process-wide cache holding at most one metadata snapshot.
///
/// Reads take the shared lock; a refresh takes the exclusive lock for its
/// whole duration, so concurrent callers hitting an expired snapshot
/// trigger exactly one remote fetch. A failed refresh leaves the previous
/// snapshot in place.
#[derive(Debug)]
pub struct MetadataCache {
    snapshot: RwLock<Option<Arc<MetadataSnapshot>>>,
    ttl: Duration,
}

impl MetadataCache {
    /// Cache with the default snapshot TTL.
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(DEFAULT_METADATA_TTL_SECS))
    }

    /// Cache with an explicit snapshot TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            snapshot: RwLock::new(None),
            ttl,
        }
    }

    /// Snapshot TTL this cache applies to refreshes.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return a fresh snapshot, refreshing through the registry if needed.
    pub async fn get(
        &self,
        registry: &ClientRegistry,
        credential: &str,
        params: &MetadataParams,
    ) -> Result<Arc<MetadataSnapshot>> {
        {
            let guard = self.snapshot.read().await;
            if let Some(snapshot) = guard.as_ref() {
                if !snapshot.is_expired() {
                    metrics::counter!(METRIC_CACHE_HITS).increment(1);
                    return Ok(Arc::clone(snapshot));
                }
            }
        }

        let mut guard = self.snapshot.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(snapshot) = guard.as_ref() {
            if !snapshot.is_expired() {
                metrics::counter!(METRIC_CACHE_HITS).increment(1);
                return Ok(Arc::clone(snapshot));
            }
        }
        metrics::counter!(METRIC_CACHE_MISSES).increment(1);

        let handle = registry.resolve(credential)?;
        let snapshot = Arc::new(fetch_metadata(&handle, params, self.ttl).await?);
        debug!(
            applications = snapshot.applications().len(),
            "metadata snapshot refreshed"
        );
        *guard = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// The snapshot currently held, fresh or stale.
    pub async fn current(&self) -> Option<Arc<MetadataSnapshot>> {
        self.snapshot.read().await.clone()
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_matches_config() {
        let cache = MetadataCache::new();
        assert_eq!(cache.ttl(), Duration::from_secs(600));
    }

    #[tokio::test]
    async fn test_empty_cache_has_no_current_snapshot() {
        let cache = MetadataCache::new();
        assert!(cache.current().await.is_none());
    }
}
