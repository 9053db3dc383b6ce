//! Metadata snapshot of the application/job hierarchy.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::apps::Application;
use crate::models::jobs::Job;

/// Controls which parts of the hierarchy a metadata fetch retrieves.
#[derive(Debug, Clone, Copy)]
pub struct MetadataParams {
    /// Keep applications whose `active` flag is false.
    pub include_inactive_apps: bool,
    /// Fetch the job list of each kept application.
    pub fetch_jobs: bool,
    /// Keep jobs whose `active` flag is false.
    pub include_inactive_jobs: bool,
}

impl Default for MetadataParams {
    fn default() -> Self {
        Self {
            include_inactive_apps: false,
            fetch_jobs: false,
            include_inactive_jobs: false,
        }
    }
}

/// Immutable point-in-time view of the application/job hierarchy.
///
/// Lookup maps are built once at construction so per-query resolution is
/// O(1). Snapshots are shared behind `Arc` and never mutated.
#[derive(Debug)]
pub struct MetadataSnapshot {
    applications: Vec<Application>,
    applications_by_id: HashMap<String, usize>,
    jobs_by_id: HashMap<String, (usize, usize)>,
    created_at: Instant,
    ttl: Duration,
}

impl MetadataSnapshot {
    /// Build a snapshot from the fetched hierarchy.
    pub fn new(applications: Vec<Application>, ttl: Duration) -> Self {
        let mut applications_by_id = HashMap::with_capacity(applications.len());
        let mut jobs_by_id = HashMap::new();
        for (app_index, app) in applications.iter().enumerate() {
            applications_by_id.insert(app.app_id.clone(), app_index);
            for (job_index, job) in app.jobs.iter().enumerate() {
                jobs_by_id.insert(job.job_id.clone(), (app_index, job_index));
            }
        }
        Self {
            applications,
            applications_by_id,
            jobs_by_id,
            created_at: Instant::now(),
            ttl,
        }
    }

    /// All applications in API order.
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    /// Look up an application by identifier.
    pub fn application(&self, app_id: &str) -> Option<&Application> {
        self.applications_by_id
            .get(app_id)
            .map(|&index| &self.applications[index])
    }

    /// Look up a job by identifier, together with its owning application.
    pub fn job(&self, job_id: &str) -> Option<(&Application, &Job)> {
        self.jobs_by_id.get(job_id).map(|&(app_index, job_index)| {
            let app = &self.applications[app_index];
            (app, &app.jobs[job_index])
        })
    }

    /// Instant at which this snapshot stops being fresh.
    pub fn expires_at(&self) -> Instant {
        self.created_at + self.ttl
    }

    /// Whether the snapshot is stale at the given instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }

    /// Whether the snapshot is stale now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}
