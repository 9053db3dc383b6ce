//! Async client for the NS1 Pulsar telemetry API.
//!
//! The crate exposes three layers:
//!
//! - [`client::registry::ClientRegistry`] keeps one HTTP handle per API
//!   credential so concurrent callers with the same key share a connection
//!   pool.
//! - [`client::metadata::MetadataCache`] maintains a TTL-bounded snapshot of
//!   the application/job hierarchy, refreshed on demand and kept as
//!   last-known-good when a refresh fails.
//! - [`client::PulsarClient`] ties both together and answers time-series
//!   queries, windowed to the caller's requested number of points.
//!
//! Credentials are held as [`secrecy::SecretString`] and travel only in the
//! `X-NSONE-Key` request header. They are never logged or persisted.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod models;

#[cfg(feature = "test-utils")]
pub mod testing;

pub use client::builder::PulsarClientBuilder;
pub use client::metadata::{fetch_metadata, MetadataCache};
pub use client::registry::{ApiHandle, ClientRegistry};
pub use client::{PulsarClient, QueryResult};
pub use error::{ClientError, Result};
pub use metrics::ErrorCategory;
pub use models::apps::{Application, ApplicationRecord};
pub use models::jobs::{Job, JobRecord};
pub use models::metadata::{MetadataParams, MetadataSnapshot};
pub use models::query::{
    Aggregation, DataPoint, MetricType, QuerySpec, TimeRange, TimeSeries,
};
