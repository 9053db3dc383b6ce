//! Data models for the Pulsar API.

pub mod apps;
pub mod jobs;
pub mod metadata;
pub mod query;
