//! Configuration types for the Pulsar datasource.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{DEFAULT_ENDPOINT, DEFAULT_METADATA_TTL_SECS, DEFAULT_TIMEOUT_SECS};

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection configuration for the Pulsar API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base endpoint of the Pulsar API, e.g. `https://api.nsone.net/v1/pulsar/`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout", with = "duration_seconds")]
    pub timeout: Duration,
    /// Time-to-live of the application/job metadata snapshot.
    #[serde(default = "default_metadata_ttl", with = "duration_seconds")]
    pub metadata_ttl: Duration,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

fn default_metadata_ttl() -> Duration {
    Duration::from_secs(DEFAULT_METADATA_TTL_SECS)
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout: default_timeout(),
            metadata_ttl: default_metadata_ttl(),
        }
    }
}

/// Top-level configuration.
///
/// Credentials are deliberately absent: the API key arrives with each request
/// and is never persisted by this workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings.
    #[serde(default)]
    pub connection: ConnectionConfig,
}
