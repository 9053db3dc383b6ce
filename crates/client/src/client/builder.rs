//! Builder for [`PulsarClient`](crate::client::PulsarClient).

use std::time::Duration;

use pulsar_config::constants::{
    DEFAULT_ENDPOINT, DEFAULT_METADATA_TTL_SECS, DEFAULT_TIMEOUT_SECS,
};
use pulsar_config::Config;
use url::Url;

use crate::client::metadata::MetadataCache;
use crate::client::registry::ClientRegistry;
use crate::client::PulsarClient;
use crate::error::{ClientError, Result};

/// Fluent builder for a [`PulsarClient`].
#[derive(Debug, Clone)]
pub struct PulsarClientBuilder {
    endpoint: String,
    timeout: Duration,
    metadata_ttl: Duration,
}

impl Default for PulsarClientBuilder {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            metadata_ttl: Duration::from_secs(DEFAULT_METADATA_TTL_SECS),
        }
    }
}

impl PulsarClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the connection settings from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: config.connection.endpoint.clone(),
            timeout: config.connection.timeout,
            metadata_ttl: config.connection.metadata_ttl,
        }
    }

    /// Override the base endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the metadata snapshot TTL.
    pub fn metadata_ttl(mut self, ttl: Duration) -> Self {
        self.metadata_ttl = ttl;
        self
    }

    /// Validate the endpoint and assemble the client.
    pub fn build(self) -> Result<PulsarClient> {
        let endpoint = normalize_endpoint(&self.endpoint);
        Url::parse(&endpoint)
            .map_err(|e| ClientError::InvalidUrl(format!("{endpoint}: {e}")))?;

        Ok(PulsarClient {
            registry: ClientRegistry::new(endpoint, self.timeout),
            metadata: MetadataCache::with_ttl(self.metadata_ttl),
        })
    }
}

/// Force exactly one trailing slash so resource paths join onto the
/// endpoint instead of replacing its last segment.
fn normalize_endpoint(endpoint: &str) -> String {
    format!("{}/", endpoint.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builder_uses_config_defaults() {
        let client = PulsarClientBuilder::new().build().unwrap();
        assert_eq!(client.registry().endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_endpoint_gains_trailing_slash() {
        assert_eq!(
            normalize_endpoint("https://api.example.com/v1/pulsar"),
            "https://api.example.com/v1/pulsar/"
        );
        assert_eq!(
            normalize_endpoint("https://api.example.com/v1/pulsar///"),
            "https://api.example.com/v1/pulsar/"
        );
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let err = PulsarClientBuilder::new()
            .endpoint("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_from_config_copies_connection_settings() {
        let mut config = Config::default();
        config.connection.timeout = Duration::from_secs(30);
        let builder = PulsarClientBuilder::from_config(&config);
        assert_eq!(builder.timeout, Duration::from_secs(30));
        assert_eq!(builder.endpoint, DEFAULT_ENDPOINT);
    }
}
