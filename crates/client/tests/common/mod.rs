//! Shared helpers for the integration tests.

#![allow(dead_code)]

pub use pulsar_client::testing::load_fixture;

use pulsar_client::{PulsarClient, PulsarClientBuilder};
use secrecy::SecretString;
use wiremock::MockServer;

/// Credential used against mock servers.
pub const TEST_KEY: &str = "test-api-key";

/// Base endpoint of a mock server, with the trailing slash resource paths
/// join onto.
pub fn endpoint_of(server: &MockServer) -> String {
    format!("{}/", server.uri())
}

/// A client pointed at a mock server.
pub fn client_for(server: &MockServer) -> PulsarClient {
    PulsarClientBuilder::new()
        .endpoint(endpoint_of(server))
        .build()
        .expect("mock server URI is a valid endpoint")
}

/// Credential wrapped the way the endpoint functions expect it.
pub fn test_secret() -> SecretString {
    SecretString::from(TEST_KEY.to_string())
}

/// Install a compact subscriber honoring `RUST_LOG`. Safe to call from
/// every test; only the first call wins.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .try_init();
}
