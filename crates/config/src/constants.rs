//! Centralized constants for the Pulsar datasource workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
///
/// Every network call (application listing, job listing, time-series fetch
/// and the credential probe) is bounded by this timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default base endpoint of the Pulsar API.
///
/// Kept with a trailing slash so resource paths join directly.
pub const DEFAULT_ENDPOINT: &str = "https://api.nsone.net/v1/pulsar/";

// =============================================================================
// Metadata Cache Defaults
// =============================================================================

/// Default time-to-live for the application/job metadata snapshot in seconds.
pub const DEFAULT_METADATA_TTL_SECS: u64 = 600;

// =============================================================================
// Remote API Limits
// =============================================================================

/// Longest time span the remote API accepts for a single time-series query,
/// in days. Requests over a wider window are rejected with HTTP 400.
pub const MAX_QUERY_SPAN_DAYS: u64 = 30;
