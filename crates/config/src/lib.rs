//! Configuration for the Pulsar datasource workspace.
//!
//! This crate provides the fixed defaults and connection configuration types
//! shared by the client crate and its hosts.

pub mod constants;
pub mod types;

pub use types::{Config, ConnectionConfig};
