//! Spool Client - HTTP backend for the SpoolManager plugin
//!
//! Implements [`spool_adapter::SpoolBackend`] over the plugin's REST API.

pub mod config;
pub mod error;
pub mod http;

pub use config::{ClientConfig, Endpoints};
pub use error::{ClientError, ClientResult};
pub use http::SpoolManagerClient;

// Re-export adapter types for convenience
pub use spool_adapter::{AdapterError, GateDecision, SpoolAdapter, SpoolRecord};

/// Adapter backed by the SpoolManager HTTP API
pub type HttpSpoolAdapter = SpoolAdapter<SpoolManagerClient>;

/// Build an adapter from configuration
pub fn connect(config: &ClientConfig) -> ClientResult<HttpSpoolAdapter> {
    Ok(SpoolAdapter::new(config.build_client()?))
}
