//! Client configuration

use crate::{ClientResult, SpoolManagerClient};

/// SpoolManager endpoint paths, relative to the plugin root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub selected_spools: String,
    pub allowed_to_print: String,
    pub start_print_confirmed: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            selected_spools: "selectedSpools".into(),
            allowed_to_print: "allowedToPrint".into(),
            start_print_confirmed: "startPrintConfirmed".into(),
        }
    }
}

/// Configuration for reaching the SpoolManager plugin over HTTP
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | SPOOL_MANAGER_URL | http://localhost:5000 | OctoPrint base URL |
/// | SPOOL_MANAGER_API_KEY | (unset) | Sent as `X-Api-Key` |
/// | SPOOL_REQUEST_TIMEOUT_MS | 10000 | Per-request timeout (ms) |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// OctoPrint base URL (e.g., "http://octopi.local")
    pub base_url: String,

    /// Plugin root under the base URL
    pub plugin_path: String,

    /// OctoPrint API key
    pub api_key: Option<String>,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    pub endpoints: Endpoints,
}

impl ClientConfig {
    /// Create a configuration for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            plugin_path: "plugin/SpoolManager".into(),
            api_key: None,
            timeout_ms: 10_000,
            endpoints: Endpoints::default(),
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("SPOOL_MANAGER_URL").unwrap_or_else(|_| "http://localhost:5000".into()),
        );
        config.api_key = std::env::var("SPOOL_MANAGER_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        config.timeout_ms = std::env::var("SPOOL_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(10_000);
        config
    }

    /// Read a `.env` file if present, then load from the environment
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, millis: u64) -> Self {
        self.timeout_ms = millis;
        self
    }

    /// Override endpoint paths
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Full URL of an endpoint path
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.plugin_path.trim_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Create an HTTP client from this configuration
    pub fn build_client(&self) -> ClientResult<SpoolManagerClient> {
        SpoolManagerClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}
