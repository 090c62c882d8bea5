//! HTTP backend for the SpoolManager plugin

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;
use spool_adapter::{BackendResult, GateResponse, RawSpool, SpoolBackend};
use std::time::Duration;
use tracing::{debug, instrument};

const API_KEY_HEADER: &str = "X-Api-Key";

/// Blocking HTTP client for the SpoolManager REST API
#[derive(Debug, Clone)]
pub struct SpoolManagerClient {
    client: Client,
    config: ClientConfig,
}

impl SpoolManagerClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("base URL is empty".into()));
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Configuration this client was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn get(&self, endpoint: &str) -> RequestBuilder {
        let mut req = self.client.get(self.config.url(endpoint));
        if let Some(key) = &self.config.api_key {
            req = req.header(API_KEY_HEADER, key);
        }
        req
    }

    /// Fetch the selected spool of every tool slot
    #[instrument(skip(self))]
    pub fn fetch_selected_spools(&self) -> ClientResult<Vec<Option<RawSpool>>> {
        let endpoint = &self.config.endpoints.selected_spools;
        let response = self.get(endpoint).send()?;
        let status = response.status();
        debug!(%endpoint, status = status.as_u16(), "SpoolManager response");

        if !status.is_success() {
            let text = response.text()?;
            return Err(ClientError::InvalidResponse(format!(
                "{endpoint} answered {status}: {text}"
            )));
        }
        let body = response.bytes()?;
        parse_selected_spools(serde_json::from_slice(&body)?)
    }

    /// Call a gating endpoint and keep status and body as-is
    #[instrument(skip(self))]
    pub fn fetch_gate(&self, endpoint: &str) -> ClientResult<GateResponse> {
        let response = self.get(endpoint).send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?;
        debug!(%endpoint, status, len = body.len(), "SpoolManager response");
        Ok(GateResponse::new(status, body.to_vec()))
    }
}

impl SpoolBackend for SpoolManagerClient {
    fn selected_spools(&self) -> BackendResult<Vec<Option<RawSpool>>> {
        Ok(self.fetch_selected_spools()?)
    }

    fn allowed_to_print(&self) -> BackendResult<GateResponse> {
        Ok(self.fetch_gate(&self.config.endpoints.allowed_to_print)?)
    }

    fn start_print_confirmed(&self) -> BackendResult<GateResponse> {
        Ok(self.fetch_gate(&self.config.endpoints.start_print_confirmed)?)
    }
}

/// Accepts a bare slot array or `{"selectedSpools": [...]}`
pub(crate) fn parse_selected_spools(body: Value) -> ClientResult<Vec<Option<RawSpool>>> {
    let slots = match body {
        Value::Array(slots) => slots,
        Value::Object(mut map) => match map.remove("selectedSpools") {
            Some(Value::Array(slots)) => slots,
            _ => {
                return Err(ClientError::InvalidResponse(
                    "missing `selectedSpools` array".into(),
                ));
            }
        },
        other => {
            return Err(ClientError::InvalidResponse(format!(
                "expected slot list, got {other}"
            )));
        }
    };

    slots
        .into_iter()
        .enumerate()
        .map(|(slot, value)| match value {
            Value::Null => Ok(None),
            Value::Object(spool) => Ok(Some(spool)),
            other => Err(ClientError::InvalidResponse(format!(
                "slot {slot} is not an object: {other}"
            ))),
        })
        .collect()
}
