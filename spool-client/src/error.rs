//! Client error types

use spool_adapter::BackendError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid client configuration
    #[error("Invalid config: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for BackendError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_connect() || e.is_timeout() => {
                BackendError::Unavailable(e.to_string())
            }
            ClientError::InvalidResponse(msg) => BackendError::Malformed(msg),
            ClientError::Serialization(e) => BackendError::Malformed(e.to_string()),
            other => BackendError::Other(other.to_string()),
        }
    }
}
