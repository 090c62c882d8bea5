//! Error types for the spool adapter

use std::fmt;
use thiserror::Error;

/// Which gating call produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOperation {
    /// Permission check before a print is queued or started
    AllowedToPrint,
    /// Confirmation that a print has started
    StartPrintConfirmed,
}

impl fmt::Display for GateOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateOperation::AllowedToPrint => f.write_str("allowed_to_print"),
            GateOperation::StartPrintConfirmed => f.write_str("start_print_confirmed"),
        }
    }
}

/// Failure reported by a backend implementation
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend could not be reached
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Backend answered with data the adapter cannot use
    #[error("Malformed backend data: {0}")]
    Malformed(String),

    /// Any other backend failure
    #[error("Backend error: {0}")]
    Other(String),
}

/// Result type for backend calls
pub type BackendResult<T> = Result<T, BackendError>;

/// Adapter error type
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Gating call answered with a status other than 200
    #[error("SpoolManager error {status} on {operation}: {body}")]
    Gate {
        operation: GateOperation,
        status: u16,
        body: String,
    },

    /// Backend call failed before producing a response
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A selected spool is missing a field needed for its label
    #[error("Spool record field `{0}` is missing")]
    MissingField(&'static str),

    /// Gating body was not valid JSON
    #[error("Invalid gate response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AdapterError {
    /// Status code of a rejected gating call
    pub fn status(&self) -> Option<u16> {
        match self {
            AdapterError::Gate { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;
