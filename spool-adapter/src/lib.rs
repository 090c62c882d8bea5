//! # spool-adapter
//!
//! Adapter between a 3D-printer host and a spool-inventory backend.
//!
//! ## Scope
//!
//! This crate normalizes WHAT the backend answers:
//! - Material labels per tool slot
//! - Spool details per tool slot
//! - Print permission and print-start confirmation
//!
//! HOW the backend is reached stays outside:
//! - In-process plugin handles → implement [`SpoolBackend`]
//! - SpoolManager over HTTP → `spool-client`
//!
//! ## Example
//!
//! ```ignore
//! use spool_adapter::SpoolAdapter;
//!
//! let adapter = SpoolAdapter::new(backend);
//!
//! // Never fails; empty when the backend is down
//! let labels = adapter.material_labels();
//!
//! // Fails on any non-200 answer
//! let decision = adapter.check_print_allowed()?;
//! ```

mod adapter;
mod backend;
mod context;
mod error;
mod record;

// Re-exports
pub use adapter::{SpoolAdapter, degrade_to_empty};
pub use backend::{GateResponse, SpoolBackend};
pub use context::{ContextGuard, HostContext, NoopContext};
pub use error::{AdapterError, AdapterResult, BackendError, BackendResult, GateOperation};
pub use record::{GateDecision, RawSpool, SpoolRecord, material_label};
