//! Host-facing spool adapter

use crate::backend::{GateResponse, SpoolBackend};
use crate::context::{HostContext, NoopContext};
use crate::error::{AdapterError, AdapterResult, BackendResult, GateOperation};
use crate::record::{GateDecision, SpoolRecord, material_label};
use tracing::{debug, instrument, warn};

/// Wraps a spool backend and normalizes its answers for the host
///
/// Query operations never fail: a broken inventory must not block the
/// print queue, so errors are logged and turned into an empty list.
/// Gating operations return every non-200 answer as [`AdapterError::Gate`].
#[derive(Debug, Clone)]
pub struct SpoolAdapter<B, C = NoopContext> {
    backend: B,
    context: C,
}

impl<B: SpoolBackend> SpoolAdapter<B> {
    /// Create an adapter for a backend that needs no host context
    pub fn new(backend: B) -> Self {
        Self::with_context(backend, NoopContext)
    }
}

impl<B: SpoolBackend, C: HostContext> SpoolAdapter<B, C> {
    /// Create an adapter that activates `context` around gating calls
    pub fn with_context(backend: B, context: C) -> Self {
        Self { backend, context }
    }

    /// Backend this adapter forwards to
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Material label per tool slot, or empty when the backend fails
    pub fn material_labels(&self) -> Vec<Option<String>> {
        degrade_to_empty("material assignment", self.try_material_labels())
    }

    /// Material label per tool slot
    pub fn try_material_labels(&self) -> AdapterResult<Vec<Option<String>>> {
        self.backend
            .selected_spools()?
            .iter()
            .map(|slot| slot.as_ref().map(material_label).transpose())
            .collect()
    }

    /// Spool details per tool slot, or empty when the backend fails
    pub fn spool_details(&self) -> Vec<Option<SpoolRecord>> {
        degrade_to_empty("spool info", self.try_spool_details())
    }

    /// Spool details per tool slot
    pub fn try_spool_details(&self) -> AdapterResult<Vec<Option<SpoolRecord>>> {
        Ok(self
            .backend
            .selected_spools()?
            .iter()
            .map(|slot| slot.as_ref().map(SpoolRecord::resolve))
            .collect())
    }

    /// Ask the backend whether the selected spools allow a print
    #[instrument(skip(self))]
    pub fn check_print_allowed(&self) -> AdapterResult<GateDecision> {
        self.gate(GateOperation::AllowedToPrint, |b| b.allowed_to_print())
    }

    /// Confirm to the backend that a print has started
    #[instrument(skip(self))]
    pub fn confirm_print_start(&self) -> AdapterResult<GateDecision> {
        self.gate(GateOperation::StartPrintConfirmed, |b| b.start_print_confirmed())
    }

    fn gate<F>(&self, operation: GateOperation, call: F) -> AdapterResult<GateDecision>
    where
        F: FnOnce(&B) -> BackendResult<GateResponse>,
    {
        let response = {
            let _guard = self.context.activate();
            call(&self.backend)?
        };
        debug!(%operation, status = response.status, "Gate response");

        if !response.is_ok() {
            return Err(AdapterError::Gate {
                operation,
                status: response.status,
                body: response.body_text(),
            });
        }
        Ok(serde_json::from_slice(&response.body)?)
    }
}

/// Turn a failed query into an empty list, logging the cause
///
/// An empty result is indistinguishable from "backend unavailable" or
/// "no tool slots" for the caller.
pub fn degrade_to_empty<T>(what: &str, result: AdapterResult<Vec<T>>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            warn!("Skipping {what} due to SpoolManager error: {e}");
            Vec::new()
        }
    }
}
