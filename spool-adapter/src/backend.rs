//! Backend capability set
//!
//! A backend is whatever tracks spools for the printer: an in-process
//! plugin handle, or the SpoolManager HTTP API (see `spool-client`).

use crate::error::BackendResult;
use crate::record::RawSpool;

/// Raw response of a gating call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl GateResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body as text, lossy on invalid UTF-8
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for spool-tracking backends
///
/// Calls are synchronous and may block for as long as the backend needs.
pub trait SpoolBackend {
    /// Selected spool per tool slot, in slot order. `None` = no spool assigned.
    fn selected_spools(&self) -> BackendResult<Vec<Option<RawSpool>>>;

    /// Ask whether the selected spools allow a print
    fn allowed_to_print(&self) -> BackendResult<GateResponse>;

    /// Tell the backend a print has started
    fn start_print_confirmed(&self) -> BackendResult<GateResponse>;
}

impl<B: SpoolBackend + ?Sized> SpoolBackend for &B {
    fn selected_spools(&self) -> BackendResult<Vec<Option<RawSpool>>> {
        (**self).selected_spools()
    }

    fn allowed_to_print(&self) -> BackendResult<GateResponse> {
        (**self).allowed_to_print()
    }

    fn start_print_confirmed(&self) -> BackendResult<GateResponse> {
        (**self).start_print_confirmed()
    }
}

impl<B: SpoolBackend + ?Sized> SpoolBackend for Box<B> {
    fn selected_spools(&self) -> BackendResult<Vec<Option<RawSpool>>> {
        (**self).selected_spools()
    }

    fn allowed_to_print(&self) -> BackendResult<GateResponse> {
        (**self).allowed_to_print()
    }

    fn start_print_confirmed(&self) -> BackendResult<GateResponse> {
        (**self).start_print_confirmed()
    }
}
