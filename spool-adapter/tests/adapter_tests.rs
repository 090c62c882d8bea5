// spool-adapter/tests/adapter_tests.rs
// Adapter behaviour against scripted backends

use serde_json::{Value, json};
use spool_adapter::{
    AdapterError, BackendError, BackendResult, GateOperation, GateResponse, HostContext,
    RawSpool, SpoolAdapter, SpoolBackend,
};
use std::cell::{Cell, RefCell};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Backend that replays canned answers
#[derive(Default)]
struct ScriptedBackend {
    spools: Option<Vec<Option<RawSpool>>>,
    allowed: Option<(u16, &'static str)>,
    started: Option<(u16, &'static str)>,
    calls: Cell<usize>,
}

impl ScriptedBackend {
    fn with_spools(spools: Vec<Option<Value>>) -> Self {
        Self {
            spools: Some(
                spools
                    .into_iter()
                    .map(|s| s.and_then(|v| v.as_object().cloned()))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    fn unreachable() -> Self {
        Self::default()
    }

    fn gating(allowed: (u16, &'static str), started: (u16, &'static str)) -> Self {
        Self {
            allowed: Some(allowed),
            started: Some(started),
            ..Default::default()
        }
    }

    fn answer(answer: Option<(u16, &'static str)>) -> BackendResult<GateResponse> {
        answer
            .map(|(status, body)| GateResponse::new(status, body))
            .ok_or_else(|| BackendError::Unavailable("connection refused".into()))
    }
}

impl SpoolBackend for ScriptedBackend {
    fn selected_spools(&self) -> BackendResult<Vec<Option<RawSpool>>> {
        self.calls.set(self.calls.get() + 1);
        self.spools
            .clone()
            .ok_or_else(|| BackendError::Unavailable("connection refused".into()))
    }

    fn allowed_to_print(&self) -> BackendResult<GateResponse> {
        self.calls.set(self.calls.get() + 1);
        Self::answer(self.allowed)
    }

    fn start_print_confirmed(&self) -> BackendResult<GateResponse> {
        self.calls.set(self.calls.get() + 1);
        Self::answer(self.started)
    }
}

/// Context that records enter/exit
#[derive(Default)]
struct RecordingContext {
    events: RefCell<Vec<&'static str>>,
}

impl HostContext for RecordingContext {
    fn enter(&self) {
        self.events.borrow_mut().push("enter");
    }

    fn exit(&self) {
        self.events.borrow_mut().push("exit");
    }
}

/// Log sink shared with a tracing subscriber
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}

fn pla_red() -> Value {
    json!({ "material": "PLA", "colorName": "Red", "color": "#ff0000" })
}

// ========== material_labels ==========

#[test]
fn test_labels_for_fully_assigned_slots() {
    let backend = ScriptedBackend::with_spools(vec![
        Some(pla_red()),
        Some(json!({ "material": "PETG", "colorName": "Blue", "color": "0000ff" })),
    ]);
    let adapter = SpoolAdapter::new(&backend);

    let labels = adapter.material_labels();
    assert_eq!(
        labels,
        vec![
            Some("PLA_Red_#ff0000".to_string()),
            Some("PETG_Blue_0000ff".to_string()),
        ]
    );
    assert_eq!(backend.calls.get(), 1);
}

#[test]
fn test_labels_preserve_empty_slots() {
    let backend = ScriptedBackend::with_spools(vec![None, Some(pla_red()), None]);
    let adapter = SpoolAdapter::new(&backend);

    assert_eq!(
        adapter.material_labels(),
        vec![None, Some("PLA_Red_#ff0000".to_string()), None]
    );
}

#[test]
fn test_null_field_keeps_other_labels() {
    let backend = ScriptedBackend::with_spools(vec![
        Some(json!({ "material": "PLA", "colorName": "Red", "color": "#f00" })),
        None,
        Some(json!({ "material": null, "colorName": "Blue", "color": "#00f" })),
    ]);
    let adapter = SpoolAdapter::new(&backend);

    assert_eq!(
        adapter.material_labels(),
        vec![
            Some("PLA_Red_#f00".to_string()),
            None,
            Some("None_Blue_#00f".to_string()),
        ]
    );
}

#[test]
fn test_labels_for_no_slots() {
    let backend = ScriptedBackend::with_spools(vec![]);
    let adapter = SpoolAdapter::new(&backend);
    assert!(adapter.material_labels().is_empty());
}

#[test]
fn test_labels_empty_and_warned_when_backend_fails() {
    let backend = ScriptedBackend::unreachable();
    let adapter = SpoolAdapter::new(&backend);

    let (labels, logs) = with_captured_logs(|| adapter.material_labels());
    assert!(labels.is_empty());
    assert!(logs.contains("WARN"));
    assert!(logs.contains("Skipping material assignment due to SpoolManager error"));
    assert!(logs.contains("connection refused"));
}

// ========== spool_details ==========

#[test]
fn test_details_resolve_each_slot() {
    let backend = ScriptedBackend::with_spools(vec![
        Some(json!({
            "databaseId": 12,
            "displayName": "Prusament Galaxy Black",
            "spoolName": "spool-12",
            "material": "PLA",
            "colorName": "Galaxy Black",
            "color": "#1a1a1a",
            "remainingWeight": 640.0,
            "storageLocation": "Dry box 1",
        })),
        None,
    ]);
    let adapter = SpoolAdapter::new(&backend);

    let details = adapter.spool_details();
    assert_eq!(details.len(), 2);
    let record = details[0].as_ref().unwrap();
    assert_eq!(record.database_id, Some(json!(12)));
    assert_eq!(record.spool_name, "Prusament Galaxy Black");
    assert_eq!(record.material, "PLA");
    assert_eq!(record.color_name, "Galaxy Black");
    assert_eq!(record.color, "#1a1a1a");
    assert_eq!(record.remaining_weight, Some(640.0));
    assert_eq!(record.storage_location, "Dry box 1");
    assert!(details[1].is_none());
}

#[test]
fn test_details_name_falls_back_to_empty() {
    let backend = ScriptedBackend::with_spools(vec![Some(json!({ "material": "TPU" }))]);
    let adapter = SpoolAdapter::new(&backend);

    let details = adapter.spool_details();
    let record = details[0].as_ref().unwrap();
    assert_eq!(record.spool_name, "");
    assert_eq!(record.color, "");
    assert_eq!(record.remaining_weight, None);
    assert_eq!(record.database_id, None);
}

#[test]
fn test_details_empty_and_warned_when_backend_fails() {
    let backend = ScriptedBackend::unreachable();
    let adapter = SpoolAdapter::new(&backend);

    let (details, logs) = with_captured_logs(|| adapter.spool_details());
    assert!(details.is_empty());
    assert!(logs.contains("Skipping spool info due to SpoolManager error"));
    assert!(matches!(
        adapter.try_spool_details(),
        Err(AdapterError::Backend(BackendError::Unavailable(_)))
    ));
}

// ========== check_print_allowed / confirm_print_start ==========

#[test]
fn test_print_allowed_returns_decoded_body() {
    let backend = ScriptedBackend::gating((200, r#"{"allowed": true}"#), (200, "{}"));
    let adapter = SpoolAdapter::new(&backend);

    let decision = adapter.check_print_allowed().unwrap();
    assert_eq!(decision.as_value(), &json!({ "allowed": true }));
}

#[test]
fn test_print_allowed_rejects_non_200() {
    let backend = ScriptedBackend::gating((403, r#""no spool""#), (200, "{}"));
    let adapter = SpoolAdapter::new(&backend);

    let err = adapter.check_print_allowed().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("403"), "{message}");
    assert!(message.contains("no spool"), "{message}");
    assert!(matches!(
        err,
        AdapterError::Gate {
            operation: GateOperation::AllowedToPrint,
            status: 403,
            ..
        }
    ));
}

#[test]
fn test_print_start_returns_decoded_body() {
    let backend = ScriptedBackend::gating((500, "unused"), (200, r#"{"deducted": [12.5, null]}"#));
    let adapter = SpoolAdapter::new(&backend);

    let decision = adapter.confirm_print_start().unwrap();
    assert_eq!(decision.into_inner(), json!({ "deducted": [12.5, null] }));
}

#[test]
fn test_print_start_rejects_non_200() {
    let backend = ScriptedBackend::gating((200, "{}"), (409, "no spool"));
    let adapter = SpoolAdapter::new(&backend);

    let err = adapter.confirm_print_start().unwrap_err();
    assert_eq!(err.status(), Some(409));
    let message = err.to_string();
    assert!(message.contains("409"));
    assert!(message.contains("no spool"));
}

#[test]
fn test_non_200_success_codes_are_rejected() {
    let backend = ScriptedBackend::gating((204, ""), (201, "{}"));
    let adapter = SpoolAdapter::new(&backend);

    assert_eq!(adapter.check_print_allowed().unwrap_err().status(), Some(204));
    assert_eq!(adapter.confirm_print_start().unwrap_err().status(), Some(201));
}

#[test]
fn test_gate_body_must_be_json() {
    let backend = ScriptedBackend::gating((200, "not json"), (200, "{}"));
    let adapter = SpoolAdapter::new(&backend);

    assert!(matches!(
        adapter.check_print_allowed(),
        Err(AdapterError::Decode(_))
    ));
}

#[test]
fn test_gate_backend_failure_propagates() {
    let backend = ScriptedBackend::unreachable();
    let adapter = SpoolAdapter::new(&backend);

    assert!(matches!(
        adapter.confirm_print_start(),
        Err(AdapterError::Backend(_))
    ));
}

// ========== host context ==========

#[test]
fn test_context_wraps_each_gating_call() {
    let backend = ScriptedBackend::gating((200, "{}"), (403, "denied"));
    let context = RecordingContext::default();
    let adapter = SpoolAdapter::with_context(&backend, &context);

    adapter.check_print_allowed().unwrap();
    adapter.confirm_print_start().unwrap_err();

    assert_eq!(
        *context.events.borrow(),
        vec!["enter", "exit", "enter", "exit"]
    );
}

#[test]
fn test_context_released_when_backend_fails() {
    let backend = ScriptedBackend::unreachable();
    let context = RecordingContext::default();
    let adapter = SpoolAdapter::with_context(&backend, &context);

    adapter.check_print_allowed().unwrap_err();
    assert_eq!(*context.events.borrow(), vec!["enter", "exit"]);
}

#[test]
fn test_queries_do_not_enter_context() {
    let backend = ScriptedBackend::with_spools(vec![Some(pla_red())]);
    let context = RecordingContext::default();
    let adapter = SpoolAdapter::with_context(&backend, &context);

    adapter.material_labels();
    adapter.spool_details();
    assert!(context.events.borrow().is_empty());
}
