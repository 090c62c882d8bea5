//! Spool data model and field resolution
//!
//! Backends hand over each slot as a loose JSON object. The functions here
//! hold the whole fallback policy for turning that object into a label or a
//! [`SpoolRecord`].

use crate::error::{AdapterError, AdapterResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Backend payload for one selected spool
pub type RawSpool = Map<String, Value>;

/// Spool assigned to one tool slot, as shown to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpoolRecord {
    pub database_id: Option<Value>,
    pub spool_name: String,
    pub material: String,
    pub color_name: String,
    pub color: String,
    pub remaining_weight: Option<f64>,
    pub storage_location: String,
}

impl SpoolRecord {
    /// Resolve a record from a backend payload
    ///
    /// - `spoolName`: `displayName` when truthy, else `spoolName`, else `""`
    /// - string fields: `""` when missing or null
    /// - `databaseId`, `remainingWeight`: absent when missing or null
    pub fn resolve(raw: &RawSpool) -> Self {
        let spool_name = raw
            .get("displayName")
            .filter(|display| is_truthy(display))
            .and_then(scalar_text)
            .unwrap_or_else(|| text_or_empty(raw, "spoolName"));

        Self {
            database_id: raw.get("databaseId").filter(|v| !v.is_null()).cloned(),
            spool_name,
            material: text_or_empty(raw, "material"),
            color_name: text_or_empty(raw, "colorName"),
            color: text_or_empty(raw, "color"),
            remaining_weight: raw.get("remainingWeight").and_then(number),
            storage_location: text_or_empty(raw, "storageLocation"),
        }
    }

    /// `{material}_{colorName}_{color}` for this record
    pub fn material_label(&self) -> String {
        format!("{}_{}_{}", self.material, self.color_name, self.color)
    }
}

/// Build the `{material}_{colorName}_{color}` label of a backend payload
///
/// Unlike [`SpoolRecord::resolve`], all three keys must be present. A null
/// value is rendered as `None`.
pub fn material_label(raw: &RawSpool) -> AdapterResult<String> {
    let field = |name: &'static str| {
        raw.get(name)
            .map(label_text)
            .ok_or(AdapterError::MissingField(name))
    };
    Ok(format!(
        "{}_{}_{}",
        field("material")?,
        field("colorName")?,
        field("color")?
    ))
}

/// Opaque decoded body of a gating response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateDecision(Value);

impl GateDecision {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Top-level field, if the decision is an object
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Value> for GateDecision {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn label_text(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn text_or_empty(raw: &RawSpool, key: &str) -> String {
    raw.get(key).and_then(scalar_text).unwrap_or_default()
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
