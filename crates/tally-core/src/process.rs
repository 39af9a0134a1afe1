//! Record processor — wraps one raw record as a [`ProcessedRecord`].
//!
//! The wire contract inherited JavaScript truthiness for its optional flags
//! (`deleted: 0` does not mean deleted), so the inference helpers here follow
//! those rules rather than plain presence checks.

use chrono::Utc;
use serde_json::Value;

use crate::normalize::{normalize_fields, parse_date_string};
use crate::types::{Action, ProcessedRecord, RecordMetadata};

/// Constant provenance tag for the inbound integration.
pub const SOURCE: &str = "bitable";

/// Process a raw record into its canonical stored form.
///
/// Returns `None` only when the record itself is null; any other value,
/// object or not, produces a record (a scalar has no usable `fields` and
/// ends up with an empty map).
pub fn process_record(record: &Value) -> Option<ProcessedRecord> {
    if record.is_null() {
        return None;
    }

    let now = Utc::now();
    let raw_id = record_id(record);
    let id = raw_id
        .clone()
        .unwrap_or_else(|| format!("record_{}", now.timestamp_millis()));

    let fields = match record.get("fields") {
        Some(Value::Object(map)) => normalize_fields(map),
        _ => serde_json::Map::new(),
    };

    let created_at = record
        .get("created_at")
        .and_then(Value::as_str)
        .and_then(parse_date_string)
        .unwrap_or(now);

    Some(ProcessedRecord {
        id,
        raw_id,
        fields,
        action: infer_action(record),
        created_at,
        updated_at: now,
        metadata: RecordMetadata {
            source: SOURCE.to_string(),
            table_id: string_or_unknown(record.get("table_id")),
            app_id: string_or_unknown(record.get("app_id")),
        },
    })
}

/// Infer the intent of a record, in priority order: explicit `action` field,
/// then missing id, then deletion flags, then update markers, else read.
pub fn infer_action(record: &Value) -> Action {
    if let Some(action) = record
        .get("action")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    {
        return Action::from(action);
    }
    if record_id(record).is_none() {
        return Action::Create;
    }
    if is_truthy(record.get("deleted")) || is_truthy(record.get("is_deleted")) {
        return Action::Delete;
    }
    if is_truthy(record.get("updated_at")) || is_truthy(record.get("modified_time")) {
        return Action::Update;
    }
    Action::Read
}

/// JavaScript truthiness: `null`, `false`, `0`, and `""` are falsy,
/// everything else (including empty arrays and objects) is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// A usable record id: a non-empty string, or a non-zero number rendered as
/// one. Falsy ids fall back to id synthesis like a missing id would.
fn record_id(record: &Value) -> Option<String> {
    match record.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn string_or_unknown(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown")
        .to_string()
}
