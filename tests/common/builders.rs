//! Test builders — ergonomic constructors for raw records, payloads, and
//! typed store entries.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning
//! `Result`.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use tally_core::types::{ProcessedRecord, ReceivedEntry, ReceivedHeaders, RecordMetadata};
use tally_core::Action;

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for raw (pre-processing) record values.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::new()
///     .id("rec_42")
///     .action("update")
///     .field("金额", 50)
///     .build();
/// ```
pub struct RecordBuilder {
    record: Map<String, Value>,
    fields: Map<String, Value>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            record: Map::new(),
            fields: Map::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.record.insert("id".to_string(), Value::String(id.into()));
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.record
            .insert("action".to_string(), Value::String(action.into()));
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Set an arbitrary top-level key (`deleted`, `updated_at`, `table_id`, …).
    pub fn top_level(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record.insert(key.into(), value.into());
        self
    }

    pub fn build(mut self) -> Value {
        if !self.fields.is_empty() {
            self.record
                .insert("fields".to_string(), Value::Object(self.fields));
        }
        Value::Object(self.record)
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Payload helpers
// ---------------------------------------------------------------------------

/// Wrap records in the standard push shape.
pub fn records_payload(records: Vec<Value>) -> Value {
    json!({ "records": records })
}

/// The canonical CJK expense record the platform pushes.
pub fn expense_record() -> Value {
    RecordBuilder::new()
        .action("create")
        .field("日期", "2024-01-01")
        .field("金额", 50)
        .field("分类", "food")
        .build()
}

// ---------------------------------------------------------------------------
// Signature helpers
// ---------------------------------------------------------------------------

/// Headers for a correctly signed request against `token`.
pub fn signed_headers(token: &str) -> Vec<(&'static str, String)> {
    let timestamp = "1700000000000".to_string();
    let nonce = "testnonce".to_string();
    let signature = tally_server::signature::compute(&timestamp, &nonce, token);
    vec![
        ("x-lark-request-timestamp", timestamp),
        ("x-lark-request-nonce", nonce),
        ("x-lark-signature", signature),
    ]
}

/// Headers carrying a signature that cannot match any token.
pub fn mismatched_headers() -> Vec<(&'static str, String)> {
    vec![
        ("x-lark-request-timestamp", "1700000000000".to_string()),
        ("x-lark-request-nonce", "testnonce".to_string()),
        ("x-lark-signature", "0000000000000000000000000000000000000000".to_string()),
    ]
}

// ---------------------------------------------------------------------------
// Typed store entries with millisecond-exact timestamps
// ---------------------------------------------------------------------------

/// A fixed instant that survives the store's millisecond serialization
/// unchanged, so round-trip equality assertions hold.
pub fn fixed_instant() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T10:00:00.000Z")
        .expect("fixture instant")
        .with_timezone(&Utc)
}

/// Build a `ProcessedRecord` suitable for byte-exact store round trips.
pub fn processed_record(id: &str) -> ProcessedRecord {
    let mut fields = Map::new();
    fields.insert("金额".to_string(), json!(50));
    fields.insert("分类".to_string(), json!("food"));
    ProcessedRecord {
        id: id.to_string(),
        raw_id: Some(id.to_string()),
        fields,
        action: Action::Create,
        created_at: fixed_instant(),
        updated_at: fixed_instant(),
        metadata: RecordMetadata {
            source: "bitable".to_string(),
            table_id: "unknown".to_string(),
            app_id: "unknown".to_string(),
        },
    }
}

/// Build a `ReceivedEntry` suitable for byte-exact store round trips.
pub fn received_entry(data: Value) -> ReceivedEntry {
    ReceivedEntry {
        data,
        timestamp: fixed_instant(),
        headers: ReceivedHeaders::default(),
    }
}
