//! Core types for tally-core.
//!
//! This module defines the canonical units the pipeline passes around: the
//! stored [`ProcessedRecord`], its inferred [`Action`], and the raw
//! [`ReceivedEntry`] envelope persisted alongside it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The inferred intent of an ingested record.
///
/// Callers may supply any action string; the five well-known variants are
/// what the inference heuristic produces, and [`Action::Other`] carries a
/// caller-supplied action verbatim. Serialized as a bare string either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
    Read,
    /// A non-standard payload wrapped whole by the format converter.
    CustomData,
    /// Verbatim caller-supplied action outside the known set.
    Other(String),
}

impl Action {
    pub fn as_str(&self) -> &str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Read => "read",
            Action::CustomData => "custom_data",
            Action::Other(s) => s,
        }
    }
}

impl From<&str> for Action {
    fn from(s: &str) -> Self {
        match s {
            "create" => Action::Create,
            "update" => Action::Update,
            "delete" => Action::Delete,
            "read" => Action::Read,
            "custom_data" => Action::CustomData,
            other => Action::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Action {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Action::from(s.as_str()))
    }
}

/// Provenance tags attached to every processed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Constant tag for the inbound integration.
    pub source: String,
    /// Table the record came from, `"unknown"` when the push omits it.
    pub table_id: String,
    /// App the record came from, `"unknown"` when the push omits it.
    pub app_id: String,
}

/// The canonical, normalized, timestamped representation of one ingested row.
///
/// Invariant: once appended to the store a record is never mutated or removed
/// except by a full-store clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    /// Caller-supplied id, or a generated `record_<epoch-millis>` id.
    pub id: String,
    /// The original id if the push carried one.
    pub raw_id: Option<String>,
    /// Normalized field values, insertion order preserved.
    pub fields: serde_json::Map<String, serde_json::Value>,
    pub action: Action,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    /// Always the processing-time timestamp, regardless of any supplied value.
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
    pub metadata: RecordMetadata,
}

/// Signature-related headers captured with each received payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedHeaders {
    #[serde(rename = "x-lark-timestamp")]
    pub timestamp: Option<String>,
    #[serde(rename = "x-lark-nonce")]
    pub nonce: Option<String>,
}

/// The raw envelope persisted for every accepted submission: the payload as
/// received, the receipt timestamp, and the selected signature headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedEntry {
    pub data: serde_json::Value,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub headers: ReceivedHeaders,
}

/// Serde adapter fixing timestamps to the millisecond ISO-8601 shape the wire
/// format uses (`2024-01-15T10:00:00.000Z`).
pub mod iso_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&crate::normalize::to_iso_string(*dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
