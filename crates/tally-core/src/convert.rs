//! Format converter — guarantees every payload has a `records` array.
//!
//! A payload that already carries one passes through untouched. Anything
//! else is wrapped whole as a single synthetic `custom_data` record, so
//! downstream consumers can always iterate `records`.

use chrono::Utc;
use serde_json::{json, Value};

use crate::normalize::to_iso_string;

/// Convert a payload to the standard `{records: [...]}` shape.
pub fn to_standard_format(payload: Value) -> Value {
    if payload.get("records").is_some_and(Value::is_array) {
        return payload;
    }

    let now = Utc::now();
    json!({
        "records": [{
            "id": format!("converted_{}", now.timestamp_millis()),
            "fields": payload,
            "action": "custom_data",
            "created_at": to_iso_string(now),
        }]
    })
}
