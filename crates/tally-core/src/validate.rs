//! Validator — best-effort structural check of an incoming payload.
//!
//! The report is advisory. The endpoint attaches warnings to its response
//! and logs errors, but processing continues either way.

use serde::Serialize;
use serde_json::Value;

use crate::process::is_truthy;

/// Outcome of validating one payload. `valid` is false iff `errors` is
/// non-empty; warnings never flip validity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Check a payload against the standard push shape.
pub fn validate(payload: &Value) -> ValidationReport {
    let mut report = ValidationReport {
        valid: true,
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    if is_empty_payload(payload) {
        report.valid = false;
        report.errors.push("empty data".to_string());
        return report;
    }

    match payload.get("records") {
        Some(Value::Array(records)) => {
            for (index, record) in records.iter().enumerate() {
                if !is_truthy(record.get("fields")) && !is_truthy(record.get("id")) {
                    report
                        .errors
                        .push(format!("record {} is missing both fields and id", index + 1));
                }
            }
        }
        _ => report.warnings.push(
            "payload has no standard records array; treating it as a non-standard format"
                .to_string(),
        ),
    }

    if !report.errors.is_empty() {
        report.valid = false;
    }
    report
}

/// Null and the empty object both count as "no data at all".
fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
