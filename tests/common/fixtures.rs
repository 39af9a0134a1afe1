//! Static payload corpora used across harnesses.
//!
//! Shapes mirror what the bitable platform actually pushes: CJK field
//! names, mixed value types, and the occasional non-standard payload with
//! no `records` array at all.

use serde_json::{json, Value};

/// (input string, expected normalized ISO-8601 output) pairs covering every
/// recognized date shape.
pub const DATE_SAMPLES: &[(&str, &str)] = &[
    ("2024-01-01", "2024-01-01T00:00:00.000Z"),
    ("2024-01-15T10:30:00Z", "2024-01-15T10:30:00.000Z"),
    ("2024-01-15T10:30:00.5Z", "2024-01-15T10:30:00.500Z"),
    ("2024-01-15T10:30:00", "2024-01-15T10:30:00.000Z"),
    ("03/05/2024", "2024-03-05T00:00:00.000Z"),
    ("2024/03/05", "2024-03-05T00:00:00.000Z"),
    ("2024-01-15T18:00:00+08:00", "2024-01-15T10:00:00.000Z"),
    ("Mon, 15 Jan 2024 10:00:00 +0000", "2024-01-15T10:00:00.000Z"),
];

/// Strings the heuristic must NOT rewrite.
pub const NON_DATE_STRINGS: &[&str] = &[
    "food",
    "午餐支出",
    "not-a-date",
    "12345",
    "v1.2.3",
    "2024-13-99",
    "99/99/2024",
    "",
];

/// Standard payload: one expense row with CJK field names.
pub fn expense_payload() -> Value {
    json!({
        "records": [{
            "fields": { "日期": "2024-01-01", "金额": 50, "分类": "food" },
            "action": "create"
        }]
    })
}

/// Payload exercising complex value types: arrays, nested objects, booleans.
pub fn complex_payload() -> Value {
    json!({
        "records": [{
            "id": "rec_complex_1",
            "fields": {
                "日期": "2024-02-01",
                "金额": 128.5,
                "标签": ["餐饮", "报销"],
                "负责人": { "name": "张三", "email": "zhangsan@example.com" },
                "是否报销": true,
                "备注": null
            }
        }]
    })
}

/// A push with no `records` array; the converter must wrap it whole.
pub fn non_standard_payload() -> Value {
    json!({ "event": "sync", "数量": 3 })
}

/// A batch where one entry is unusable and its sibling is fine.
pub fn partial_batch_payload() -> Value {
    json!({
        "records": [
            null,
            { "fields": { "金额": 10 } }
        ]
    })
}
