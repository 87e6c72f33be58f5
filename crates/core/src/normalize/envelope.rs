//! Response envelope unwrapping.
//!
//! List endpoints answer in one of three shapes:
//!
//! - a bare array: `[ ... ]`
//! - keyed: `{ "Foods": [ ... ] }`
//! - wrapped: `{ "Value": { "Foods": [ ... ] } }`
//!
//! Any other shape yields an empty list.

use serde_json::Value;

use crate::entities::Entity;

const VALUE_KEY: &str = "Value";

/// Locate the record list inside `payload`.
///
/// Candidates are tried in order: `Value.<key>`, `<key>`, then the payload
/// itself when it is an array. The first candidate that is present and not
/// null decides; if it is not an array the result is empty.
///
/// ```
/// use serde_json::json;
/// use tanawal_core::normalize::unwrap_list;
///
/// let wrapped = json!({ "Value": { "Foods": [{ "FoodID": 1 }] } });
/// assert_eq!(unwrap_list(&wrapped, "Foods").len(), 1);
///
/// assert!(unwrap_list(&json!({}), "Foods").is_empty());
/// assert!(unwrap_list(&json!(null), "Foods").is_empty());
/// ```
#[must_use]
pub fn unwrap_list<'a>(payload: &'a Value, key: &str) -> &'a [Value] {
    let candidate = payload
        .get(VALUE_KEY)
        .and_then(|inner| inner.get(key))
        .filter(|v| !v.is_null())
        .or_else(|| payload.get(key).filter(|v| !v.is_null()))
        .or_else(|| payload.is_array().then_some(payload));

    match candidate {
        Some(Value::Array(items)) => items,
        Some(other) => {
            tracing::debug!(collection = key, kind = json_kind(other), "list field is not an array");
            &[]
        }
        None => {
            tracing::debug!(collection = key, kind = json_kind(payload), "unrecognized envelope");
            &[]
        }
    }
}

/// Locate a single record: `Value` when it holds an object, else the
/// payload itself.
#[must_use]
pub fn unwrap_record(payload: &Value) -> &Value {
    payload
        .get(VALUE_KEY)
        .filter(|inner| inner.is_object())
        .unwrap_or(payload)
}

/// Unwrap and normalize a list response.
///
/// Never fails: malformed records degrade field by field, and an
/// unrecognized envelope produces an empty collection.
#[must_use]
pub fn normalize_collection<E: Entity>(payload: &Value) -> Vec<E> {
    let records: Vec<E> = unwrap_list(payload, E::COLLECTION_KEY)
        .iter()
        .map(E::normalize)
        .collect();
    tracing::debug!(collection = E::COLLECTION_KEY, count = records.len(), "normalized collection");
    records
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
