//! Field resolution across naming drift.
//!
//! Backends rename fields between versions (`FoodName`, `foodName`,
//! `name`). Each canonical field lists its known spellings in priority
//! order and takes the first one present.

use serde_json::{Map, Value};

use super::FromRaw;
use crate::types::{Timestamp, TriState};

/// First value stored under any of `keys`.
///
/// A key holding JSON `null` counts as present: an explicit null is a
/// deliberate "no value" and stops the search. Non-object input resolves
/// nothing.
///
/// ```
/// use serde_json::json;
/// use tanawal_core::normalize::resolve;
///
/// let raw = json!({ "foodName": "Daal", "name": "ignored" });
/// assert_eq!(resolve(&raw, &["FoodName", "foodName", "name"]), Some(&json!("Daal")));
///
/// let raw = json!({ "FoodName": null, "name": "ignored" });
/// assert_eq!(resolve(&raw, &["FoodName", "name"]), Some(&json!(null)));
///
/// assert_eq!(resolve(&json!([1, 2]), &["FoodName"]), None);
/// ```
#[must_use]
pub fn resolve<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    RawRecord::new(raw).resolve(keys)
}

/// Read-only view over one untyped record.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> RawRecord<'a> {
    /// Wrap a raw value. Anything other than a JSON object behaves as an
    /// empty record.
    #[must_use]
    pub fn new(raw: &'a Value) -> Self {
        Self {
            fields: raw.as_object(),
        }
    }

    /// Whether the wrapped value was a JSON object.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        self.fields.is_some()
    }

    /// First value present under any of `keys`, nulls included.
    #[must_use]
    pub fn resolve(&self, keys: &[&str]) -> Option<&'a Value> {
        let fields = self.fields?;
        keys.iter().find_map(|key| fields.get(*key))
    }

    /// Resolve and convert in one step.
    #[must_use]
    pub fn get<T: FromRaw>(&self, keys: &[&str]) -> T {
        T::from_raw(self.resolve(keys))
    }

    #[must_use]
    pub fn number(&self, keys: &[&str]) -> Option<f64> {
        self.get(keys)
    }

    #[must_use]
    pub fn integer(&self, keys: &[&str]) -> Option<i64> {
        self.get(keys)
    }

    #[must_use]
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        self.get(keys)
    }

    #[must_use]
    pub fn date(&self, keys: &[&str]) -> Option<Timestamp> {
        self.get(keys)
    }

    #[must_use]
    pub fn list(&self, keys: &[&str]) -> Vec<String> {
        self.get(keys)
    }

    #[must_use]
    pub fn tri_state(&self, keys: &[&str]) -> TriState {
        self.get(keys)
    }
}
