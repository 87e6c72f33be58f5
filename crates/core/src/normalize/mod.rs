//! The normalization pipeline.
//!
//! - [`resolve`] finds a field under any of its known spellings
//! - [`coerce`] turns an untyped field into a typed value
//! - [`list`] parses list-like fields
//! - [`envelope`] locates the record list inside a response
//!
//! Entity normalizers combine these through [`RawRecord`] and per-entity
//! alias tables, so every entity shares one coercion library.

pub mod coerce;
pub mod envelope;
pub mod list;
pub mod resolve;

use serde_json::Value;

use crate::types::Timestamp;

pub use envelope::{normalize_collection, unwrap_list, unwrap_record};
pub use resolve::{RawRecord, resolve};

/// Total conversion from a resolved raw field.
///
/// `None` means the field was never provided; `Some(Value::Null)` means it
/// was explicitly null. Implementations must accept any input and fall back
/// to a defined "unknown" or absent value.
pub trait FromRaw: Sized {
    /// Convert a resolved field.
    fn from_raw(raw: Option<&Value>) -> Self;
}

impl FromRaw for Option<f64> {
    fn from_raw(raw: Option<&Value>) -> Self {
        coerce::safe_number(raw)
    }
}

impl FromRaw for Option<i64> {
    fn from_raw(raw: Option<&Value>) -> Self {
        coerce::safe_integer(raw)
    }
}

impl FromRaw for Option<String> {
    fn from_raw(raw: Option<&Value>) -> Self {
        coerce::text(raw)
    }
}

impl FromRaw for Option<Timestamp> {
    fn from_raw(raw: Option<&Value>) -> Self {
        coerce::safe_date(raw)
    }
}

impl FromRaw for Vec<String> {
    fn from_raw(raw: Option<&Value>) -> Self {
        list::parse_list(raw)
    }
}
