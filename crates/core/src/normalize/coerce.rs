//! Type coercers: pure functions from an untyped field to a typed value.
//!
//! None of these can fail. Input that cannot be read as the requested type
//! comes back as `None` (or [`TriState::Unknown`]).

use serde_json::Value;

use crate::types::{Timestamp, TriState};

/// Text that reads as `true` (after trim + lowercase).
const TRUE_WORDS: &[&str] = &["available", "true", "1", "yes", "y", "active"];

/// Text that reads as `false` (after trim + lowercase).
const FALSE_WORDS: &[&str] = &[
    "unavailable",
    "false",
    "0",
    "no",
    "n",
    "inactive",
    "blocked",
    "not available",
    "not active",
];

/// Finite numeric interpretation of a field.
///
/// Numbers pass through; strings are trimmed and parsed. Blank strings,
/// `NaN`, infinities, booleans, arrays and objects are all `None`.
///
/// ```
/// use serde_json::json;
/// use tanawal_core::normalize::coerce::safe_number;
///
/// assert_eq!(safe_number(Some(&json!("42"))), Some(42.0));
/// assert_eq!(safe_number(Some(&json!(" 3.5 "))), Some(3.5));
/// assert_eq!(safe_number(Some(&json!("abc"))), None);
/// assert_eq!(safe_number(Some(&json!("Infinity"))), None);
/// assert_eq!(safe_number(Some(&json!("NaN"))), None);
/// ```
#[must_use]
pub fn safe_number(raw: Option<&Value>) -> Option<f64> {
    let number = match raw? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Whole-number interpretation of a field, for identifiers and counts.
///
/// Fractional values are rejected rather than truncated.
#[must_use]
pub fn safe_integer(raw: Option<&Value>) -> Option<i64> {
    if let Some(Value::Number(n)) = raw
        && let Some(i) = n.as_i64()
    {
        return Some(i);
    }
    let number = safe_number(raw)?;
    #[allow(clippy::cast_precision_loss)] // bounds check only
    let in_range = number >= i64::MIN as f64 && number <= i64::MAX as f64;
    if number.fract() == 0.0 && in_range {
        #[allow(clippy::cast_possible_truncation)] // integral and in range
        Some(number as i64)
    } else {
        None
    }
}

/// Integer status code: a whole JSON number, or a string of ASCII digits.
#[must_use]
pub fn integer_code(raw: Option<&Value>) -> Option<i64> {
    match raw? {
        Value::Number(_) => safe_integer(raw),
        Value::String(s) => {
            let trimmed = s.trim();
            if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
                trimmed.parse().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Three-valued boolean.
///
/// Booleans pass through, numbers are true when nonzero, strings are
/// matched case-insensitively against fixed synonym tables. Anything else
/// is [`TriState::Unknown`].
#[must_use]
pub fn tri_state(raw: Option<&Value>) -> TriState {
    match raw {
        Some(Value::Bool(b)) => TriState::from(*b),
        Some(Value::Number(n)) => n.as_f64().map_or(TriState::Unknown, |v| TriState::from(v != 0.0)),
        Some(Value::String(s)) => {
            let word = s.trim().to_lowercase();
            if TRUE_WORDS.contains(&word.as_str()) {
                TriState::True
            } else if FALSE_WORDS.contains(&word.as_str()) {
                TriState::False
            } else {
                TriState::Unknown
            }
        }
        _ => TriState::Unknown,
    }
}

/// Timestamp that parses to a valid instant, else `None`.
#[must_use]
pub fn safe_date(raw: Option<&Value>) -> Option<Timestamp> {
    match raw? {
        Value::String(s) => Timestamp::parse(s),
        _ => None,
    }
}

/// Trimmed, non-empty text. Numbers are rendered as text.
#[must_use]
pub fn text(raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Lowercase, trim, and collapse runs of whitespace and underscores into a
/// single `_`, so `"In  Progress"`, `"in_progress"` and `" IN__PROGRESS "`
/// compare equal.
#[must_use]
pub fn normalize_token(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_sep = false;
    for c in text.trim().chars() {
        if c.is_whitespace() || c == '_' {
            pending_sep = true;
            continue;
        }
        if pending_sep && !out.is_empty() {
            out.push('_');
        }
        pending_sep = false;
        out.extend(c.to_lowercase());
    }
    out
}
