//! Tolerant list parsing for tags, ingredients and similar fields.
//!
//! Upstream fields drift from free text (`"salt, pepper"`) to JSON text
//! (`"[\"salt\",\"pepper\"]"`) to real arrays. All three parse to the same
//! sequence without configuration:
//!
//! 1. arrays: each scalar element is stringified;
//! 2. strings: decoded as a JSON array first, split on commas and newlines
//!    only when that decoding fails.
//!
//! Both branches trim, drop empty tokens, and drop case-insensitive
//! duplicates while keeping the first-seen spelling.

use std::collections::HashSet;

use serde_json::Value;

const DELIMITERS: &[char] = &[',', '\n'];

/// Parse a list-like field.
///
/// ```
/// use serde_json::json;
/// use tanawal_core::normalize::list::parse_list;
///
/// assert_eq!(parse_list(Some(&json!("a, A, b"))), vec!["a", "b"]);
/// assert_eq!(parse_list(Some(&json!(r#"["x","y"]"#))), vec!["x", "y"]);
/// assert_eq!(parse_list(Some(&json!(["x", " y ", ""]))), vec!["x", "y"]);
/// assert!(parse_list(None).is_empty());
/// ```
#[must_use]
pub fn parse_list(raw: Option<&Value>) -> Vec<String> {
    match raw {
        Some(Value::Array(items)) => dedup_tokens(items.iter().filter_map(scalar_text)),
        Some(Value::String(s)) => parse_list_text(s),
        Some(Value::Number(n)) => parse_list_text(&n.to_string()),
        _ => Vec::new(),
    }
}

/// Parse list text: JSON array first, delimiter split as the fallback.
#[must_use]
pub fn parse_list_text(text: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<Value>>(text.trim()) {
        Ok(items) => dedup_tokens(items.iter().filter_map(scalar_text)),
        Err(_) => dedup_tokens(text.split(DELIMITERS).map(str::to_owned)),
    }
}

/// Trim, drop empties, and drop case-insensitive repeats (first one wins).
#[must_use]
pub fn dedup_tokens<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for token in tokens {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            out.push(trimmed.to_owned());
        }
    }
    out
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
