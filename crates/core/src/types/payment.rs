//! Payment method labels for purchases.
//!
//! The backend sends either a small integer code or free text. The two
//! branches never share a variant: an unmapped code stays an
//! [`PaymentMethod::UnknownCode`] labelled `Method {code}`, and text is kept
//! as a prettified [`PaymentMethod::Named`] value.

use core::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::normalize::FromRaw;

/// How a purchase was paid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PaymentMethod {
    PayPal,
    Stripe,
    Cash,
    Card,
    /// A numeric code with no table entry, kept as the backend sent it.
    UnknownCode(String),
    /// Free-text method, prettified from snake case.
    Named(String),
    /// Missing, blank, or not a scalar.
    #[default]
    Unspecified,
}

impl PaymentMethod {
    /// Map an integer code.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::PayPal,
            2 => Self::Stripe,
            3 => Self::Cash,
            4 => Self::Card,
            other => Self::UnknownCode(other.to_string()),
        }
    }

    /// Map free text. Blank text is unspecified.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Self::Unspecified
        } else {
            Self::Named(prettify(trimmed))
        }
    }

    /// Human-readable label. Never empty.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::PayPal => "PayPal".to_owned(),
            Self::Stripe => "Stripe".to_owned(),
            Self::Cash => "Cash".to_owned(),
            Self::Card => "Card".to_owned(),
            Self::UnknownCode(code) => format!("Method {code}"),
            Self::Named(name) => name.clone(),
            Self::Unspecified => "—".to_owned(),
        }
    }
}

impl FromRaw for PaymentMethod {
    fn from_raw(raw: Option<&Value>) -> Self {
        match raw {
            Some(Value::Number(n)) => n
                .as_i64()
                .map_or_else(|| Self::UnknownCode(n.to_string()), Self::from_code),
            Some(Value::String(text)) => Self::from_text(text),
            _ => Self::Unspecified,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// `credit_card` -> `Credit Card`. Underscores become spaces and the first
/// word character after a non-word character is uppercased; the rest is left
/// as sent.
fn prettify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_boundary = true;
    for c in text.chars().map(|c| if c == '_' { ' ' } else { c }) {
        let is_word = c.is_alphanumeric();
        if is_word && at_boundary {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_boundary = !is_word;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_codes() {
        assert_eq!(PaymentMethod::from_raw(Some(&json!(1))).label(), "PayPal");
        assert_eq!(PaymentMethod::from_raw(Some(&json!(2))).label(), "Stripe");
        assert_eq!(PaymentMethod::from_raw(Some(&json!(3))).label(), "Cash");
        assert_eq!(PaymentMethod::from_raw(Some(&json!(4))).label(), "Card");
    }

    #[test]
    fn test_unknown_code_gets_generic_label() {
        let method = PaymentMethod::from_raw(Some(&json!(9)));
        assert_eq!(method, PaymentMethod::UnknownCode("9".to_owned()));
        assert_eq!(method.label(), "Method 9");
        assert_eq!(PaymentMethod::from_raw(Some(&json!(0))).label(), "Method 0");
        assert_eq!(PaymentMethod::from_raw(Some(&json!(2.5))).label(), "Method 2.5");
    }

    #[test]
    fn test_text_is_prettified() {
        assert_eq!(PaymentMethod::from_text("credit_card").label(), "Credit Card");
        assert_eq!(PaymentMethod::from_text("  bank transfer ").label(), "Bank Transfer");
        assert_eq!(PaymentMethod::from_text("e-wallet").label(), "E-Wallet");
        assert_eq!(PaymentMethod::from_text("PayPal").label(), "PayPal");
    }

    #[test]
    fn test_text_and_code_branches_stay_apart() {
        assert_eq!(PaymentMethod::from_raw(Some(&json!("1"))), PaymentMethod::Named("1".to_owned()));
        assert_ne!(PaymentMethod::from_raw(Some(&json!("1"))), PaymentMethod::from_raw(Some(&json!(1))));
    }

    #[test]
    fn test_missing_or_blank_is_never_empty() {
        for raw in [None, Some(json!(null)), Some(json!("   ")), Some(json!(true)), Some(json!([]))] {
            let label = PaymentMethod::from_raw(raw.as_ref()).label();
            assert_eq!(label, "—");
        }
    }
}
