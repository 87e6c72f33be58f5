//! Canonical records and their normalizers.
//!
//! Each entity module owns an alias table (`keys`), the canonical struct,
//! and a total `normalize` function built on [`crate::normalize`].

pub mod delivery;
pub mod food;
pub mod order;
pub mod user;

use core::fmt::{Debug, Display};
use core::hash::Hash;

use serde::Serialize;
use serde_json::Value;

pub use delivery::Delivery;
pub use food::{Calories, Food, Ingredient, Nutrition};
pub use order::Purchase;
pub use user::User;

/// A canonical record kind.
pub trait Entity: Clone + Debug + Serialize {
    /// Identifier type.
    type Id: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static;

    /// Key holding the record list in list envelopes.
    const COLLECTION_KEY: &'static str;

    /// Singular, lowercase kind name for logs and messages.
    const KIND: &'static str;

    /// Build the canonical record from any raw value. Never fails.
    fn normalize(raw: &Value) -> Self;

    /// Record identifier.
    fn id(&self) -> Self::Id;
}

/// Join optional text fields for display, `—` when nothing is left.
pub(crate) fn join_display(parts: &[Option<&str>]) -> String {
    let joined = parts
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        "—".to_owned()
    } else {
        trimmed.to_owned()
    }
}
