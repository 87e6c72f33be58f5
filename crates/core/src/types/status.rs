//! Canonical status enums and the tables that map raw backend values onto
//! them.
//!
//! Every mapper here is total: any input, including a missing field, JSON
//! `null`, an unmapped code or unexpected text, lands on a defined variant.
//! The fallback is always the enum's `Unknown` state.
//!
//! Numeric input (a JSON number, or a string made only of digits) is looked
//! up in the code table. Other text is lowercased, runs of whitespace and
//! underscores collapse to a single `_`, and the result is looked up in the
//! synonym table.
//!
//! # Order status
//!
//! | Code | Synonyms                                        | State         |
//! |------|-------------------------------------------------|---------------|
//! | 0    | `pending`                                       | `pending`     |
//! | 3    | `in_progress`, `processing`, `preparing`        | `in_progress` |
//! | 1    | `delivered`, `paid`, `completed`, `success`     | `delivered`   |
//! | 2    | `cancelled`, `canceled`, `fail`, `failed`       | `cancelled`   |
//!
//! # Delivery status
//!
//! | Code | Synonyms                  | State        |
//! |------|---------------------------|--------------|
//! | 0    | `pending`                 | `pending`    |
//! | 1    | `assigned`                | `assigned`   |
//! | 2    | `picked_up`               | `picked_up`  |
//! | 3    | `in_transit`              | `in_transit` |
//! | 4    | `delivered`               | `delivered`  |
//! | 5    | `cancelled`, `canceled`   | `cancelled`  |
//! | 6    | `failed`                  | `failed`     |
//!
//! The numeric tables were inferred from sample payloads and still need to
//! be confirmed against the backend contract.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::coerce::{integer_code, normalize_token, tri_state};
use crate::normalize::FromRaw;

/// A boolean the backend may omit or encode ambiguously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    True,
    False,
    #[default]
    Unknown,
}

impl TriState {
    /// `Some(bool)` when known.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    #[must_use]
    pub const fn is_false(self) -> bool {
        matches!(self, Self::False)
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unknown, Self::from)
    }
}

impl FromRaw for TriState {
    fn from_raw(raw: Option<&Value>) -> Self {
        tri_state(raw)
    }
}

// =============================================================================
// Food availability
// =============================================================================

/// Whether a food item can currently be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Unavailable,
    #[default]
    Unknown,
}

impl Availability {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Unavailable => "Unavailable",
            Self::Unknown => "—",
        }
    }

    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }

    /// The state a toggle moves to. Anything not available becomes available.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Available => Self::Unavailable,
            Self::Unavailable | Self::Unknown => Self::Available,
        }
    }
}

impl From<TriState> for Availability {
    fn from(value: TriState) -> Self {
        match value {
            TriState::True => Self::Available,
            TriState::False => Self::Unavailable,
            TriState::Unknown => Self::Unknown,
        }
    }
}

impl FromRaw for Availability {
    fn from_raw(raw: Option<&Value>) -> Self {
        tri_state(raw).into()
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match tri_state(Some(&Value::String(s.to_owned()))) {
            TriState::Unknown => Err(format!("invalid availability: {s}")),
            known => Ok(known.into()),
        }
    }
}

// =============================================================================
// User status
// =============================================================================

/// Account state of an app user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Blocked,
    #[default]
    Unknown,
}

impl UserStatus {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Blocked => "Blocked",
            Self::Unknown => "—",
        }
    }

    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(self, Self::Blocked)
    }

    /// Canonical state for a block/unblock decision.
    #[must_use]
    pub const fn from_blocked(blocked: bool) -> Self {
        if blocked { Self::Blocked } else { Self::Active }
    }
}

impl From<TriState> for UserStatus {
    fn from(value: TriState) -> Self {
        match value {
            TriState::True => Self::Active,
            TriState::False => Self::Blocked,
            TriState::Unknown => Self::Unknown,
        }
    }
}

impl FromRaw for UserStatus {
    fn from_raw(raw: Option<&Value>) -> Self {
        tri_state(raw).into()
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match tri_state(Some(&Value::String(s.to_owned()))) {
            TriState::Unknown => Err(format!("invalid user status: {s}")),
            known => Ok(known.into()),
        }
    }
}

// =============================================================================
// Order status
// =============================================================================

/// Lifecycle state of a food purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Delivered,
    Cancelled,
    #[default]
    Unknown,
}

impl OrderStatus {
    /// All states, `Unknown` last.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Delivered,
        Self::Cancelled,
        Self::Unknown,
    ];

    /// Map a numeric status code.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Pending,
            1 => Self::Delivered,
            2 => Self::Cancelled,
            3 => Self::InProgress,
            _ => Self::Unknown,
        }
    }

    /// Map free text through the synonym table.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        match normalize_token(text).as_str() {
            "pending" => Self::Pending,
            "in_progress" | "processing" | "preparing" => Self::InProgress,
            "delivered" | "paid" | "completed" | "success" => Self::Delivered,
            "cancelled" | "canceled" | "fail" | "failed" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }

    /// Snake-case name, as sent back to the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    /// Pending or in progress.
    #[must_use]
    pub const fn is_awaiting(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl FromRaw for OrderStatus {
    fn from_raw(raw: Option<&Value>) -> Self {
        map_status(raw, Self::from_code, Self::from_text, Self::Unknown)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_text(s) {
            Self::Unknown if normalize_token(s) != "unknown" => {
                Err(format!("invalid order status: {s}"))
            }
            status => Ok(status),
        }
    }
}

// =============================================================================
// Delivery status
// =============================================================================

/// Lifecycle state of a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Assigned,
    PickedUp,
    InTransit,
    Delivered,
    Cancelled,
    Failed,
    #[default]
    Unknown,
}

impl DeliveryStatus {
    /// All states, `Unknown` last.
    pub const ALL: [Self; 8] = [
        Self::Pending,
        Self::Assigned,
        Self::PickedUp,
        Self::InTransit,
        Self::Delivered,
        Self::Cancelled,
        Self::Failed,
        Self::Unknown,
    ];

    /// Map a numeric status code.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Pending,
            1 => Self::Assigned,
            2 => Self::PickedUp,
            3 => Self::InTransit,
            4 => Self::Delivered,
            5 => Self::Cancelled,
            6 => Self::Failed,
            _ => Self::Unknown,
        }
    }

    /// Map free text through the synonym table.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        match normalize_token(text).as_str() {
            "pending" => Self::Pending,
            "assigned" => Self::Assigned,
            "picked_up" => Self::PickedUp,
            "in_transit" => Self::InTransit,
            "delivered" => Self::Delivered,
            "cancelled" | "canceled" => Self::Cancelled,
            "failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }

    /// Snake-case name, as sent back to the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::PickedUp => "picked_up",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }

    /// Pending or assigned: not yet with a driver.
    #[must_use]
    pub const fn is_awaiting_pickup(self) -> bool {
        matches!(self, Self::Pending | Self::Assigned)
    }

    /// Picked up or in transit.
    #[must_use]
    pub const fn is_en_route(self) -> bool {
        matches!(self, Self::PickedUp | Self::InTransit)
    }
}

impl FromRaw for DeliveryStatus {
    fn from_raw(raw: Option<&Value>) -> Self {
        map_status(raw, Self::from_code, Self::from_text, Self::Unknown)
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_text(s) {
            Self::Unknown if normalize_token(s) != "unknown" => {
                Err(format!("invalid delivery status: {s}"))
            }
            status => Ok(status),
        }
    }
}

/// Shared dispatch: numbers and digit-only strings go to the code table,
/// other strings to the synonym table, everything else to `unknown`.
fn map_status<S>(
    raw: Option<&Value>,
    from_code: fn(i64) -> S,
    from_text: fn(&str) -> S,
    unknown: S,
) -> S {
    match raw {
        Some(Value::Number(_)) => integer_code(raw).map_or(unknown, from_code),
        Some(Value::String(text)) => {
            integer_code(raw).map_or_else(|| from_text(text), from_code)
        }
        _ => unknown,
    }
}
