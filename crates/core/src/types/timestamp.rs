//! Validated timestamp that keeps the string the backend sent.

use core::fmt;
use std::cmp::Ordering;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Naive layouts accepted after RFC 3339. Naive values are read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A timestamp that parsed to a valid instant.
///
/// The original text is kept for display and round-tripping; ordering and
/// calendar bucketing use the parsed UTC instant.
///
/// ```
/// use tanawal_core::Timestamp;
///
/// let ts = Timestamp::parse("2025-03-14T09:26:53Z").unwrap();
/// assert_eq!(ts.as_str(), "2025-03-14T09:26:53Z");
/// assert!(ts.is_in_month(2025, 3));
///
/// assert!(Timestamp::parse("not a date").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Timestamp {
    raw: String,
    at: DateTime<Utc>,
}

impl Timestamp {
    /// Parse backend timestamp text.
    ///
    /// Accepts RFC 3339, zone-less ISO date-times (including the
    /// seven-digit fractions some backends emit) and bare dates. Returns
    /// `None` for anything else.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(Self::new(raw, dt.with_timezone(&Utc)));
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Some(Self::new(raw, naive.and_utc()));
            }
        }

        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self::new(raw, naive.and_utc()))
    }

    fn new(raw: &str, at: DateTime<Utc>) -> Self {
        Self {
            raw: raw.to_owned(),
            at,
        }
    }

    /// The text exactly as the backend sent it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed instant in UTC.
    #[must_use]
    pub const fn at(&self) -> DateTime<Utc> {
        self.at
    }

    /// Whether the instant falls in the given calendar month (UTC).
    #[must_use]
    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        self.at.year() == year && self.at.month() == month
    }

    /// Whether the instant falls in the same calendar month as `now` (UTC).
    #[must_use]
    pub fn is_same_month_as(&self, now: DateTime<Utc>) -> bool {
        self.is_in_month(now.year(), now.month())
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.at.cmp(&other.at)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}
