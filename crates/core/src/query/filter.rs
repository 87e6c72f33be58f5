//! Categorical filters, facets and ordering.

use core::cmp::Ordering;
use core::str::FromStr;
use std::collections::BTreeSet;

use super::Searchable;
use crate::entities::{Delivery, Food, Purchase, User};
use crate::types::{Availability, DeliveryStatus, OrderStatus, Timestamp, UserStatus};

/// The sentinel that disables a filter.
pub const ALL: &str = "all";

/// One categorical filter: everything, or records equal to one value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Selection<T> {
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: PartialEq> Selection<T> {
    /// Whether `value` passes this filter.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl Selection<String> {
    /// Case-insensitive exact match on trimmed text. A missing value only
    /// passes [`Selection::All`].
    #[must_use]
    pub fn admits_text(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => value.is_some_and(|v| {
                v.trim().to_lowercase() == wanted.trim().to_lowercase()
            }),
        }
    }
}

/// Parses `all` (any case) or blank input as [`Selection::All`], anything
/// else through `T::from_str`.
///
/// ```
/// use tanawal_core::query::Selection;
/// use tanawal_core::types::OrderStatus;
///
/// assert_eq!("ALL".parse::<Selection<OrderStatus>>(), Ok(Selection::All));
/// assert_eq!(
///     "in progress".parse::<Selection<OrderStatus>>(),
///     Ok(Selection::Only(OrderStatus::InProgress))
/// );
/// assert!("nonsense".parse::<Selection<OrderStatus>>().is_err());
/// ```
impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            Ok(Self::All)
        } else {
            trimmed.parse().map(Self::Only)
        }
    }
}

/// A search query plus categorical filters, combined with AND.
pub trait Filter<E: Searchable> {
    /// Free-text query; blank matches everything.
    fn query(&self) -> &str;

    /// Categorical part only.
    fn admits(&self, record: &E) -> bool;

    fn matches(&self, record: &E) -> bool {
        self.admits(record) && record.matches_query(self.query())
    }

    /// Matching records, in input order.
    fn apply<'a>(&self, records: &'a [E]) -> Vec<&'a E> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

// =============================================================================
// Per-entity filters
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodFilter {
    pub query: String,
    pub cuisine: Selection<String>,
    pub category: Selection<String>,
    pub availability: Selection<Availability>,
    /// Records rated below this are excluded.
    pub min_rating: Selection<f64>,
}

impl Filter<Food> for FoodFilter {
    fn query(&self) -> &str {
        &self.query
    }

    fn admits(&self, food: &Food) -> bool {
        self.cuisine.admits_text(food.cuisine.as_deref())
            && self.category.admits_text(food.category.as_deref())
            && self.availability.admits(&food.availability)
            && match self.min_rating {
                Selection::All => true,
                Selection::Only(min) => food.rating >= min,
            }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub query: String,
    pub status: Selection<UserStatus>,
}

impl Filter<User> for UserFilter {
    fn query(&self) -> &str {
        &self.query
    }

    fn admits(&self, user: &User) -> bool {
        self.status.admits(&user.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub query: String,
    pub status: Selection<OrderStatus>,
}

impl Filter<Purchase> for OrderFilter {
    fn query(&self) -> &str {
        &self.query
    }

    fn admits(&self, order: &Purchase) -> bool {
        self.status.admits(&order.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryFilter {
    pub query: String,
    pub status: Selection<DeliveryStatus>,
}

impl Filter<Delivery> for DeliveryFilter {
    fn query(&self) -> &str {
        &self.query
    }

    fn admits(&self, delivery: &Delivery) -> bool {
        self.status.admits(&delivery.status)
    }
}

// =============================================================================
// Facets
// =============================================================================

/// Distinct values for building food filter choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodFacets {
    /// Sorted, non-empty, distinct.
    pub cuisines: Vec<String>,
    /// Sorted, non-empty, distinct.
    pub categories: Vec<String>,
}

impl FoodFacets {
    pub fn collect<'a>(foods: impl IntoIterator<Item = &'a Food>) -> Self {
        let mut cuisines = BTreeSet::new();
        let mut categories = BTreeSet::new();
        for food in foods {
            if let Some(cuisine) = non_blank(food.cuisine.as_deref()) {
                cuisines.insert(cuisine.to_owned());
            }
            if let Some(category) = non_blank(food.category.as_deref()) {
                categories.insert(category.to_owned());
            }
        }
        Self {
            cuisines: cuisines.into_iter().collect(),
            categories: categories.into_iter().collect(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// =============================================================================
// Ordering
// =============================================================================

/// Stable sort, newest first. Records without a date go last.
pub fn newest_first<E>(records: &mut [E], date: impl Fn(&E) -> Option<&Timestamp>) {
    records.sort_by(|a, b| match (date(a), date(b)) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

impl Purchase {
    /// Sort orders by purchase date, newest first.
    pub fn sort_newest_first(orders: &mut [Self]) {
        newest_first(orders, |o| o.purchase_date.as_ref());
    }
}

impl Delivery {
    /// Sort deliveries by creation date, newest first.
    pub fn sort_newest_first(deliveries: &mut [Self]) {
        newest_first(deliveries, |d| d.created_at.as_ref());
    }
}
