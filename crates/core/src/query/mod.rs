//! Collection queries: full-text search, categorical filters, ordering and
//! KPI aggregates over normalized records.

pub mod filter;
pub mod kpi;

pub use filter::{
    DeliveryFilter, Filter, FoodFacets, FoodFilter, OrderFilter, Selection, UserFilter,
    newest_first,
};
pub use kpi::{DeliveryKpis, FoodKpis, OrderKpis, UserKpis};

/// A record with a fixed search projection.
pub trait Searchable {
    /// Fields that take part in search, in projection order.
    fn search_fields(&self) -> Vec<String>;

    /// Projection joined with spaces and lowercased.
    fn search_blob(&self) -> String {
        self.search_fields().join(" ").to_lowercase()
    }

    /// Case-insensitive substring match. A blank query matches everything.
    fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty() || self.search_blob().contains(&needle)
    }
}

/// Records whose projection contains `query`, in input order.
///
/// ```
/// use serde_json::json;
/// use tanawal_core::entities::{Entity, Food};
/// use tanawal_core::query::search;
///
/// let foods = vec![
///     Food::normalize(&json!({ "FoodID": 1, "FoodName": "Spicy Noodles" })),
///     Food::normalize(&json!({ "FoodID": 2, "FoodName": "Mild Rice" })),
/// ];
/// let hits = search(&foods, "sPiCy");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name.as_deref(), Some("Spicy Noodles"));
/// ```
pub fn search<'a, E: Searchable>(records: &'a [E], query: &str) -> Vec<&'a E> {
    records.iter().filter(|r| r.matches_query(query)).collect()
}
