//! Dashboard KPIs.
//!
//! Every aggregate takes any iterator of record references, so it works on a
//! full collection or on the output of a filter. "This month" means the UTC
//! calendar month of the supplied `now`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::{Delivery, Food, Purchase, User};
use crate::types::{DeliveryStatus, OrderStatus, Timestamp, UserStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FoodKpis {
    pub total: usize,
    pub available: usize,
    pub new_this_month: usize,
    /// Mean over items with a price above zero; `0` when there are none.
    pub average_price: f64,
}

impl FoodKpis {
    pub fn compute<'a>(foods: impl IntoIterator<Item = &'a Food>, now: DateTime<Utc>) -> Self {
        let mut kpis = Self::default();
        let mut prices = Mean::default();
        for food in foods {
            kpis.total += 1;
            if food.availability.is_available() {
                kpis.available += 1;
            }
            if created_in_month(food.created_at.as_ref(), now) {
                kpis.new_this_month += 1;
            }
            if let Some(price) = food.price
                && price > 0.0
            {
                prices.add(price);
            }
        }
        kpis.average_price = prices.value();
        kpis
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserKpis {
    pub total: usize,
    pub active: usize,
    pub blocked: usize,
    pub new_this_month: usize,
}

impl UserKpis {
    pub fn compute<'a>(users: impl IntoIterator<Item = &'a User>, now: DateTime<Utc>) -> Self {
        let mut kpis = Self::default();
        for user in users {
            kpis.total += 1;
            match user.status {
                UserStatus::Active => kpis.active += 1,
                UserStatus::Blocked => kpis.blocked += 1,
                UserStatus::Unknown => {}
            }
            if created_in_month(user.created_at.as_ref(), now) {
                kpis.new_this_month += 1;
            }
        }
        kpis
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OrderKpis {
    pub total: usize,
    pub delivered: usize,
    /// Pending plus in progress.
    pub awaiting: usize,
    /// Mean final price over all orders; `0` for an empty set.
    pub average_order_value: f64,
}

impl OrderKpis {
    pub fn compute<'a>(orders: impl IntoIterator<Item = &'a Purchase>) -> Self {
        let mut kpis = Self::default();
        let mut values = Mean::default();
        for order in orders {
            kpis.total += 1;
            if order.status == OrderStatus::Delivered {
                kpis.delivered += 1;
            }
            if order.status.is_awaiting() {
                kpis.awaiting += 1;
            }
            values.add(order.final_price);
        }
        kpis.average_order_value = values.value();
        kpis
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DeliveryKpis {
    pub total: usize,
    pub delivered: usize,
    /// Pending plus assigned.
    pub pending: usize,
    /// Picked up plus in transit.
    pub in_transit: usize,
    /// Sum of fees over delivered records.
    pub revenue: f64,
}

impl DeliveryKpis {
    pub fn compute<'a>(deliveries: impl IntoIterator<Item = &'a Delivery>) -> Self {
        let mut kpis = Self::default();
        for delivery in deliveries {
            kpis.total += 1;
            if delivery.status == DeliveryStatus::Delivered {
                kpis.delivered += 1;
                kpis.revenue += delivery.fee;
            }
            if delivery.status.is_awaiting_pickup() {
                kpis.pending += 1;
            }
            if delivery.status.is_en_route() {
                kpis.in_transit += 1;
            }
        }
        kpis
    }
}

fn created_in_month(created: Option<&Timestamp>, now: DateTime<Utc>) -> bool {
    created.is_some_and(|ts| ts.is_same_month_as(now))
}

#[derive(Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Entity;
    use chrono::TimeZone;
    use serde_json::{Value, json};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).single().unwrap_or_default()
    }

    fn normalize_all<E: Entity>(raw: &[Value]) -> Vec<E> {
        raw.iter().map(E::normalize).collect()
    }

    #[test]
    fn test_food_kpis() {
        let foods: Vec<Food> = normalize_all(&[
            json!({ "FoodID": 1, "Price": 100, "IsAvailable": true, "DateAdded": "2025-07-01T00:00:00Z" }),
            json!({ "FoodID": 2, "Price": 300, "IsAvailable": "no", "DateAdded": "2025-06-30T23:59:59Z" }),
            json!({ "FoodID": 3, "Price": 0, "IsAvailable": "yes", "DateAdded": "garbage" }),
            json!({ "FoodID": 4 }),
        ]);
        let kpis = FoodKpis::compute(&foods, now());
        assert_eq!(kpis.total, 4);
        assert_eq!(kpis.available, 2);
        assert_eq!(kpis.new_this_month, 1);
        assert!((kpis.average_price - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_food_kpis_without_prices() {
        let foods: Vec<Food> = normalize_all(&[json!({ "Price": 0 })]);
        let kpis = FoodKpis::compute(&foods, now());
        assert!(kpis.average_price.abs() < f64::EPSILON);
    }

    #[test]
    fn test_user_kpis() {
        let users: Vec<User> = normalize_all(&[
            json!({ "Status": true, "DateAdded": "2025-07-10" }),
            json!({ "Status": "blocked" }),
            json!({ "Status": "who knows" }),
        ]);
        let kpis = UserKpis::compute(&users, now());
        assert_eq!(
            kpis,
            UserKpis { total: 3, active: 1, blocked: 1, new_this_month: 1 }
        );
    }

    #[test]
    fn test_order_kpis() {
        let orders: Vec<Purchase> = normalize_all(&[
            json!({ "Status": 0, "FinalPrice": 100 }),
            json!({ "Status": "processing", "FinalPrice": 200 }),
            json!({ "Status": "paid", "FinalPrice": 300 }),
            json!({ "Status": "refunded" }),
        ]);
        let kpis = OrderKpis::compute(&orders);
        assert_eq!(kpis.total, 4);
        assert_eq!(kpis.delivered, 1);
        assert_eq!(kpis.awaiting, 2);
        assert!((kpis.average_order_value - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_delivery_kpis() {
        let deliveries: Vec<Delivery> = normalize_all(&[
            json!({ "Status": "pending", "DeliveryFee": 50 }),
            json!({ "Status": "assigned" }),
            json!({ "Status": "picked_up" }),
            json!({ "Status": "in transit" }),
            json!({ "Status": "delivered", "DeliveryFee": 150 }),
            json!({ "Status": 4, "DeliveryFee": "100" }),
            json!({ "Status": "failed", "DeliveryFee": 999 }),
        ]);
        let kpis = DeliveryKpis::compute(&deliveries);
        assert_eq!(kpis.total, 7);
        assert_eq!(kpis.delivered, 2);
        assert_eq!(kpis.pending, 2);
        assert_eq!(kpis.in_transit, 2);
        assert!((kpis.revenue - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_kpis_over_filtered_subset() {
        let orders: Vec<Purchase> = normalize_all(&[
            json!({ "Status": 1, "FinalPrice": 10 }),
            json!({ "Status": 0, "FinalPrice": 20 }),
        ]);
        let pending: Vec<&Purchase> = orders.iter().filter(|o| o.status.is_awaiting()).collect();
        let kpis = OrderKpis::compute(pending);
        assert_eq!(kpis.total, 1);
        assert!((kpis.average_order_value - 20.0).abs() < f64::EPSILON);
    }
}
