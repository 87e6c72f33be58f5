//! Food purchases (orders).

use serde::Serialize;
use serde_json::Value;

use super::Entity;
use crate::normalize::RawRecord;
use crate::query::Searchable;
use crate::types::{FoodId, OrderStatus, PaymentMethod, PurchaseId, Timestamp};

/// Field spellings seen across API versions, highest priority first.
pub mod keys {
    pub const ID: &[&str] = &["PurchaseID", "purchaseId", "id"];
    pub const FOOD_ID: &[&str] = &["FoodID", "foodId"];
    pub const FOOD_NAME: &[&str] = &["FoodName", "foodName"];
    pub const FINAL_PRICE: &[&str] = &["FinalPrice", "finalPrice"];
    pub const IS_CUSTOMIZED: &[&str] = &["IsCustomized", "isCustomized"];
    pub const DESCRIPTION: &[&str] = &["Description", "description"];
    pub const NOTE: &[&str] = &["Note", "note"];
    pub const RATING: &[&str] = &["Rating", "rating"];
    pub const STATUS: &[&str] = &["Status", "status"];
    pub const PAYMENT_METHOD: &[&str] = &["PaymentMethod", "paymentMethod"];
    pub const PURCHASE_DATE: &[&str] = &["PurchaseDate", "purchaseDate"];
    pub const DATE_ADDED: &[&str] = &["DateAdded", "dateAdded"];
    pub const DATE_UPDATED: &[&str] = &["DateUpdated", "dateUpdated"];
    pub const ADDED_BY: &[&str] = &["AddedBy", "addedBy"];
    pub const UPDATED_BY: &[&str] = &["UpdatedBy", "updatedBy"];
}

/// Canonical purchase record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub food_id: FoodId,
    pub food_name: Option<String>,
    /// `0` when missing.
    pub final_price: f64,
    pub is_customized: bool,
    pub description: Option<String>,
    pub note: Option<String>,
    /// `0` when missing.
    pub rating: f64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub purchase_date: Option<Timestamp>,
    pub date_added: Option<Timestamp>,
    pub date_updated: Option<Timestamp>,
    pub added_by: Option<String>,
    pub updated_by: Option<String>,
}

impl Entity for Purchase {
    type Id = PurchaseId;
    const COLLECTION_KEY: &'static str = "FoodPurchase";
    const KIND: &'static str = "order";

    fn normalize(raw: &Value) -> Self {
        let record = RawRecord::new(raw);
        Self {
            id: PurchaseId::new(record.integer(keys::ID).unwrap_or_default()),
            food_id: FoodId::new(record.integer(keys::FOOD_ID).unwrap_or_default()),
            food_name: record.text(keys::FOOD_NAME),
            final_price: record.number(keys::FINAL_PRICE).unwrap_or(0.0),
            is_customized: record.tri_state(keys::IS_CUSTOMIZED).is_true(),
            description: record.text(keys::DESCRIPTION),
            note: record.text(keys::NOTE),
            rating: record.number(keys::RATING).unwrap_or(0.0),
            status: record.get(keys::STATUS),
            payment_method: record.get(keys::PAYMENT_METHOD),
            purchase_date: record.date(keys::PURCHASE_DATE),
            date_added: record.date(keys::DATE_ADDED),
            date_updated: record.date(keys::DATE_UPDATED),
            added_by: record.text(keys::ADDED_BY),
            updated_by: record.text(keys::UPDATED_BY),
        }
    }

    fn id(&self) -> PurchaseId {
        self.id
    }
}

impl Searchable for Purchase {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.food_name.clone().unwrap_or_default(),
            self.payment_method.label(),
            self.status.as_str().to_owned(),
            self.added_by.clone().unwrap_or_default(),
            self.updated_by.clone().unwrap_or_default(),
            self.description.clone().unwrap_or_default(),
            self.note.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_order() {
        let order = Purchase::normalize(&json!({
            "PurchaseID": 31,
            "FoodID": 4,
            "FoodName": "Biryani",
            "FinalPrice": "650.00",
            "IsCustomized": "yes",
            "Status": 1,
            "PaymentMethod": 3,
            "PurchaseDate": "2025-07-02T18:30:00",
            "AddedBy": "ops@tanawal.pk",
        }));
        assert_eq!(order.id, PurchaseId::new(31));
        assert_eq!(order.food_id, FoodId::new(4));
        assert!((order.final_price - 650.0).abs() < f64::EPSILON);
        assert!(order.is_customized);
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.payment_method, PaymentMethod::Cash);
        assert!(order.purchase_date.is_some());
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let order = Purchase::normalize(&json!({ "purchaseId": 2 }));
        assert_eq!(order.id, PurchaseId::new(2));
        assert!(order.final_price.abs() < f64::EPSILON);
        assert!(order.rating.abs() < f64::EPSILON);
        assert!(!order.is_customized);
        assert_eq!(order.status, OrderStatus::Unknown);
        assert_eq!(order.payment_method, PaymentMethod::Unspecified);
        assert_eq!(order.payment_method.label(), "—");
    }

    #[test]
    fn test_textual_status_and_payment() {
        let order = Purchase::normalize(&json!({
            "status": "  Completed ",
            "paymentMethod": "credit_card",
        }));
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.payment_method.label(), "Credit Card");
    }

    #[test]
    fn test_unknown_payment_code_is_labelled() {
        let order = Purchase::normalize(&json!({ "PaymentMethod": 9 }));
        assert_eq!(order.payment_method.label(), "Method 9");
    }

    #[test]
    fn test_search_projection() {
        let order = Purchase::normalize(&json!({
            "PurchaseID": 5,
            "FoodName": "Nihari",
            "Status": "processing",
            "PaymentMethod": 1,
            "Note": "extra naan",
        }));
        assert!(order.matches_query("in_progress"));
        assert!(order.matches_query("paypal"));
        assert!(order.matches_query("NAAN"));
        assert!(!order.matches_query("delivered"));
    }
}
