//! Deliveries of placed orders.

use serde::Serialize;
use serde_json::Value;

use super::Entity;
use crate::normalize::RawRecord;
use crate::query::Searchable;
use crate::types::{DeliveryId, DeliveryStatus, PurchaseId, Timestamp};

/// Field spellings seen across API versions, highest priority first.
pub mod keys {
    pub const ID: &[&str] = &["DeliveryID", "deliveryId", "id"];
    pub const ORDER_ID: &[&str] = &["OrderID", "orderId"];
    pub const CUSTOMER_NAME: &[&str] = &["CustomerName", "customerName"];
    pub const CUSTOMER_EMAIL: &[&str] = &["CustomerEmail", "customerEmail"];
    pub const CUSTOMER_PHONE: &[&str] = &["CustomerPhone", "customerPhone"];
    pub const ADDRESS: &[&str] = &["DeliveryAddress", "deliveryAddress"];
    pub const STATUS: &[&str] = &["Status", "status"];
    pub const ESTIMATED_TIME: &[&str] = &["EstimatedDeliveryTime", "estimatedDeliveryTime"];
    pub const ACTUAL_TIME: &[&str] = &["ActualDeliveryTime", "actualDeliveryTime"];
    pub const FEE: &[&str] = &["DeliveryFee", "deliveryFee"];
    pub const DRIVER_NAME: &[&str] = &["DriverName", "driverName"];
    pub const DRIVER_PHONE: &[&str] = &["DriverPhone", "driverPhone"];
    pub const NOTES: &[&str] = &["Notes", "notes"];
    pub const CREATED: &[&str] = &["CreatedAt", "createdAt"];
    pub const UPDATED: &[&str] = &["UpdatedAt", "updatedAt"];
}

/// Shown and searched when the payload names no customer.
pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";

/// Canonical delivery record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delivery {
    pub id: DeliveryId,
    pub order_id: PurchaseId,
    /// [`UNKNOWN_CUSTOMER`] when missing.
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub address: Option<String>,
    pub status: DeliveryStatus,
    pub estimated_delivery_time: Option<Timestamp>,
    pub actual_delivery_time: Option<Timestamp>,
    /// `0` when missing.
    pub fee: f64,
    pub driver_name: Option<String>,
    pub driver_phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl Delivery {
    /// Whether any driver contact detail is known.
    #[must_use]
    pub const fn has_driver(&self) -> bool {
        self.driver_name.is_some() || self.driver_phone.is_some()
    }
}

impl Entity for Delivery {
    type Id = DeliveryId;
    const COLLECTION_KEY: &'static str = "Deliveries";
    const KIND: &'static str = "delivery";

    fn normalize(raw: &Value) -> Self {
        let record = RawRecord::new(raw);
        Self {
            id: DeliveryId::new(record.integer(keys::ID).unwrap_or_default()),
            order_id: PurchaseId::new(record.integer(keys::ORDER_ID).unwrap_or_default()),
            customer_name: record
                .text(keys::CUSTOMER_NAME)
                .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_owned()),
            customer_email: record.text(keys::CUSTOMER_EMAIL),
            customer_phone: record.text(keys::CUSTOMER_PHONE),
            address: record.text(keys::ADDRESS),
            status: record.get(keys::STATUS),
            estimated_delivery_time: record.date(keys::ESTIMATED_TIME),
            actual_delivery_time: record.date(keys::ACTUAL_TIME),
            fee: record.number(keys::FEE).unwrap_or(0.0),
            driver_name: record.text(keys::DRIVER_NAME),
            driver_phone: record.text(keys::DRIVER_PHONE),
            notes: record.text(keys::NOTES),
            created_at: record.date(keys::CREATED),
            updated_at: record.date(keys::UPDATED),
        }
    }

    fn id(&self) -> DeliveryId {
        self.id
    }
}

impl Searchable for Delivery {
    fn search_fields(&self) -> Vec<String> {
        [
            Some(self.id.to_string()),
            Some(self.order_id.to_string()),
            Some(self.customer_name.clone()),
            self.customer_email.clone(),
            self.customer_phone.clone(),
            self.address.clone(),
            Some(self.status.as_str().to_owned()),
            self.driver_name.clone(),
            self.driver_phone.clone(),
            self.notes.clone(),
        ]
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect()
    }
}
