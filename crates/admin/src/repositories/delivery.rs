//! Delivery API operations.

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use tanawal_core::normalize::{normalize_collection, unwrap_record};
use tanawal_core::{Delivery, DeliveryId, DeliveryStatus, Entity};

use super::to_body;
use crate::client::endpoints::delivery;
use crate::client::{ApiError, Transport};

/// Body for `PUT Deliveries/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryUpdate {
    pub status: DeliveryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fetch and normalize all deliveries.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport))]
pub async fn list<T: Transport>(transport: &T) -> Result<Vec<Delivery>, ApiError> {
    let payload = transport.execute(delivery::list()).await?;
    Ok(normalize_collection(&payload))
}

/// Fetch one delivery. `None` when the payload holds no record.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport))]
pub async fn get<T: Transport>(transport: &T, id: DeliveryId) -> Result<Option<Delivery>, ApiError> {
    let payload = transport.execute(delivery::by_id(id)).await?;
    let record = unwrap_record(&payload);
    Ok(record.is_object().then(|| Delivery::normalize(record)))
}

/// Update a delivery.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport, update), fields(status = %update.status))]
pub async fn update<T: Transport>(
    transport: &T,
    id: DeliveryId,
    update: &DeliveryUpdate,
) -> Result<Value, ApiError> {
    transport.execute(delivery::update(id, to_body(update)?)).await
}

/// Cancel a delivery.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport))]
pub async fn cancel<T: Transport>(transport: &T, id: DeliveryId) -> Result<Value, ApiError> {
    transport.execute(delivery::cancel(id)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_delivery_update_body() {
        let body = to_body(&DeliveryUpdate {
            status: DeliveryStatus::PickedUp,
            notes: Some("Gate 2".to_string()),
        });
        assert_eq!(
            body.ok(),
            Some(json!({ "status": "picked_up", "notes": "Gate 2" }))
        );
    }
}
