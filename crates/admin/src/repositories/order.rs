//! Purchase (order) API operations.

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use tanawal_core::normalize::{normalize_collection, unwrap_record};
use tanawal_core::{Entity, OrderStatus, Purchase, PurchaseId};

use super::to_body;
use crate::client::endpoints::purchase;
use crate::client::{ApiError, Transport};

/// Body for `UpdateOrder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub purchase_id: PurchaseId,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Fetch and normalize all orders.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport))]
pub async fn list<T: Transport>(transport: &T) -> Result<Vec<Purchase>, ApiError> {
    let payload = transport.execute(purchase::list()).await?;
    Ok(normalize_collection(&payload))
}

/// Fetch one order. `None` when the payload holds no record.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport))]
pub async fn get<T: Transport>(transport: &T, id: PurchaseId) -> Result<Option<Purchase>, ApiError> {
    let payload = transport.execute(purchase::by_id(id)).await?;
    let record = unwrap_record(&payload);
    Ok(record.is_object().then(|| Purchase::normalize(record)))
}

/// Change an order's status.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport, update), fields(id = %update.purchase_id, status = %update.status))]
pub async fn update<T: Transport>(transport: &T, update: &OrderUpdate) -> Result<Value, ApiError> {
    transport.execute(purchase::update(to_body(update)?)).await
}

/// Delete an order.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport))]
pub async fn delete<T: Transport>(transport: &T, id: PurchaseId) -> Result<Value, ApiError> {
    transport.execute(purchase::delete(id)).await
}
