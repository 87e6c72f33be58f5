//! Food API operations.

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use tanawal_core::normalize::normalize_collection;
use tanawal_core::{Food, FoodId};

use super::to_body;
use crate::client::endpoints::food;
use crate::client::{ApiError, Transport};

/// Body for toggling availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityChange {
    pub id: FoodId,
    pub is_available: bool,
}

/// Body for adding or updating a food item. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodInput {
    #[serde(rename = "foodId", skip_serializing_if = "Option::is_none")]
    pub id: Option<FoodId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Fetch and normalize the admin food list.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport))]
pub async fn list<T: Transport>(transport: &T) -> Result<Vec<Food>, ApiError> {
    let payload = transport.execute(food::list()).await?;
    Ok(normalize_collection(&payload))
}

/// Set a food item's availability.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport))]
pub async fn set_availability<T: Transport>(
    transport: &T,
    id: FoodId,
    is_available: bool,
) -> Result<Value, ApiError> {
    let body = to_body(&AvailabilityChange { id, is_available })?;
    transport.execute(food::update(body)).await
}

/// Create a food item.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport, input), fields(name = ?input.food_name))]
pub async fn add<T: Transport>(transport: &T, input: &FoodInput) -> Result<Value, ApiError> {
    transport.execute(food::add(to_body(input)?)).await
}

/// Update a food item.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport, input), fields(id = ?input.id))]
pub async fn update<T: Transport>(transport: &T, input: &FoodInput) -> Result<Value, ApiError> {
    transport.execute(food::update(to_body(input)?)).await
}

/// Delete a food item.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport))]
pub async fn delete<T: Transport>(transport: &T, id: FoodId) -> Result<Value, ApiError> {
    transport.execute(food::delete(id)).await
}
