//! User API operations.

use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use tanawal_core::normalize::{RawRecord, normalize_collection, unwrap_list};
use tanawal_core::{AddressId, User, UserId};

use super::to_body;
use crate::client::endpoints::user;
use crate::client::{ApiError, Transport};

/// Body for `ChangeUserStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub block: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acted_by_user_id: Option<UserId>,
}

/// Body for `UpdateFoodUser`. Unset fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
}

/// Body for `AddAddress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    pub user_id: UserId,
    pub address: String,
}

/// A saved user address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub id: Option<AddressId>,
    pub address: Option<String>,
}

const ADDRESS_ID_KEYS: &[&str] = &["AddressID", "addressId", "id"];
const ADDRESS_TEXT_KEYS: &[&str] = &["Address", "address", "FullAddress", "fullAddress"];

impl Address {
    /// Accepts an address object or a bare string.
    #[must_use]
    pub fn normalize(raw: &Value) -> Self {
        if let Value::String(text) = raw {
            let trimmed = text.trim();
            return Self {
                id: None,
                address: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            };
        }
        let record = RawRecord::new(raw);
        Self {
            id: record.integer(ADDRESS_ID_KEYS).map(AddressId::new),
            address: record.text(ADDRESS_TEXT_KEYS),
        }
    }
}

/// Fetch and normalize all users.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport))]
pub async fn list<T: Transport>(transport: &T) -> Result<Vec<User>, ApiError> {
    let payload = transport.execute(user::list()).await?;
    Ok(normalize_collection(&payload))
}

/// Block or unblock a user.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport, change), fields(block = change.block))]
pub async fn change_status<T: Transport>(
    transport: &T,
    id: UserId,
    change: &StatusChange,
) -> Result<Value, ApiError> {
    transport.execute(user::change_status(id, to_body(change)?)).await
}

/// Update profile fields.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport, update), fields(id = %update.user_id))]
pub async fn update<T: Transport>(transport: &T, update: &UserUpdate) -> Result<Value, ApiError> {
    transport.execute(user::update(to_body(update)?)).await
}

/// Delete a user.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport))]
pub async fn delete<T: Transport>(transport: &T, id: UserId) -> Result<Value, ApiError> {
    transport.execute(user::delete(id)).await
}

/// Save an address for a user.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport, input), fields(id = %input.user_id))]
pub async fn add_address<T: Transport>(
    transport: &T,
    input: &AddressInput,
) -> Result<Value, ApiError> {
    transport.execute(user::add_address(to_body(input)?)).await
}

/// Addresses saved for a user. Unrecognized payloads yield an empty list.
///
/// # Errors
///
/// Returns `ApiError` if the request fails.
#[instrument(skip(transport))]
pub async fn addresses<T: Transport>(transport: &T, id: UserId) -> Result<Vec<Address>, ApiError> {
    let payload = transport.execute(user::addresses(id)).await?;
    Ok(unwrap_list(&payload, "Addresses")
        .iter()
        .map(Address::normalize)
        .filter(|a| a.id.is_some() || a.address.is_some())
        .collect())
}
