//! Typed API operations per entity.
//!
//! Each function takes any [`Transport`](crate::client::Transport), issues
//! one request from the endpoint table, and normalizes what comes back.
//! Request bodies are camelCase JSON.

pub mod delivery;
pub mod food;
pub mod order;
pub mod user;

pub use delivery::DeliveryUpdate;
pub use food::{AvailabilityChange, FoodInput};
pub use order::OrderUpdate;
pub use user::{Address, AddressInput, StatusChange, UserUpdate};

use serde::Serialize;
use serde_json::Value;

use crate::client::ApiError;

/// Encode a request body.
pub(crate) fn to_body<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(body)?)
}
