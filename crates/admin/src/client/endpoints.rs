//! Endpoint table for the Tanawal API gateway.
//!
//! Every request targets `{base_url}{service prefix}/{path}`. The user
//! service authenticates with an ID token header; the others take a bearer
//! token.

use serde_json::Value;
use url::Url;

use tanawal_core::{DeliveryId, FoodId, PurchaseId, UserId};

use super::ApiError;
use crate::config::ApiConfig;

/// Backend service behind the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    User,
    Food,
    Purchase,
    Delivery,
}

impl Service {
    /// Gateway prefix for this service.
    #[must_use]
    pub fn prefix(self, config: &ApiConfig) -> &str {
        match self {
            Self::User => &config.prefixes.user,
            Self::Food => &config.prefixes.food,
            Self::Purchase => &config.prefixes.purchase,
            Self::Delivery => &config.prefixes.delivery,
        }
    }

    /// Whether requests carry `X-User-IdToken` instead of a bearer token.
    #[must_use]
    pub const fn uses_id_token(self) -> bool {
        matches!(self, Self::User)
    }
}

/// HTTP method of an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One API call: method, service-relative path, query and optional body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub service: Service,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, service: Service, path: impl Into<String>) -> Self {
        Self {
            method,
            service,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(service: Service, path: impl Into<String>) -> Self {
        Self::new(Method::Get, service, path)
    }

    #[must_use]
    pub fn post(service: Service, path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, service, path).with_body(body)
    }

    #[must_use]
    pub fn put(service: Service, path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, service, path).with_body(body)
    }

    #[must_use]
    pub fn delete(service: Service, path: impl Into<String>) -> Self {
        Self::new(Method::Delete, service, path)
    }

    #[must_use]
    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Absolute URL under `config`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Url` if the prefix or path produce an invalid URL.
    pub fn url(&self, config: &ApiConfig) -> Result<Url, ApiError> {
        let prefix = self.service.prefix(config).trim_matches('/');
        let mut url = config
            .base_url
            .join(&format!("{prefix}/"))?
            .join(self.path.trim_start_matches('/'))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

// =============================================================================
// Endpoint table
// =============================================================================

pub mod user {
    use super::{ApiRequest, Service, UserId, Value};

    #[must_use]
    pub fn list() -> ApiRequest {
        ApiRequest::get(Service::User, "GetUserList")
    }

    #[must_use]
    pub fn update(body: Value) -> ApiRequest {
        ApiRequest::put(Service::User, "UpdateFoodUser", body)
    }

    #[must_use]
    pub fn delete(id: UserId) -> ApiRequest {
        ApiRequest::delete(Service::User, format!("DeleteFoodUser/{id}"))
    }

    #[must_use]
    pub fn change_status(id: UserId, body: Value) -> ApiRequest {
        ApiRequest::put(Service::User, "ChangeUserStatus", body).with_query("UserId", id)
    }

    #[must_use]
    pub fn add_address(body: Value) -> ApiRequest {
        ApiRequest::post(Service::User, "AddAddress", body)
    }

    #[must_use]
    pub fn addresses(id: UserId) -> ApiRequest {
        ApiRequest::get(Service::User, format!("GetAddressByUserId/{id}"))
    }
}

pub mod food {
    use super::{ApiRequest, FoodId, Service, Value};

    #[must_use]
    pub fn list() -> ApiRequest {
        ApiRequest::get(Service::Food, "GetFoodList").with_query("admin", true)
    }

    #[must_use]
    pub fn add(body: Value) -> ApiRequest {
        ApiRequest::post(Service::Food, "AddFoodList", body)
    }

    #[must_use]
    pub fn update(body: Value) -> ApiRequest {
        ApiRequest::put(Service::Food, "UpdateFoodList", body)
    }

    #[must_use]
    pub fn delete(id: FoodId) -> ApiRequest {
        ApiRequest::delete(Service::Food, format!("DeleteFoodList/{id}"))
    }
}

pub mod purchase {
    use super::{ApiRequest, PurchaseId, Service, Value};

    #[must_use]
    pub fn list() -> ApiRequest {
        ApiRequest::get(Service::Purchase, "GetFoodPurchaseList")
    }

    #[must_use]
    pub fn by_id(id: PurchaseId) -> ApiRequest {
        ApiRequest::get(Service::Purchase, format!("GetOrderById/{id}"))
    }

    #[must_use]
    pub fn update(body: Value) -> ApiRequest {
        ApiRequest::put(Service::Purchase, "UpdateOrder", body)
    }

    #[must_use]
    pub fn delete(id: PurchaseId) -> ApiRequest {
        ApiRequest::delete(Service::Purchase, format!("DeleteOrder/{id}"))
    }
}

pub mod delivery {
    use super::{ApiRequest, DeliveryId, Service, Value};

    #[must_use]
    pub fn list() -> ApiRequest {
        ApiRequest::get(Service::Delivery, "Deliveries")
    }

    #[must_use]
    pub fn by_id(id: DeliveryId) -> ApiRequest {
        ApiRequest::get(Service::Delivery, format!("Deliveries/{id}"))
    }

    #[must_use]
    pub fn update(id: DeliveryId, body: Value) -> ApiRequest {
        ApiRequest::put(Service::Delivery, format!("Deliveries/{id}"), body)
    }

    #[must_use]
    pub fn cancel(id: DeliveryId) -> ApiRequest {
        ApiRequest::delete(Service::Delivery, format!("Deliveries/{id}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> ApiConfig {
        ApiConfig::new("https://gateway.example.com/").unwrap()
    }

    #[test]
    fn test_urls_per_service() {
        let config = config();
        assert_eq!(
            food::list().url(&config).unwrap().as_str(),
            "https://gateway.example.com/food-management/GetFoodList?admin=true"
        );
        assert_eq!(
            user::delete(UserId::new(5)).url(&config).unwrap().as_str(),
            "https://gateway.example.com/FoodUserManagement/DeleteFoodUser/5"
        );
        assert_eq!(
            purchase::by_id(PurchaseId::new(9)).url(&config).unwrap().as_str(),
            "https://gateway.example.com/food-purchase-management/GetOrderById/9"
        );
        assert_eq!(
            delivery::cancel(DeliveryId::new(3)).url(&config).unwrap().as_str(),
            "https://gateway.example.com/food-delivery-management/Deliveries/3"
        );
    }

    #[test]
    fn test_change_status_puts_id_in_query() {
        let request = user::change_status(UserId::new(12), json!({ "block": true }));
        assert_eq!(request.method, Method::Put);
        assert_eq!(
            request.url(&config()).unwrap().as_str(),
            "https://gateway.example.com/FoodUserManagement/ChangeUserStatus?UserId=12"
        );
        assert_eq!(request.body, Some(json!({ "block": true })));
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let config = ApiConfig::new("http://localhost:7071/api").unwrap();
        assert_eq!(
            food::delete(FoodId::new(1)).url(&config).unwrap().as_str(),
            "http://localhost:7071/api/food-management/DeleteFoodList/1"
        );
    }

    #[test]
    fn test_only_user_service_uses_id_token() {
        assert!(Service::User.uses_id_token());
        assert!(!Service::Food.uses_id_token());
        assert!(!Service::Purchase.uses_id_token());
        assert!(!Service::Delivery.uses_id_token());
    }
}
