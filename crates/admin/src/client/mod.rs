//! HTTP transport for the Tanawal API gateway.
//!
//! [`Transport`] is the seam between views and the network: it takes an
//! [`ApiRequest`] and hands back the raw JSON payload. [`ApiClient`] is the
//! reqwest implementation; tests plug in an in-memory one.

pub mod endpoints;

use std::future::Future;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

pub use endpoints::{ApiRequest, Method, Service};

use crate::config::ApiConfig;

/// Header carrying the ID token for the user service (`X-User-IdToken`).
const ID_TOKEN_HEADER: &str = "x-user-idtoken";

/// Errors from an API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The gateway rejected our credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Non-success status other than 401.
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Request body could not be encoded.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Something that can execute API requests.
pub trait Transport: Send + Sync {
    /// Execute `request` and return the decoded payload.
    fn execute(&self, request: ApiRequest) -> impl Future<Output = Result<Value, ApiError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn execute(&self, request: ApiRequest) -> impl Future<Output = Result<Value, ApiError>> + Send {
        (**self).execute(request)
    }
}

/// reqwest-backed API client.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a client for `config`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            inner: Arc::new(ApiClientInner { client, config }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    fn auth_headers(&self, service: Service) -> Result<HeaderMap, ApiError> {
        let config = &self.inner.config;
        let mut headers = HeaderMap::new();
        if service.uses_id_token() {
            if let Some(token) = &config.id_token {
                headers.insert(HeaderName::from_static(ID_TOKEN_HEADER), header_value(token)?);
            }
        } else if let Some(token) = &config.access_token {
            let bearer = SecretString::from(format!("Bearer {}", token.expose_secret()));
            headers.insert(AUTHORIZATION, header_value(&bearer)?);
        }
        Ok(headers)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl Transport for ApiClient {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = request.url(&self.inner.config)?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .inner
            .client
            .request(method, url)
            .headers(self.auth_headers(request.service)?);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!(status = status.as_u16(), "API rejected credentials");
            return Err(ApiError::Unauthorized(text));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        tracing::debug!(status = status.as_u16(), bytes = text.len(), "API response");
        Ok(decode_body(&text))
    }
}

/// Decode a response body. Empty bodies are `null`; bodies that are not
/// JSON are kept as a JSON string.
#[must_use]
pub fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn header_value(secret: &SecretString) -> Result<HeaderValue, ApiError> {
    let mut value = HeaderValue::from_str(secret.expose_secret())
        .map_err(|e| ApiError::Unauthorized(format!("token is not a valid header value: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}
