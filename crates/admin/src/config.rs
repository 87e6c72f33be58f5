//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional (API)
//! - `TANAWAL_API_BASE_URL` - API gateway root (default: `https://tanawal-apim.azure-api.net/`)
//! - `TANAWAL_USER_PREFIX` - User service prefix (default: `FoodUserManagement`)
//! - `TANAWAL_FOOD_PREFIX` - Food service prefix (default: `food-management`)
//! - `TANAWAL_PURCHASE_PREFIX` - Purchase service prefix (default: `food-purchase-management`)
//! - `TANAWAL_DELIVERY_PREFIX` - Delivery service prefix (default: `food-delivery-management`)
//! - `TANAWAL_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 10)
//!
//! ## Optional (Credentials)
//! - `TANAWAL_ACCESS_TOKEN` - Bearer token for food, purchase and delivery services
//! - `TANAWAL_ID_TOKEN` - ID token sent as `X-User-IdToken` to the user service
//! - `TANAWAL_ADMIN_USER_ID` - Numeric id of the acting admin, sent as `actedByUserId`
//!
//! ## Optional (Sentry)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - e.g. "development", "production"
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use tanawal_core::UserId;

const DEFAULT_BASE_URL: &str = "https://tanawal-apim.azure-api.net/";
const DEFAULT_TIMEOUT_SECS: &str = "10";

/// Placeholder fragments that suggest a token was never filled in.
const PLACEHOLDER_PATTERNS: &[&str] = &["your-", "changeme", "replace", "placeholder", "xxx", "todo"];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// API gateway configuration
    pub api: ApiConfig,
    /// Acting admin, recorded on status changes
    pub admin_user_id: Option<UserId>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

/// Service prefixes under the gateway root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServicePrefixes {
    pub user: String,
    pub food: String,
    pub purchase: String,
    pub delivery: String,
}

impl Default for ServicePrefixes {
    fn default() -> Self {
        Self {
            user: "FoodUserManagement".to_string(),
            food: "food-management".to_string(),
            purchase: "food-purchase-management".to_string(),
            delivery: "food-delivery-management".to_string(),
        }
    }
}

/// API gateway configuration.
///
/// Implements `Debug` manually to redact the tokens.
#[derive(Clone)]
pub struct ApiConfig {
    /// Gateway root, always ending in `/`
    pub base_url: Url,
    pub prefixes: ServicePrefixes,
    pub timeout: Duration,
    /// Bearer token for non-user services
    pub access_token: Option<SecretString>,
    /// ID token for the user service
    pub id_token: Option<SecretString>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |token: &Option<SecretString>| token.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("prefixes", &self.prefixes)
            .field("timeout", &self.timeout)
            .field("access_token", &redact(&self.access_token))
            .field("id_token", &redact(&self.id_token))
            .finish()
    }
}

impl ApiConfig {
    /// Configuration for `base_url` with default prefixes and no tokens.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not a valid URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("TANAWAL_API_BASE_URL", base_url)?,
            prefixes: ServicePrefixes::default(),
            timeout: Duration::from_secs(10),
            access_token: None,
            id_token: None,
        })
    }

    fn from_source(env: &EnvSource<'_>) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(
            "TANAWAL_API_BASE_URL",
            &env.or_default("TANAWAL_API_BASE_URL", DEFAULT_BASE_URL),
        )?;

        let defaults = ServicePrefixes::default();
        let prefixes = ServicePrefixes {
            user: env.or_default("TANAWAL_USER_PREFIX", &defaults.user),
            food: env.or_default("TANAWAL_FOOD_PREFIX", &defaults.food),
            purchase: env.or_default("TANAWAL_PURCHASE_PREFIX", &defaults.purchase),
            delivery: env.or_default("TANAWAL_DELIVERY_PREFIX", &defaults.delivery),
        };

        let timeout_secs = env
            .or_default("TANAWAL_REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("TANAWAL_REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            prefixes,
            timeout: Duration::from_secs(timeout_secs),
            access_token: env.token("TANAWAL_ACCESS_TOKEN"),
            id_token: env.token("TANAWAL_ID_TOKEN"),
        })
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = EnvSource { lookup: &lookup };

        let api = ApiConfig::from_source(&env)?;
        let admin_user_id = env
            .optional("TANAWAL_ADMIN_USER_ID")
            .map(|raw| {
                raw.trim().parse::<i64>().map(UserId::new).map_err(|e| {
                    ConfigError::InvalidEnvVar("TANAWAL_ADMIN_USER_ID".to_string(), e.to_string())
                })
            })
            .transpose()?;
        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env
            .optional("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            api,
            admin_user_id,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct EnvSource<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl EnvSource<'_> {
    /// Get an optional variable. Blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get an optional token, warning when it looks like a placeholder.
    fn token(&self, key: &str) -> Option<SecretString> {
        self.optional(key).map(|value| {
            if looks_like_placeholder(&value) {
                tracing::warn!("{key} looks like a placeholder value");
            }
            SecretString::from(value)
        })
    }
}

fn looks_like_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    PLACEHOLDER_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Parse a gateway root, appending the trailing `/` that `Url::join` needs.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }
    Ok(url)
}
