//! Unified error handling for admin.

use thiserror::Error;

use tanawal_core::{MutationError, UserId};

use crate::client::ApiError;
use crate::config::ConfigError;

/// Application-level error type for admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Local mutation could not start or settle.
    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AdminError {
    /// Whether the failure came from outside this process.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// Log the error, sending API and configuration failures to Sentry.
    pub fn report(&self) {
        if matches!(self, Self::Api(_) | Self::Config(_)) {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin operation failed"
            );
        } else {
            tracing::warn!(error = %self, "Admin operation rejected");
        }
    }
}

/// Set the Sentry user context from the acting admin's id.
pub fn set_sentry_user(admin_user_id: UserId) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_user_id.to_string()),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_error_display() {
        let err = AdminError::NotFound("food 12".to_string());
        assert_eq!(err.to_string(), "Not found: food 12");

        let err = AdminError::from(MutationError::Busy("3".to_string()));
        assert_eq!(
            err.to_string(),
            "Mutation error: record 3 is busy with another change"
        );
    }

    #[test]
    fn test_only_api_errors_are_external() {
        let api = AdminError::from(ApiError::Unauthorized("expired".to_string()));
        assert!(api.is_external());
        assert!(!AdminError::NotFound("x".to_string()).is_external());
        assert!(!AdminError::from(MutationError::StaleTicket).is_external());
    }

    #[test]
    fn test_report_without_sentry_client() {
        AdminError::from(ApiError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        })
        .report();
        AdminError::NotFound("x".to_string()).report();
    }
}
