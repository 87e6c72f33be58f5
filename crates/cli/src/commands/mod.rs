//! Subcommand implementations and shared output helpers.

pub mod deliveries;
pub mod foods;
pub mod normalize;
pub mod orders;
pub mod users;

use serde::Serialize;
use thiserror::Error;

use tanawal_admin::{AdminConfig, AdminError, ApiClient, ApiError, Listed, View};
use tanawal_core::{Delivery, Food, Purchase, User};

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Admin(#[from] AdminError),

    /// Payload file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Output could not be encoded or input was not JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        Self::Admin(e.into())
    }
}

/// Build a view over the configured API and load it.
pub async fn load_view<E: Listed>(config: &AdminConfig) -> Result<View<E, ApiClient>, CliError> {
    let client = ApiClient::new(config.api.clone())?;
    let view = View::new(client);
    view.refresh().await?;
    Ok(view)
}

/// One-line, human-readable rendering of a record.
pub trait Summary {
    fn summary(&self) -> String;
}

impl Summary for Food {
    fn summary(&self) -> String {
        format!(
            "{:>6}  {:<28} {:>8}  {:<11} {}",
            self.id,
            self.name.as_deref().unwrap_or("—"),
            self.price_label(),
            self.availability.label(),
            self.cuisine.as_deref().unwrap_or("—"),
        )
    }
}

impl Summary for User {
    fn summary(&self) -> String {
        format!(
            "{:>6}  {:<28} {:<8} {}",
            self.id,
            self.full_name(),
            self.status.label(),
            self.account_type.as_deref().unwrap_or("—"),
        )
    }
}

impl Summary for Purchase {
    fn summary(&self) -> String {
        format!(
            "{:>6}  {:<28} {:>8.0}  {:<11} {}",
            self.id,
            self.food_name.as_deref().unwrap_or("—"),
            self.final_price,
            self.status,
            self.payment_method,
        )
    }
}

impl Summary for Delivery {
    fn summary(&self) -> String {
        format!(
            "{:>6}  order {:<6} {:<24} {:<10} {:>6.0}",
            self.id,
            self.order_id,
            self.customer_name,
            self.status,
            self.fee,
        )
    }
}

/// Where command results go.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print records as JSON or as summary lines followed by a count.
    #[allow(clippy::print_stdout)]
    pub fn records<E: Serialize + Summary>(self, records: &[&E]) -> Result<(), CliError> {
        if self.json {
            return self.value(records);
        }
        for record in records {
            println!("{}", record.summary());
        }
        println!("{} record(s)", records.len());
        Ok(())
    }

    /// Print any serializable value as pretty JSON.
    #[allow(clippy::print_stdout)]
    pub fn value<T: Serialize + ?Sized>(self, value: &T) -> Result<(), CliError> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print a status line. Suppressed in JSON mode.
    #[allow(clippy::print_stdout)]
    pub fn line(self, text: &str) {
        if !self.json {
            println!("{text}");
        }
    }
}
