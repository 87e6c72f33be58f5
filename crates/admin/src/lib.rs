//! Tanawal admin library.
//!
//! Talks to the Tanawal microservices (users, foods, purchases,
//! deliveries), normalizes their payloads through `tanawal-core`, and keeps
//! one live [`views::View`] per entity kind with optimistic actions.
//!
//! # Security
//!
//! Admin tokens grant moderation rights over every account and listing.
//! They are held as [`secrecy::SecretString`] and never logged.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod error;
pub mod repositories;
pub mod views;

pub use client::{ApiClient, ApiError, Transport};
pub use config::{AdminConfig, ApiConfig, ConfigError};
pub use error::AdminError;
pub use views::{DeliveryView, FoodView, Listed, OrderView, Refresh, UserView, View};
