//! Tanawal Core - normalization and query library.
//!
//! This crate turns the loosely shaped payloads of the Tanawal food
//! platform API into canonical records and answers dashboard queries over
//! them. It is used by:
//! - `admin` - API client, repositories and views for the back office
//! - `cli` - Command-line dashboard
//!
//! # Architecture
//!
//! The core crate is pure: no I/O, no HTTP, no async. Every normalizer is
//! total, so one malformed record degrades to "unknown" fields instead of
//! failing a whole collection.
//!
//! # Modules
//!
//! - [`types`] - Ids, timestamps, tri-state booleans, status and payment enums
//! - [`normalize`] - Field resolution, coercion, list parsing, envelopes
//! - [`entities`] - Canonical `User`, `Food`, `Purchase`, `Delivery`
//! - [`query`] - Search, filters, facets, ordering, KPIs
//! - [`collection`] - Fetch tickets and optimistic mutations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod collection;
pub mod entities;
pub mod normalize;
pub mod query;
pub mod types;

pub use collection::{Collection, FetchTicket, MutationError, MutationTicket, Settled};
pub use entities::{Delivery, Entity, Food, Purchase, User};
pub use types::*;
