//! Core types for the Tanawal admin dashboard.
//!
//! This module provides type-safe wrappers for identifiers, timestamps,
//! statuses and payment methods.

pub mod id;
pub mod payment;
pub mod status;
pub mod timestamp;

pub use id::*;
pub use payment::PaymentMethod;
pub use status::*;
pub use timestamp::Timestamp;
