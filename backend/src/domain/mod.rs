//! # Domain Module
//!
//! Business rules for donation records. There is very little of it:
//!
//! - **donation_service**: presence check on the user id and dispatch of each
//!   operation to a single storage call
//! - **reporting_window**: calendar-year and trailing-month bounds used by the
//!   dashboard
//!
//! ## Business Rules
//!
//! - Listing a user's donations requires a non-empty user id
//! - Creation forwards the body as-is; the store decides what it accepts
//! - Donations are append-only; there is no update or delete

pub mod donation_service;
pub mod reporting_window;

pub use donation_service::{DonationError, DonationResult, DonationService};
