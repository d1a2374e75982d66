//! # IO Module
//!
//! HTTP adapter over the domain layer. Handlers translate path parameters and
//! JSON bodies into [`DonationService`](crate::domain::DonationService) calls
//! and map domain errors onto each route's status code.
//!
//! ## Supported Operations
//!
//! - **GET /donations/:user_id**: a user's donation history
//! - **POST /donations**: record a donation
//! - **GET /dashboard/total-donations/:user_id**: this year's total
//! - **GET /dashboard/recent-transactions/:user_id**: the last month's donations

pub mod rest;

pub use rest::*;
