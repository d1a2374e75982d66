//! # REST API Interface Layer
//!
//! HTTP endpoints for the donation tracker:
//! - JSON request/response serialization
//! - Error translation from domain errors to HTTP status codes
//! - Request logging
//!
//! Status codes are part of the contract. In particular a rejected insert is
//! reported as `418`, and dashboard failures carry a JSON error body while
//! donation-list failures are plain text.

pub mod dashboard_apis;
pub mod donation_apis;

pub use dashboard_apis::*;
pub use donation_apis::*;
