//! # Storage Traits
//!
//! Storage abstraction for donation records, so the domain layer can run
//! against MySQL in production and SQLite locally or in tests.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use shared::{CreateDonationRequest, Donation, RecentTransaction};

/// Trait defining the interface for donation storage operations
///
/// Every method is a single round-trip to the store. `user_id` is passed
/// through exactly as received on the path and the store coerces it against
/// the `donation_user_id` column.
#[async_trait]
pub trait DonationStorage: Send + Sync {
    /// List all donations for a user, most recent first
    async fn list_donations(&self, user_id: &str) -> Result<Vec<Donation>>;

    /// Insert a new donation. `payment_method` and `created_at` are left to
    /// the store's column defaults.
    async fn store_donation(&self, request: &CreateDonationRequest) -> Result<()>;

    /// Sum of `amount` for rows with `start <= created_at < end`.
    /// Returns zero when no rows match.
    async fn total_donations_between(
        &self,
        user_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<f64>;

    /// Donations with `created_at >= since`, most recent first
    async fn list_donations_since(
        &self,
        user_id: &str,
        since: NaiveDateTime,
    ) -> Result<Vec<RecentTransaction>>;
}
