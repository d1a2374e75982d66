//! Donation service domain logic.
use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use shared::{CreateDonationRequest, Donation, RecentTransaction};
use tracing::{debug, info};

use crate::domain::reporting_window;
use crate::storage::DonationStorage;

#[derive(Debug, thiserror::Error)]
pub enum DonationError {
    #[error("User ID is required.")]
    MissingUserId,
    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

pub type DonationResult<T> = Result<T, DonationError>;

/// Thin layer over [`DonationStorage`]: one store call per operation.
#[derive(Clone)]
pub struct DonationService {
    storage: Arc<dyn DonationStorage>,
}

impl DonationService {
    pub fn new(storage: Arc<dyn DonationStorage>) -> Self {
        Self { storage }
    }

    /// All donations for `user_id`, newest first.
    ///
    /// An empty `user_id` is rejected before the store is touched.
    pub async fn list_donations(&self, user_id: &str) -> DonationResult<Vec<Donation>> {
        if user_id.is_empty() {
            return Err(DonationError::MissingUserId);
        }

        let donations = self.storage.list_donations(user_id).await?;
        info!("Found {} donations for user {}", donations.len(), user_id);
        Ok(donations)
    }

    pub async fn create_donation(&self, request: &CreateDonationRequest) -> DonationResult<()> {
        debug!("Creating donation: {:?}", request);
        self.storage.store_donation(request).await?;
        Ok(())
    }

    /// Sum of this calendar year's donations (UTC), zero when there are none
    pub async fn total_donations_this_year(&self, user_id: &str) -> DonationResult<f64> {
        self.total_donations_for_year_of(user_id, Utc::now().naive_utc())
            .await
    }

    pub async fn total_donations_for_year_of(
        &self,
        user_id: &str,
        now: NaiveDateTime,
    ) -> DonationResult<f64> {
        let window = reporting_window::current_year(now);
        let total = self
            .storage
            .total_donations_between(user_id, window.start, window.end)
            .await?;
        Ok(total)
    }

    /// Donations from the trailing calendar month, newest first
    pub async fn recent_transactions(
        &self,
        user_id: &str,
    ) -> DonationResult<Vec<RecentTransaction>> {
        self.recent_transactions_as_of(user_id, Utc::now().naive_utc())
            .await
    }

    pub async fn recent_transactions_as_of(
        &self,
        user_id: &str,
        now: NaiveDateTime,
    ) -> DonationResult<Vec<RecentTransaction>> {
        let since = reporting_window::recent_since(now);
        let transactions = self.storage.list_donations_since(user_id, since).await?;
        debug!(
            "Recent transactions for user {} since {}: {:?}",
            user_id, since, transactions
        );
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteDonationRepository;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    async fn setup_test() -> (DonationService, SqliteDonationRepository) {
        let repo = SqliteDonationRepository::init_test()
            .await
            .expect("Failed to create test database");
        (DonationService::new(Arc::new(repo.clone())), repo)
    }

    #[tokio::test]
    async fn test_list_requires_user_id() {
        let (service, _) = setup_test().await;

        let result = service.list_donations("").await;
        assert!(matches!(result, Err(DonationError::MissingUserId)));
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (service, _) = setup_test().await;

        let request = CreateDonationRequest {
            user_id: Some(7_i64.into()),
            amount: Some(50.0_f64.into()),
            category: Some("food".into()),
        };
        service.create_donation(&request).await.unwrap();

        let donations = service.list_donations("7").await.unwrap();
        assert!(donations
            .iter()
            .any(|d| d.amount == 50.0 && d.donation_category == "food"));
    }

    #[tokio::test]
    async fn test_create_with_missing_fields_surfaces_storage_error() {
        let (service, _) = setup_test().await;

        let result = service.create_donation(&CreateDonationRequest::default()).await;
        assert!(matches!(result, Err(DonationError::Storage(_))));
    }

    #[tokio::test]
    async fn test_total_for_year_ignores_other_years() {
        let (service, repo) = setup_test().await;
        repo.insert_donation_at(9, 10.0, "food", None, at(2025, 2, 1)).await.unwrap();
        repo.insert_donation_at(9, 20.0, "food", None, at(2025, 9, 9)).await.unwrap();
        repo.insert_donation_at(9, 5.0, "food", None, at(2024, 12, 31)).await.unwrap();

        let total = service
            .total_donations_for_year_of("9", at(2025, 10, 1))
            .await
            .unwrap();
        assert_eq!(total, 30.0);

        let previous_year = service
            .total_donations_for_year_of("9", at(2024, 6, 1))
            .await
            .unwrap();
        assert_eq!(previous_year, 5.0);
    }

    #[tokio::test]
    async fn test_recent_transactions_window() {
        let (service, repo) = setup_test().await;
        repo.insert_donation_at(9, 10.0, "food", None, at(2025, 6, 14)).await.unwrap();
        repo.insert_donation_at(9, 20.0, "food", None, at(2025, 5, 15)).await.unwrap();
        repo.insert_donation_at(9, 30.0, "food", None, at(2025, 5, 14)).await.unwrap();

        let recent = service
            .recent_transactions_as_of("9", at(2025, 6, 15))
            .await
            .unwrap();

        let amounts: Vec<f64> = recent.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![10.0, 20.0]);
    }
}
