use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use shared::{CreateDonationRequest, Donation, FieldValue, RecentTransaction};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::info;

use crate::storage::traits::DonationStorage;

/// SQLite-backed donation store for local runs and tests
#[derive(Clone)]
pub struct SqliteDonationRepository {
    pool: SqlitePool,
}

impl SqliteDonationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url` and make sure the donations table exists
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        info!("Opening SQLite database {} (max connections: {})", url, max_connections);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .with_context(|| format!("failed to open SQLite database {}", url))?;

        let repository = Self::new(pool);
        repository.create_schema().await?;
        Ok(repository)
    }

    /// Fresh in-memory database with the schema applied
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        Self::connect("sqlite::memory:", 4).await
    }

    /// Create the donations table if it does not exist yet.
    ///
    /// The table is STRICT: text such as `"50"` is still coerced into the
    /// numeric columns, but values that cannot be converted are rejected
    /// instead of being stored as text.
    pub async fn create_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS donations (
                donation_id INTEGER PRIMARY KEY AUTOINCREMENT,
                donation_user_id INTEGER NOT NULL,
                amount REAL NOT NULL,
                donation_category TEXT NOT NULL,
                payment_method TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            ) STRICT;
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_donations_user_created_at
            ON donations(donation_user_id, created_at DESC);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a row with an explicit timestamp, for building fixtures
    #[cfg(test)]
    pub async fn insert_donation_at(
        &self,
        user_id: i64,
        amount: f64,
        category: &str,
        payment_method: Option<&str>,
        created_at: NaiveDateTime,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO donations (donation_user_id, amount, donation_category, payment_method, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .bind(category)
        .bind(payment_method)
        .bind(created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn donation_from_row(row: &SqliteRow) -> Result<Donation> {
    Ok(Donation {
        donation_id: row.try_get("donation_id")?,
        donation_user_id: row.try_get("donation_user_id")?,
        amount: row.try_get("amount")?,
        donation_category: row.try_get("donation_category")?,
        payment_method: row.try_get("payment_method")?,
        created_at: row.try_get("created_at")?,
    })
}

fn recent_transaction_from_row(row: &SqliteRow) -> Result<RecentTransaction> {
    Ok(RecentTransaction {
        donation_id: row.try_get("donation_id")?,
        amount: row.try_get("amount")?,
        payment_method: row.try_get("payment_method")?,
        donation_category: row.try_get("donation_category")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl DonationStorage for SqliteDonationRepository {
    async fn list_donations(&self, user_id: &str) -> Result<Vec<Donation>> {
        let rows = sqlx::query(
            r#"
            SELECT donation_id, donation_user_id, amount, donation_category, payment_method, created_at
            FROM donations
            WHERE donation_user_id = ?
            ORDER BY created_at DESC, donation_id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(donation_from_row).collect()
    }

    async fn store_donation(&self, request: &CreateDonationRequest) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO donations (donation_user_id, amount, donation_category)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(request.user_id.as_ref().map(FieldValue::to_bind_text))
        .bind(request.amount.as_ref().map(FieldValue::to_bind_text))
        .bind(request.category.as_ref().map(FieldValue::to_bind_text))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn total_donations_between(
        &self,
        user_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<f64> {
        let row = sqlx::query(
            r#"
            SELECT CAST(COALESCE(SUM(amount), 0) AS REAL) AS total_donations
            FROM donations
            WHERE donation_user_id = ? AND created_at >= ? AND created_at < ?
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.try_get("total_donations")?)
    }

    async fn list_donations_since(
        &self,
        user_id: &str,
        since: NaiveDateTime,
    ) -> Result<Vec<RecentTransaction>> {
        let rows = sqlx::query(
            r#"
            SELECT donation_id, amount, payment_method, donation_category, created_at
            FROM donations
            WHERE donation_user_id = ? AND created_at >= ?
            ORDER BY created_at DESC, donation_id DESC
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(recent_transaction_from_row).collect()
    }
}
