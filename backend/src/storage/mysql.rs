use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use shared::{CreateDonationRequest, Donation, FieldValue, RecentTransaction};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::storage::traits::DonationStorage;

/// MySQL-backed donation store.
///
/// Numeric columns are cast in the SELECT list so that unsigned ids and
/// DECIMAL amounts decode into the `i64`/`f64` fields of the shared types.
#[derive(Clone)]
pub struct MySqlDonationRepository {
    pool: MySqlPool,
}

impl MySqlDonationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Open a pool bounded by `conn_limit` against the configured server
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!(
            "Connecting to MySQL at {} (database: {}, max connections: {})",
            config.host, config.name, config.conn_limit
        );

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.conn_limit)
            .connect_with(options)
            .await
            .context("failed to connect to MySQL")?;

        Ok(Self::new(pool))
    }
}

fn donation_from_row(row: &MySqlRow) -> Result<Donation> {
    Ok(Donation {
        donation_id: row.try_get("donation_id")?,
        donation_user_id: row.try_get("donation_user_id")?,
        amount: row.try_get("amount")?,
        donation_category: row.try_get("donation_category")?,
        payment_method: row.try_get("payment_method")?,
        created_at: row.try_get("created_at")?,
    })
}

fn recent_transaction_from_row(row: &MySqlRow) -> Result<RecentTransaction> {
    Ok(RecentTransaction {
        donation_id: row.try_get("donation_id")?,
        amount: row.try_get("amount")?,
        payment_method: row.try_get("payment_method")?,
        donation_category: row.try_get("donation_category")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl DonationStorage for MySqlDonationRepository {
    async fn list_donations(&self, user_id: &str) -> Result<Vec<Donation>> {
        let rows = sqlx::query(
            r#"
            SELECT CAST(donation_id AS SIGNED) AS donation_id,
                   CAST(donation_user_id AS SIGNED) AS donation_user_id,
                   CAST(amount AS DOUBLE) AS amount,
                   donation_category,
                   payment_method,
                   created_at
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
            SELECT CAST(COALESCE(SUM(amount), 0) AS DOUBLE) AS total_donations
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
            SELECT CAST(donation_id AS SIGNED) AS donation_id,
                   CAST(amount AS DOUBLE) AS amount,
                   payment_method,
                   donation_category,
                   created_at
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
