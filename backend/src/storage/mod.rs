//! # Storage Module
//!
//! Persistence for donation records.
//!
//! The domain layer only sees the [`DonationStorage`] trait. Two sqlx-backed
//! implementations exist:
//!
//! - **MySQL**: the production store, reached through a bounded `MySqlPool`
//! - **SQLite**: local development and tests; creates its own table on connect
//!
//! Schema management for the production store is out of scope here; the
//! `donations` table is expected to exist.

pub mod mysql;
pub mod sqlite;
pub mod traits;

pub use mysql::MySqlDonationRepository;
pub use sqlite::SqliteDonationRepository;
pub use traits::DonationStorage;
