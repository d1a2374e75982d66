//! # Donation Tracker Backend
//!
//! HTTP service over a relational table of donation records.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers)
//!     ↓
//! Domain Layer (DonationService)
//!     ↓
//! Storage Layer (MySQL / SQLite via sqlx)
//! ```
//!
//! One connection pool is created at startup by [`initialize_backend`] and
//! handed to every handler through [`AppState`].

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::{DatabaseConfig, DatabaseDriver};
use crate::domain::DonationService;
use crate::storage::{DonationStorage, MySqlDonationRepository, SqliteDonationRepository};

/// Fixed listen port
pub const SERVER_PORT: u16 = 8081;

/// Directory served for any path that no API route matches
const STATIC_DIR: &str = "public";

/// Main application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub donation_service: DonationService,
}

/// Connect to the configured store and build the application state
pub async fn initialize_backend(config: &DatabaseConfig) -> Result<AppState> {
    info!("Setting up database ({:?})", config.driver);
    let storage: Arc<dyn DonationStorage> = match config.driver {
        DatabaseDriver::Mysql => Arc::new(MySqlDonationRepository::connect(config).await?),
        DatabaseDriver::Sqlite => Arc::new(
            SqliteDonationRepository::connect(&config.sqlite_url(), config.conn_limit).await?,
        ),
    };

    info!("Setting up application state");
    Ok(AppState {
        donation_service: DonationService::new(storage),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/donations", post(io::create_donation))
        .route("/donations/", get(io::list_donations_without_user))
        .route("/donations/:user_id", get(io::list_donations))
        .route(
            "/dashboard/total-donations/:user_id",
            get(io::get_total_donations),
        )
        .route(
            "/dashboard/recent-transactions/:user_id",
            get(io::get_recent_transactions),
        )
        .fallback_service(ServeDir::new(PathBuf::from(STATIC_DIR)))
        .layer(cors)
        .with_state(app_state)
}
