//! # REST API for the Dashboard
//!
//! Yearly totals and recent transactions for a single user. Failures are
//! reported as a JSON `{ "error": ... }` body.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{ErrorResponse, TotalDonationsResponse};
use tracing::{error, info};

use crate::AppState;

/// GET /dashboard/total-donations/:user_id
pub async fn get_total_donations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /dashboard/total-donations/{}", user_id);

    match state.donation_service.total_donations_this_year(&user_id).await {
        Ok(total_donations) => {
            (StatusCode::OK, Json(TotalDonationsResponse { total_donations })).into_response()
        }
        Err(e) => {
            error!("Error fetching total donations: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to fetch total donations.")),
            )
                .into_response()
        }
    }
}

/// GET /dashboard/recent-transactions/:user_id
pub async fn get_recent_transactions(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /dashboard/recent-transactions/{}", user_id);

    match state.donation_service.recent_transactions(&user_id).await {
        Ok(transactions) => {
            info!("Returning {} recent transactions", transactions.len());
            (StatusCode::OK, Json(transactions)).into_response()
        }
        Err(e) => {
            error!("Error fetching recent transactions: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "An error occurred while fetching recent transactions",
                )),
            )
                .into_response()
        }
    }
}
