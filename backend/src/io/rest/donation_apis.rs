//! # REST API for Donations
//!
//! Endpoints for listing a user's donations and recording new ones.

use axum::{
    async_trait,
    extract::{FromRequest, Path, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Json, Response},
    Form,
};
use shared::CreateDonationRequest;
use tracing::{debug, error, info};

use crate::domain::DonationError;
use crate::AppState;

/// GET /donations/:user_id
pub async fn list_donations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /donations/{}", user_id);
    list_for_user(&state, &user_id).await
}

/// GET /donations/ - the path segment is empty, so there is no user to look up
pub async fn list_donations_without_user(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /donations/ - no user id");
    list_for_user(&state, "").await
}

async fn list_for_user(state: &AppState, user_id: &str) -> Response {
    match state.donation_service.list_donations(user_id).await {
        Ok(donations) => (StatusCode::OK, Json(donations)).into_response(),
        Err(DonationError::MissingUserId) => {
            (StatusCode::BAD_REQUEST, "User ID is required.").into_response()
        }
        Err(e) => {
            error!("Error fetching donations: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch donations.").into_response()
        }
    }
}

/// Body of `POST /donations`, accepted as JSON or as a url-encoded form.
///
/// Requests with any other (or no) content type carry no fields, so the
/// insert goes to the store with NULLs and is rejected there.
pub struct DonationBody(pub CreateDonationRequest);

fn content_type_is(req: &Request, mime: &str) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(mime))
}

#[async_trait]
impl<S> FromRequest<S> for DonationBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if content_type_is(&req, "application/x-www-form-urlencoded") {
            let Form(request) = Form::<CreateDonationRequest>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(request))
        } else if content_type_is(&req, "application/json") {
            let Json(request) = Json::<CreateDonationRequest>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(request))
        } else {
            debug!("POST /donations without a JSON or form body");
            Ok(Self(CreateDonationRequest::default()))
        }
    }
}

/// POST /donations
///
/// Any store failure answers 418, not 500; clients rely on that status to
/// tell a rejected insert apart from other errors.
pub async fn create_donation(
    State(state): State<AppState>,
    DonationBody(request): DonationBody,
) -> impl IntoResponse {
    info!("POST /donations - user: {:?}", request.user_id);

    match state.donation_service.create_donation(&request).await {
        Ok(()) => (StatusCode::OK, "Successful donation.").into_response(),
        Err(e) => {
            error!("Error adding donation: {:?}", e);
            (StatusCode::IM_A_TEAPOT, "Couldn't add to database").into_response()
        }
    }
}
