//! Donation handlers

use axum::{extract::State, Json};
use ngo_service::dto::{DonateRequest, DonationResponse, DonationSummaryResponse};
use ngo_service::DonationService;

use crate::extractors::{AuthUser, JsonBody};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Donate to an event as the caller
///
/// POST /donations
pub async fn donate(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(request): JsonBody<DonateRequest>,
) -> ApiResult<Created<Json<DonationResponse>>> {
    let service = DonationService::new(state.service_context());
    let response = service.donate(&auth.actor.email, request).await?;
    Ok(Created(Json(response)))
}

/// GET /donations/@me
pub async fn my_donations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<DonationResponse>>> {
    let service = DonationService::new(state.service_context());
    let response = service.my_donations(&auth.actor.email).await?;
    Ok(Json(response))
}

/// Every donation with totals (admin only)
///
/// GET /donations
pub async fn donation_summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DonationSummaryResponse>> {
    let service = DonationService::new(state.service_context());
    let response = service.donation_summary(&auth.actor).await?;
    Ok(Json(response))
}
