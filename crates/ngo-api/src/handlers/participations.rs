//! Participation workflow handlers
//!
//! Approval decisions and completion marks by organisers and admins.

use axum::{extract::State, Json};
use ngo_service::dto::{EnrollmentResponse, ParticipationResponse};
use ngo_service::ApprovalService;

use crate::extractors::{AuthUser, ParticipationIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Pending participations the caller may decide on
///
/// GET /participations/pending
pub async fn list_pending(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<EnrollmentResponse>>> {
    let service = ApprovalService::new(state.service_context());
    let response = service.list_pending(&auth.actor).await?;
    Ok(Json(response))
}

/// POST /participations/{participation_id}/approve
pub async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    ParticipationIdPath(id): ParticipationIdPath,
) -> ApiResult<Json<ParticipationResponse>> {
    let service = ApprovalService::new(state.service_context());
    Ok(Json(service.approve(&auth.actor, id).await?))
}

/// POST /participations/{participation_id}/reject
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    ParticipationIdPath(id): ParticipationIdPath,
) -> ApiResult<Json<ParticipationResponse>> {
    let service = ApprovalService::new(state.service_context());
    Ok(Json(service.reject(&auth.actor, id).await?))
}

/// Return a decided participation to pending
///
/// POST /participations/{participation_id}/reset
pub async fn reset(
    State(state): State<AppState>,
    auth: AuthUser,
    ParticipationIdPath(id): ParticipationIdPath,
) -> ApiResult<Json<ParticipationResponse>> {
    let service = ApprovalService::new(state.service_context());
    Ok(Json(service.reset_to_pending(&auth.actor, id).await?))
}

/// POST /participations/{participation_id}/complete
pub async fn complete(
    State(state): State<AppState>,
    auth: AuthUser,
    ParticipationIdPath(id): ParticipationIdPath,
) -> ApiResult<Json<ParticipationResponse>> {
    let service = ApprovalService::new(state.service_context());
    Ok(Json(service.mark_completed(&auth.actor, id).await?))
}

/// POST /participations/{participation_id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    ParticipationIdPath(id): ParticipationIdPath,
) -> ApiResult<Json<ParticipationResponse>> {
    let service = ApprovalService::new(state.service_context());
    Ok(Json(service.mark_cancelled(&auth.actor, id).await?))
}
