//! Feedback handlers

use axum::{
    extract::{Path, State},
    Json,
};
use ngo_service::dto::{FeedbackEligibilityResponse, FeedbackRequest, FeedbackResponse};
use ngo_service::FeedbackService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Feedback left for an event
///
/// GET /events/{event_id}/feedback
pub async fn list_event_feedback(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<Vec<FeedbackResponse>>> {
    let service = FeedbackService::new(state.service_context());
    let response = service.list_feedback(Some(&event_id)).await?;
    Ok(Json(response))
}

/// Submit feedback as an approved volunteer of a finished event
///
/// POST /events/{event_id}/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<String>,
    ValidatedJson(request): ValidatedJson<FeedbackRequest>,
) -> ApiResult<Created<Json<FeedbackResponse>>> {
    let service = FeedbackService::new(state.service_context());
    let response = service.submit_feedback(&auth.actor, &event_id, request).await?;
    Ok(Created(Json(response)))
}

/// Whether the caller may submit feedback, with the refusal reason
///
/// GET /events/{event_id}/feedback/eligibility
pub async fn feedback_eligibility(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<String>,
) -> ApiResult<Json<FeedbackEligibilityResponse>> {
    let service = FeedbackService::new(state.service_context());
    let response = service.eligibility(&auth.actor, &event_id).await?;
    Ok(Json(response))
}

/// DELETE /feedback/{feedback_id}
pub async fn delete_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(feedback_id): Path<String>,
) -> ApiResult<NoContent> {
    let service = FeedbackService::new(state.service_context());
    service.delete_feedback(&auth.actor, &feedback_id).await?;
    Ok(NoContent)
}
