//! Event handlers
//!
//! Endpoints for event management, photos, and volunteer signups.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use ngo_service::dto::{
    CreateEventRequest, EnrollmentResponse, EventListQuery, EventResponse, SignupRequest,
    UpdateEventRequest,
};
use ngo_service::{ApprovalService, EventService, SignupService};

use crate::extractors::{AuthUser, JsonBody, PhotoBody};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// List events, optionally filtered by title or creator
///
/// GET /events
pub async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<EventListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;
    let service = EventService::new(state.service_context());
    let response = service.list_events(query).await?;
    Ok(Json(response))
}

/// Create an event
///
/// POST /events
///
/// Field and schedule violations are reported together, so the body is
/// validated by the service rather than the extractor.
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(request): JsonBody<CreateEventRequest>,
) -> ApiResult<Created<Json<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.create_event(&auth.actor, request, None).await?;
    Ok(Created(Json(response)))
}

/// Events the caller manages
///
/// GET /events/managed
pub async fn list_managed_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.list_managed_events(&auth.actor).await?;
    Ok(Json(response))
}

/// Get event by ID
///
/// GET /events/{event_id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.get_event(&event_id).await?;
    Ok(Json(response))
}

/// Update an event
///
/// PATCH /events/{event_id}
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<String>,
    JsonBody(request): JsonBody<UpdateEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.update_event(&auth.actor, &event_id, request).await?;
    Ok(Json(response))
}

/// Delete an event with its participations and feedback
///
/// DELETE /events/{event_id}
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<String>,
) -> ApiResult<NoContent> {
    let service = EventService::new(state.service_context());
    service.delete_event(&auth.actor, &event_id).await?;
    Ok(NoContent)
}

/// Upload or replace the event photo
///
/// PUT /events/{event_id}/photo
pub async fn upload_event_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<String>,
    PhotoBody(upload): PhotoBody,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.set_event_photo(&auth.actor, &event_id, upload).await?;
    Ok(Json(response))
}

/// Sign up as a volunteer; no account needed
///
/// POST /events/{event_id}/signups
pub async fn sign_up(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> ApiResult<Created<Json<EnrollmentResponse>>> {
    let service = SignupService::new(state.service_context());
    let response = service.sign_up(&event_id, request).await?;
    Ok(Created(Json(response)))
}

/// Participations for an event with their volunteers
///
/// GET /events/{event_id}/participations
pub async fn list_event_participations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(event_id): Path<String>,
) -> ApiResult<Json<Vec<EnrollmentResponse>>> {
    let service = ApprovalService::new(state.service_context());
    let response = service.list_for_event(&auth.actor, &event_id).await?;
    Ok(Json(response))
}
