//! User handlers
//!
//! Endpoints for the caller's account and profile, their volunteer history,
//! and the admin user list.

use axum::{
    extract::{Path, State},
    Json,
};
use ngo_service::dto::{HistoryResponse, UpdateProfileRequest, UserResponse};
use ngo_service::{AuthService, HistoryService, UserService};

use crate::extractors::{AuthUser, JsonBody, PhotoBody};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.current_user(&auth.actor).await?;
    Ok(Json(response))
}

/// Change the caller's display name
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(request): JsonBody<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(&auth.actor, request, None).await?;
    Ok(Json(response))
}

/// Upload or replace the caller's profile photo (members only)
///
/// PUT /users/@me/photo
pub async fn upload_profile_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    PhotoBody(upload): PhotoBody,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service
        .update_profile(&auth.actor, UpdateProfileRequest::default(), Some(upload))
        .await?;
    Ok(Json(response))
}

/// Volunteer activities and donations of the caller
///
/// GET /users/@me/activities
pub async fn get_my_activities(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<HistoryResponse>> {
    let service = HistoryService::new(state.service_context());
    let response = service.my_activities(&auth.actor.email).await?;
    Ok(Json(response))
}

/// List every account (admin only)
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.list_users(&auth.actor).await?;
    Ok(Json(response))
}

/// Get an account by email; members may only fetch their own
///
/// GET /users/{email}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(email): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(&auth.actor, &email).await?;
    Ok(Json(response))
}
