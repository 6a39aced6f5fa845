//! Posting handlers
//!
//! The public gallery and its management by admins and organisers.
//! New postings arrive as a raw photo body with the title in the query.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use ngo_service::dto::{
    CreatePostingRequest, PostingListQuery, PostingResponse, UpdatePostingRequest,
};
use ngo_service::PostingService;

use crate::extractors::{AuthUser, JsonBody, PhotoBody};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Every posting
///
/// GET /postings
pub async fn gallery(State(state): State<AppState>) -> ApiResult<Json<Vec<PostingResponse>>> {
    let service = PostingService::new(state.service_context());
    let response = service.gallery().await?;
    Ok(Json(response))
}

/// Create a posting from an uploaded photo
///
/// POST /postings?title={title}&filename={file_name}
pub async fn create_posting(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<CreatePostingRequest>, QueryRejection>,
    PhotoBody(upload): PhotoBody,
) -> ApiResult<Created<Json<PostingResponse>>> {
    let Query(request) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;
    let service = PostingService::new(state.service_context());
    let response = service
        .create_posting(&auth.actor, request, Some(upload))
        .await?;
    Ok(Created(Json(response)))
}

/// Postings the caller manages
///
/// GET /postings/managed
pub async fn list_managed_postings(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<PostingListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<PostingResponse>>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;
    let service = PostingService::new(state.service_context());
    let response = service.list_managed_postings(&auth.actor, query).await?;
    Ok(Json(response))
}

/// GET /postings/{posting_id}
pub async fn get_posting(
    State(state): State<AppState>,
    Path(posting_id): Path<String>,
) -> ApiResult<Json<PostingResponse>> {
    let service = PostingService::new(state.service_context());
    let response = service.get_posting(&posting_id).await?;
    Ok(Json(response))
}

/// Rename a posting
///
/// PATCH /postings/{posting_id}
pub async fn update_posting(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(posting_id): Path<String>,
    JsonBody(request): JsonBody<UpdatePostingRequest>,
) -> ApiResult<Json<PostingResponse>> {
    let service = PostingService::new(state.service_context());
    let response = service
        .update_posting(&auth.actor, &posting_id, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /postings/{posting_id}
pub async fn delete_posting(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(posting_id): Path<String>,
) -> ApiResult<NoContent> {
    let service = PostingService::new(state.service_context());
    service.delete_posting(&auth.actor, &posting_id).await?;
    Ok(NoContent)
}

/// Replace the posting photo
///
/// PUT /postings/{posting_id}/photo
pub async fn upload_posting_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(posting_id): Path<String>,
    PhotoBody(upload): PhotoBody,
) -> ApiResult<Json<PostingResponse>> {
    let service = PostingService::new(state.service_context());
    let response = service
        .set_posting_photo(&auth.actor, &posting_id, upload)
        .await?;
    Ok(Json(response))
}
