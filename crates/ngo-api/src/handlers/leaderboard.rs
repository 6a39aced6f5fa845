//! Leaderboard handler

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use ngo_service::dto::{LeaderboardQuery, LeaderboardResponse};
use ngo_service::LeaderboardService;

use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Ranked volunteers and donors
///
/// GET /leaderboard?top=N
pub async fn get_leaderboard(
    State(state): State<AppState>,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> ApiResult<Json<LeaderboardResponse>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;
    let service = LeaderboardService::new(state.service_context());
    let response = service.compute_leaderboard(query.top).await?;
    Ok(Json(response))
}
