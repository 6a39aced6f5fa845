//! Admin handlers

use axum::{extract::State, Json};
use ngo_service::dto::DashboardResponse;
use ngo_service::DashboardService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Platform-wide counts
///
/// GET /admin/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DashboardResponse>> {
    let service = DashboardService::new(state.service_context());
    let response = service.dashboard(&auth.actor).await?;
    Ok(Json(response))
}
