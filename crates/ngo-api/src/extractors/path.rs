//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use ngo_service::ServiceError;

use crate::response::ApiError;

/// Numeric participation id from `/participations/:participation_id/...`
///
/// A malformed id names no participation, so it is reported as not found.
#[derive(Debug, Clone, Copy)]
pub struct ParticipationIdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ParticipationIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        raw.parse::<i64>()
            .map(ParticipationIdPath)
            .map_err(|_| ApiError::Service(ServiceError::not_found("Participation", raw)))
    }
}
