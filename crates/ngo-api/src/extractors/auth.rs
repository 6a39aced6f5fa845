//! Authentication extractor
//!
//! Extracts and validates JWT bearer tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use ngo_common::AppError;
use ngo_core::Actor;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated account extracted from a JWT token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub actor: Actor,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state
            .jwt_service()
            .validate(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected access token");
                match e {
                    AppError::TokenExpired => ApiError::App(e),
                    _ => ApiError::InvalidToken,
                }
            })?;

        Ok(AuthUser {
            actor: claims.actor(),
        })
    }
}
