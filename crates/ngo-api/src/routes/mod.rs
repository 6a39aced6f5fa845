//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{
    admin, auth, donations, events, feedback, health, leaderboard, participations, postings,
    users,
};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(event_routes())
        .merge(participation_routes())
        .merge(feedback_routes())
        .merge(donation_routes())
        .merge(posting_routes())
        .route("/leaderboard", get(leaderboard::get_leaderboard))
        .route("/admin/dashboard", get(admin::get_dashboard))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route(
            "/users/@me",
            get(users::get_current_user).patch(users::update_current_user),
        )
        .route("/users/@me/photo", put(users::upload_profile_photo))
        .route("/users/@me/activities", get(users::get_my_activities))
        .route("/users/:email", get(users::get_user))
}

/// Event routes
fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/managed", get(events::list_managed_events))
        .route(
            "/events/:event_id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/:event_id/photo", put(events::upload_event_photo))
        .route("/events/:event_id/signups", post(events::sign_up))
        .route(
            "/events/:event_id/participations",
            get(events::list_event_participations),
        )
        .route(
            "/events/:event_id/feedback",
            get(feedback::list_event_feedback).post(feedback::submit_feedback),
        )
        .route(
            "/events/:event_id/feedback/eligibility",
            get(feedback::feedback_eligibility),
        )
}

/// Participation workflow routes
fn participation_routes() -> Router<AppState> {
    Router::new()
        .route("/participations/pending", get(participations::list_pending))
        .route("/participations/:participation_id/approve", post(participations::approve))
        .route("/participations/:participation_id/reject", post(participations::reject))
        .route("/participations/:participation_id/reset", post(participations::reset))
        .route("/participations/:participation_id/complete", post(participations::complete))
        .route("/participations/:participation_id/cancel", post(participations::cancel))
}

/// Feedback moderation routes
fn feedback_routes() -> Router<AppState> {
    Router::new().route("/feedback/:feedback_id", delete(feedback::delete_feedback))
}

/// Gallery posting routes
fn posting_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/postings",
            get(postings::gallery).post(postings::create_posting),
        )
        .route("/postings/managed", get(postings::list_managed_postings))
        .route(
            "/postings/:posting_id",
            get(postings::get_posting)
                .patch(postings::update_posting)
                .delete(postings::delete_posting),
        )
        .route("/postings/:posting_id/photo", put(postings::upload_posting_photo))
}

/// Donation routes
fn donation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/donations",
            get(donations::donation_summary).post(donations::donate),
        )
        .route("/donations/@me", get(donations::my_donations))
}
