//! # ngo-api
//!
//! REST API server for the NGO volunteer platform built with the Axum framework.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, create_app_state_with_clock, run, serve};
pub use state::AppState;
