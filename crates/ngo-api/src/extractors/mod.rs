//! Axum extractors for request handling
//!
//! Custom extractors for authentication, JSON bodies, path ids and photo uploads.

mod auth;
mod path;
mod photo;
mod validated;

pub use auth::AuthUser;
pub use path::ParticipationIdPath;
pub use photo::{PhotoBody, FILE_NAME_HEADER};
pub use validated::{JsonBody, ValidatedJson};
