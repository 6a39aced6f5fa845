//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod donations;
pub mod events;
pub mod feedback;
pub mod health;
pub mod leaderboard;
pub mod participations;
pub mod postings;
pub mod users;
