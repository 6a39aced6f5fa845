//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, authorization, and orchestration of domain
//! operations.

pub mod approval;
pub mod auth;
mod common;
pub mod context;
pub mod dashboard;
pub mod donation;
pub mod error;
pub mod event;
pub mod feedback;
pub mod history;
pub mod leaderboard;
pub mod posting;
pub mod signup;
pub mod user;

// Re-export all services for convenience
pub use approval::ApprovalService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use dashboard::DashboardService;
pub use donation::DonationService;
pub use error::{ServiceError, ServiceResult};
pub use event::{EventService, EVENT_PHOTO_FOLDER};
pub use feedback::FeedbackService;
pub use history::HistoryService;
pub use leaderboard::LeaderboardService;
pub use posting::{PostingService, POSTING_PHOTO_FOLDER};
pub use signup::SignupService;
pub use user::{UserService, USER_PHOTO_FOLDER};
