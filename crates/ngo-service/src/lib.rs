//! # ngo-service
//!
//! Application layer containing business logic, services, DTOs, and the
//! notifier and photo store adapters.

pub mod adapters;
pub mod dto;
pub mod services;

pub use adapters::{LocalPhotoStore, LogNotifier, SmtpNotifier};
pub use services::{
    ApprovalService, AuthService, DashboardService, DonationService, EventService,
    FeedbackService, HistoryService, LeaderboardService, PostingService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ServiceSettings, SignupService,
    UserService, EVENT_PHOTO_FOLDER, POSTING_PHOTO_FOLDER, USER_PHOTO_FOLDER,
};
