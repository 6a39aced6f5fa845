//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    AccountType, CreateEventRequest, CreatePostingRequest, DonateRequest, EventListQuery,
    FeedbackRequest, LeaderboardQuery, LoginRequest, PostingListQuery, RegisterRequest,
    SignupRequest, UpdateEventRequest, UpdatePostingRequest, UpdateProfileRequest,
};

// Re-export commonly used response types
pub use responses::{
    format_cents, ActivityResponse, AuthResponse, DashboardResponse, DonationResponse,
    DonationSummaryResponse, EnrollmentResponse, EventResponse, EventStatusCounts,
    FeedbackEligibilityResponse, FeedbackResponse, HealthChecks, HealthResponse,
    HistoryResponse, LeaderboardResponse, OrganisationResponse, ParticipationResponse,
    PostingResponse, ReadinessResponse, RoleCounts, UserResponse, VolunteerResponse,
};
