//! # ngo-core
//!
//! Domain layer for the NGO volunteer platform: entities, value objects,
//! authorization policy, leaderboard ranking, and the ports (repositories,
//! clock, notifier, photo store) implemented by infrastructure crates.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod leaderboard;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    derive_status, is_valid_card_number, is_valid_mobile_number, normalize_card_number,
    normalize_email, points_for, ApprovalStatus, CompletionStatus, Donation, Enrollment, Event,
    EventSchedule, EventStatus, Feedback, NewDonation, NewEvent, NewFeedback, NewParticipation,
    NewPosting, NewSignup, Participation, ParticipationStatus, PaymentMethod, Posting, Role, User,
    UserProfile, Volunteer, VolunteerDetails, DEFAULT_POINTS_PER_HOUR, MAX_COMMENT_LEN,
    MAX_POSTING_TITLE_LEN, MAX_RATING, MAX_VOLUNTEER_AGE, MAX_WORK_HOURS, MIN_RATING,
    MIN_VOLUNTEER_AGE, MIN_WORK_HOURS,
};
pub use error::DomainError;
pub use leaderboard::{rank_leaderboard, DonationTally, LeaderboardEntry, VolunteerTally};
pub use policy::{
    can_manage_event, can_manage_posting, require_admin, require_event_access,
    require_event_manager, require_posting_access, Actor,
};
pub use traits::{
    Clock, DonationRepository, EventQuery, EventRepository, FeedbackRepository, ManualClock,
    Notifier, NotifyError, ParticipationRepository, PhotoError, PhotoStore, PostingQuery,
    PostingRepository, RepoResult, SystemClock, UserRepository, VolunteerRepository,
};
pub use value_objects::{
    Amount, AmountError, Identifier, IdentifierError, IdentifierKind, PhotoUpload,
    MAX_AMOUNT_CENTS, MAX_PHOTO_BYTES,
};
