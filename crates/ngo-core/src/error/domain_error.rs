//! Domain errors - error types for the domain layer

use thiserror::Error;
use validator::ValidationErrors;

use crate::value_objects::{AmountError, Identifier, IdentifierError, IdentifierKind};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Event not found: {0}")]
    EventNotFound(Identifier),

    #[error("Volunteer not found: {0}")]
    VolunteerNotFound(Identifier),

    #[error("Participation not found: {0}")]
    ParticipationNotFound(i64),

    #[error("Feedback not found: {0}")]
    FeedbackNotFound(Identifier),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Posting not found: {0}")]
    PostingNotFound(Identifier),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Validation failed: {0}")]
    InvalidFields(ValidationErrors),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Role {0} may not perform this action")]
    InsufficientRole(String),

    #[error("Only the event organiser may manage this event")]
    NotEventOwner,

    #[error("Only the creator of this posting may manage it")]
    NotPostingOwner,

    #[error("Only approved volunteers of this event may submit feedback")]
    NotApprovedVolunteer,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Volunteer already signed up for this event")]
    DuplicateSignup,

    #[error("Feedback already submitted for this event")]
    FeedbackAlreadySubmitted,

    #[error("Cannot change status from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },

    #[error("Record was modified concurrently")]
    ConcurrentModification,

    #[error("Event has recorded donations and cannot be deleted")]
    EventHasDonations,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Cannot register for a concluded event")]
    EventConcluded,

    #[error("Feedback opens after the event has ended")]
    FeedbackNotOpen,

    #[error("Only approved participations can be completed")]
    CompletionRequiresApproval,

    #[error("No identifiers left for {0}")]
    IdentifierExhausted(IdentifierKind),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::EventNotFound(_) => "UNKNOWN_EVENT",
            Self::VolunteerNotFound(_) => "UNKNOWN_VOLUNTEER",
            Self::ParticipationNotFound(_) => "UNKNOWN_PARTICIPATION",
            Self::FeedbackNotFound(_) => "UNKNOWN_FEEDBACK",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostingNotFound(_) => "UNKNOWN_POSTING",

            // Validation
            Self::ValidationError(_) | Self::InvalidFields(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",

            // Authorization
            Self::InsufficientRole(_) => "INSUFFICIENT_ROLE",
            Self::NotEventOwner => "NOT_EVENT_OWNER",
            Self::NotPostingOwner => "NOT_POSTING_OWNER",
            Self::NotApprovedVolunteer => "NOT_APPROVED_VOLUNTEER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::DuplicateSignup => "DUPLICATE_SIGNUP",
            Self::FeedbackAlreadySubmitted => "FEEDBACK_ALREADY_SUBMITTED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
            Self::EventHasDonations => "EVENT_HAS_DONATIONS",

            // Business Rules
            Self::EventConcluded => "EVENT_CONCLUDED",
            Self::FeedbackNotOpen => "FEEDBACK_NOT_OPEN",
            Self::CompletionRequiresApproval => "COMPLETION_REQUIRES_APPROVAL",
            Self::IdentifierExhausted(_) => "IDENTIFIER_EXHAUSTED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EventNotFound(_)
                | Self::VolunteerNotFound(_)
                | Self::ParticipationNotFound(_)
                | Self::FeedbackNotFound(_)
                | Self::UserNotFound(_)
                | Self::PostingNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidFields(_)
                | Self::InvalidEmail
                | Self::InvalidIdentifier(_)
                | Self::InvalidAmount(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::InsufficientRole(_)
                | Self::NotEventOwner
                | Self::NotPostingOwner
                | Self::NotApprovedVolunteer
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::DuplicateSignup
                | Self::FeedbackAlreadySubmitted
                | Self::InvalidTransition { .. }
                | Self::ConcurrentModification
                | Self::EventHasDonations
        )
    }

    /// Check if this is a business rule violation
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::EventConcluded
                | Self::FeedbackNotOpen
                | Self::CompletionRequiresApproval
                | Self::IdentifierExhausted(_)
        )
    }

    /// Per-field validation errors, when this error carries them
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::InvalidFields(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        Self::InvalidFields(errors)
    }
}

impl From<IdentifierError> for DomainError {
    fn from(err: IdentifierError) -> Self {
        match err {
            IdentifierError::InvalidFormat(s) => Self::InvalidIdentifier(s),
            IdentifierError::Exhausted(kind) => Self::IdentifierExhausted(kind),
        }
    }
}
