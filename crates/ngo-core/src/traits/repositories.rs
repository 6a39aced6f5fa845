//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.
//!
//! Operations that must be atomic (identifier allocation, signup across the
//! volunteer and participation rows, guarded status updates) are single trait
//! methods so each implementation can run them in one transaction.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::entities::{
    ApprovalStatus, CompletionStatus, Donation, Enrollment, Event, Feedback, NewDonation, NewEvent,
    NewFeedback, NewPosting, NewSignup, Participation, ParticipationStatus, Posting, Role, User,
    Volunteer,
};
use crate::error::DomainError;
use crate::leaderboard::{DonationTally, VolunteerTally};
use crate::value_objects::Identifier;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Event Repository
// ============================================================================

/// Filters for listing events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Only events created by this e-mail
    pub created_by: Option<String>,
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Find event by ID
    async fn find_by_id(&self, id: &Identifier) -> RepoResult<Option<Event>>;

    /// List events matching a query, earliest start first
    async fn list(&self, query: &EventQuery) -> RepoResult<Vec<Event>>;

    /// Allocate the next event ID and insert, atomically
    async fn create(&self, event: &NewEvent) -> RepoResult<Event>;

    /// Update an existing event
    async fn update(&self, event: &Event) -> RepoResult<()>;

    /// Delete an event with its participations and feedback.
    ///
    /// Fails with `EventHasDonations` when donations reference the event.
    async fn delete(&self, id: &Identifier) -> RepoResult<()>;
}

// ============================================================================
// Volunteer Repository
// ============================================================================

#[async_trait]
pub trait VolunteerRepository: Send + Sync {
    /// Find volunteer by ID
    async fn find_by_id(&self, id: &Identifier) -> RepoResult<Option<Volunteer>>;

    /// Find volunteer by e-mail
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Volunteer>>;

    /// Number of volunteers
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Participation Repository
// ============================================================================

#[async_trait]
pub trait ParticipationRepository: Send + Sync {
    /// Find participation by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Participation>>;

    /// Find the participation of the volunteer with `email` for an event
    async fn find_by_event_and_email(
        &self,
        event_id: &Identifier,
        email: &str,
    ) -> RepoResult<Option<Participation>>;

    /// Participations of an event with their volunteers
    async fn list_by_event(&self, event_id: &Identifier) -> RepoResult<Vec<Enrollment>>;

    /// Participations of the volunteer with `email`, newest shift first
    async fn list_by_email(&self, email: &str) -> RepoResult<Vec<Participation>>;

    /// Pending participations, optionally restricted to events created by `created_by`
    async fn list_pending(&self, created_by: Option<&str>) -> RepoResult<Vec<Enrollment>>;

    /// Find or create the volunteer by e-mail and insert the participation, atomically.
    ///
    /// Fails with `DuplicateSignup` when the volunteer already has a
    /// participation for the event.
    async fn sign_up(&self, signup: &NewSignup) -> RepoResult<Enrollment>;

    /// Set the approval status if both axes still equal `expected`
    async fn update_approval(
        &self,
        id: i64,
        expected: ParticipationStatus,
        target: ApprovalStatus,
    ) -> RepoResult<Participation>;

    /// Set the completion status if both axes still equal `expected`
    async fn update_completion(
        &self,
        id: i64,
        expected: ParticipationStatus,
        target: CompletionStatus,
    ) -> RepoResult<Participation>;

    /// Approved participations aggregated per volunteer e-mail
    async fn approved_tallies(&self) -> RepoResult<Vec<VolunteerTally>>;

    /// Number of pending participations
    async fn count_pending(&self) -> RepoResult<i64>;
}

// ============================================================================
// Donation Repository
// ============================================================================

#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Record a donation
    async fn create(&self, donation: &NewDonation) -> RepoResult<Donation>;

    /// Donations by a donor, newest first
    async fn list_by_donor(&self, email: &str) -> RepoResult<Vec<Donation>>;

    /// All donations, newest first
    async fn list_all(&self) -> RepoResult<Vec<Donation>>;

    /// Donations aggregated per donor e-mail
    async fn tallies(&self) -> RepoResult<Vec<DonationTally>>;
}

// ============================================================================
// Feedback Repository
// ============================================================================

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Find feedback by ID
    async fn find_by_id(&self, id: &Identifier) -> RepoResult<Option<Feedback>>;

    /// List feedback, optionally for one event, newest first
    async fn list(&self, event_id: Option<&Identifier>) -> RepoResult<Vec<Feedback>>;

    /// Whether `submitter` already gave feedback for the event, anonymous or not
    async fn exists_for(&self, submitter: &Identifier, event_id: &Identifier) -> RepoResult<bool>;

    /// Allocate the next feedback ID and insert, atomically.
    ///
    /// Fails with `FeedbackAlreadySubmitted` on a second submission.
    async fn create(&self, feedback: &NewFeedback) -> RepoResult<Feedback>;

    /// Delete feedback
    async fn delete(&self, id: &Identifier) -> RepoResult<()>;
}

// ============================================================================
// Posting Repository
// ============================================================================

/// Filters for listing postings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingQuery {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Only postings created by this e-mail
    pub created_by: Option<String>,
}

#[async_trait]
pub trait PostingRepository: Send + Sync {
    /// Find posting by ID
    async fn find_by_id(&self, id: &Identifier) -> RepoResult<Option<Posting>>;

    /// List postings matching a query, in identifier order
    async fn list(&self, query: &PostingQuery) -> RepoResult<Vec<Posting>>;

    /// Allocate the next posting ID and insert, atomically
    async fn create(&self, posting: &NewPosting) -> RepoResult<Posting>;

    /// Update the title and photo of an existing posting
    async fn update(&self, posting: &Posting) -> RepoResult<()>;

    /// Delete a posting
    async fn delete(&self, id: &Identifier) -> RepoResult<()>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by e-mail
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if e-mail is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update the name and profile of an existing user; the role never changes
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, email: &str) -> RepoResult<Option<String>>;

    /// All users, by join date
    async fn list(&self) -> RepoResult<Vec<User>>;

    /// Number of users per role
    async fn count_by_role(&self) -> RepoResult<HashMap<Role, i64>>;

    /// Display names for the given e-mails; unknown addresses are absent
    async fn display_names(&self, emails: &[String]) -> RepoResult<HashMap<String, String>>;
}
