//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Money is serialized as a two-decimal string to avoid float rounding.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;

use ngo_core::{
    Amount, ApprovalStatus, CompletionStatus, EventStatus, Identifier, LeaderboardEntry,
    PaymentMethod, Role,
};

// ============================================================================
// Common Response Types
// ============================================================================

/// Format a cent total that may be zero (unlike [`Amount`])
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

// ============================================================================
// Auth / User Responses
// ============================================================================

/// Authentication response with an access token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Organisation details of an organiser account
#[derive(Debug, Clone, Serialize)]
pub struct OrganisationResponse {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// User account
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisation: Option<OrganisationResponse>,
    pub joined_at: DateTime<Utc>,
}

// ============================================================================
// Posting Responses
// ============================================================================

/// Gallery posting
#[derive(Debug, Clone, Serialize)]
pub struct PostingResponse {
    pub id: Identifier,
    pub title: String,
    pub photo_url: String,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Event Responses
// ============================================================================

/// Event with its status derived at response time
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: Identifier,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub photo_url: Option<String>,
    pub status: EventStatus,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Participation Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct VolunteerResponse {
    pub id: Identifier,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipationResponse {
    pub id: i64,
    pub volunteer_id: Identifier,
    pub event_id: Identifier,
    pub shift_start: NaiveDateTime,
    pub shift_end: NaiveDateTime,
    pub work_hours: i32,
    pub points: i32,
    pub completion: CompletionStatus,
    pub approval: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

/// Participation together with its volunteer
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentResponse {
    #[serde(flatten)]
    pub participation: ParticipationResponse,
    pub volunteer: VolunteerResponse,
}

// ============================================================================
// Feedback Responses
// ============================================================================

/// Feedback as shown to readers; anonymous rows carry no volunteer
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackResponse {
    pub id: Identifier,
    pub event_id: Identifier,
    pub volunteer_id: Option<Identifier>,
    pub anonymous: bool,
    pub rating: i16,
    pub comment: String,
    pub submitted_at: NaiveDateTime,
}

/// Whether the caller may submit feedback, with the blocking rule if not
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackEligibilityResponse {
    pub event_id: Identifier,
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ============================================================================
// Donation Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DonationResponse {
    pub id: i64,
    pub donor_email: String,
    pub event_id: Identifier,
    pub amount: Amount,
    pub payment_method: PaymentMethod,
    pub payment_reference: Option<String>,
    pub donated_at: NaiveDateTime,
}

/// All donations with totals, for administrators
#[derive(Debug, Serialize)]
pub struct DonationSummaryResponse {
    pub donations: Vec<DonationResponse>,
    pub donation_count: usize,
    pub total_amount: String,
    pub today_amount: String,
}

// ============================================================================
// History / Leaderboard / Dashboard Responses
// ============================================================================

/// One participation with the event it belongs to
#[derive(Debug, Clone, Serialize)]
pub struct ActivityResponse {
    #[serde(flatten)]
    pub participation: ParticipationResponse,
    pub event_title: String,
    pub event_start_date: NaiveDate,
    pub event_end_date: NaiveDate,
    pub event_status: EventStatus,
}

/// A user's volunteering and donations
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub email: String,
    pub activities: Vec<ActivityResponse>,
    pub donations: Vec<DonationResponse>,
    /// Points from approved participations only
    pub volunteer_points: i64,
    pub donation_points: i64,
    pub total_points: i64,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RoleCounts {
    pub admin: i64,
    pub organiser: i64,
    pub member: i64,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EventStatusCounts {
    pub upcoming: i64,
    pub ongoing: i64,
    pub concluded: i64,
    pub total: i64,
}

/// Administrator overview
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub users: RoleCounts,
    pub events: EventStatusCounts,
    pub pending_approvals: i64,
    pub total_volunteers: i64,
    pub donation_count: i64,
    pub donation_total: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub storage: String,
}

impl ReadinessResponse {
    pub fn ready(storage_healthy: bool) -> Self {
        Self {
            status: if storage_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
