//! Aggregate query rows

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Approved participations grouped by volunteer e-mail
#[derive(Debug, Clone, FromRow)]
pub struct VolunteerTallyModel {
    pub email: String,
    pub points: i64,
    pub event_count: i64,
    pub last_shift: Option<NaiveDateTime>,
}

/// Donations grouped by donor e-mail
#[derive(Debug, Clone, FromRow)]
pub struct DonationTallyModel {
    pub email: String,
    pub total_cents: i64,
    pub donation_count: i64,
    pub last_donation: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, FromRow)]
pub struct RoleCountModel {
    pub role: String,
    pub count: i64,
}
