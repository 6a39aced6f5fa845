//! Participation database models

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;

/// Database model for participations table
#[derive(Debug, Clone, FromRow)]
pub struct ParticipationModel {
    pub id: i64,
    pub volunteer_id: String,
    pub event_id: String,
    pub shift_start: NaiveDateTime,
    pub work_hours: i32,
    pub points: i32,
    pub completion: String,
    pub approval: String,
    pub created_at: DateTime<Utc>,
}

/// Participation joined with its volunteer
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentModel {
    #[sqlx(flatten)]
    pub participation: ParticipationModel,
    pub volunteer_name: String,
    pub volunteer_email: String,
    pub volunteer_phone: String,
    pub volunteer_age: i32,
}
