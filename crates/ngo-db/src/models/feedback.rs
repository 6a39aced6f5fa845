//! Feedback database model

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Database model for feedback table.
///
/// `submitted_by` is deliberately not selected; it only backs the
/// one-submission-per-volunteer constraint.
#[derive(Debug, Clone, FromRow)]
pub struct FeedbackModel {
    pub id: String,
    pub event_id: String,
    pub volunteer_id: Option<String>,
    pub rating: i16,
    pub comment: String,
    pub submitted_at: NaiveDateTime,
}
