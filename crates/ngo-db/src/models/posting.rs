//! Posting database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for postings table
#[derive(Debug, Clone, FromRow)]
pub struct PostingModel {
    pub id: String,
    pub title: String,
    pub photo_url: String,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}
