//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table (password hash excluded)
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub email: String,
    pub name: String,
    pub role: String,
    pub photo_url: Option<String>,
    pub org_name: Option<String>,
    pub org_address: Option<String>,
    pub org_phone: Option<String>,
    pub joined_at: DateTime<Utc>,
}
