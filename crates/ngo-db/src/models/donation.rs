//! Donation database model

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Database model for donations table
#[derive(Debug, Clone, FromRow)]
pub struct DonationModel {
    pub id: i64,
    pub donor_email: String,
    pub event_id: String,
    pub amount_cents: i64,
    pub payment_method: String,
    pub payment_reference: Option<String>,
    pub donated_at: NaiveDateTime,
}
