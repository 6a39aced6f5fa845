//! Volunteer database model

use sqlx::FromRow;

/// Database model for volunteers table
#[derive(Debug, Clone, FromRow)]
pub struct VolunteerModel {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
}
