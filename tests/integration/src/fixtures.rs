//! Test fixtures and data generators
//!
//! Request bodies shaped like the API expects. Event dates sit after the
//! test clock's start so events begin as upcoming.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

pub const ADMIN_EMAIL: &str = "admin@ngo.test";
pub const ADMIN_PASSWORD: &str = "Admin12345";
pub const PASSWORD: &str = "Volunteer123";

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub account_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_phone: Option<String>,
}

impl RegisterRequest {
    pub fn member(email: &str) -> Self {
        Self {
            email: email.to_string(),
            name: format!("Member {}", unique_suffix()),
            password: PASSWORD.to_string(),
            account_type: "member".to_string(),
            org_name: None,
            org_address: None,
            org_phone: None,
        }
    }

    pub fn organiser(email: &str) -> Self {
        Self {
            email: email.to_string(),
            name: "Green Earth".to_string(),
            password: PASSWORD.to_string(),
            account_type: "organiser".to_string(),
            org_name: Some("Green Earth Society".to_string()),
            org_address: Some("George Town, Penang".to_string()),
            org_phone: Some("0123456789".to_string()),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Create event request: 10-11 May 2026, 09:00 to 17:00
#[derive(Debug, Clone, Serialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
}

impl Default for CreateEventRequest {
    fn default() -> Self {
        Self {
            title: "Beach cleanup".to_string(),
            description: "Bring gloves and water".to_string(),
            location: "Port Dickson".to_string(),
            start_date: "2026-05-10".to_string(),
            end_date: "2026-05-11".to_string(),
            start_time: "09:00:00".to_string(),
            end_time: "17:00:00".to_string(),
        }
    }
}

/// Volunteer signup request: a four hour shift on the first event day
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
    pub shift_start: String,
    pub work_hours: i32,
}

impl SignupRequest {
    pub fn new(email: &str) -> Self {
        Self {
            name: "Aina Rahman".to_string(),
            email: email.to_string(),
            phone: "0123456789".to_string(),
            age: 24,
            shift_start: "2026-05-10T09:00:00".to_string(),
            work_hours: 4,
        }
    }
}

/// Feedback request
#[derive(Debug, Serialize)]
pub struct FeedbackRequest {
    pub rating: i16,
    pub comment: String,
    pub anonymous: bool,
}

/// Donation request
#[derive(Debug, Serialize)]
pub struct DonateRequest {
    pub event_id: String,
    pub amount: String,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
}

impl DonateRequest {
    pub fn banking(event_id: &str, amount: &str) -> Self {
        Self {
            event_id: event_id.to_string(),
            amount: amount.to_string(),
            payment_method: "online_banking".to_string(),
            card_number: None,
        }
    }

    pub fn card(event_id: &str, amount: &str, card_number: &str) -> Self {
        Self {
            event_id: event_id.to_string(),
            amount: amount.to_string(),
            payment_method: "credit_card".to_string(),
            card_number: Some(card_number.to_string()),
        }
    }
}
