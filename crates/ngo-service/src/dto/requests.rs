//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Services call `validate()` again, so in-process callers get the same checks.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use ngo_common::password_problems;
use ngo_core::{is_valid_mobile_number, Amount, PaymentMethod};

// ============================================================================
// Custom validators
// ============================================================================

fn validate_mobile_number(phone: &str) -> Result<(), ValidationError> {
    if is_valid_mobile_number(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("mobile_number")
            .with_message("Phone must be a Malaysian mobile number (e.g. 0123456789).".into()))
    }
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let problems = password_problems(password);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength").with_message(problems.join("; ").into()))
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message("Value cannot be blank.".into()))
    } else {
        Ok(())
    }
}

// ============================================================================
// Auth Requests
// ============================================================================

/// Account type chosen at registration; admins are only bootstrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[default]
    Member,
    Organiser,
}

/// User registration request
///
/// Organisation fields are required for organisers and ignored for members.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(
        length(max = 72, message = "Password must be at most 72 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,

    #[serde(default)]
    pub account_type: AccountType,

    #[validate(length(min = 1, max = 200, message = "Organisation name must be 1-200 characters"))]
    pub org_name: Option<String>,

    #[validate(length(
        min = 1,
        max = 300,
        message = "Organisation address must be 1-300 characters"
    ))]
    pub org_address: Option<String>,

    #[validate(custom(function = "validate_mobile_number"))]
    pub org_phone: Option<String>,
}

/// Profile update; an absent name keeps the current one
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

// ============================================================================
// Event Requests
// ============================================================================

/// Create event request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(
        length(min = 1, max = 100, message = "Title must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,

    #[validate(
        length(min = 1, max = 100, message = "Location must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub location: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Update event request; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(
        length(min = 1, max = 100, message = "Title must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[validate(
        length(min = 1, max = 100, message = "Location must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub location: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// Event list filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListQuery {
    /// Case-insensitive title substring
    pub title: Option<String>,
    /// Creator e-mail
    pub created_by: Option<String>,
}

// ============================================================================
// Posting Requests
// ============================================================================

/// Create posting request; the photo travels separately
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostingRequest {
    #[validate(
        length(min = 1, max = 100, message = "Title must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePostingRequest {
    #[validate(
        length(min = 1, max = 100, message = "Title must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,
}

/// Posting list filters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostingListQuery {
    /// Case-insensitive title substring
    pub title: Option<String>,
}

// ============================================================================
// Signup Requests
// ============================================================================

/// Volunteer signup request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_mobile_number"))]
    pub phone: String,

    #[validate(range(min = 18, max = 120, message = "Age must be between 18 and 120"))]
    pub age: i32,

    /// Local date and time the shift begins
    pub shift_start: NaiveDateTime,

    #[validate(range(min = 1, max = 12, message = "Work hours must be between 1 and 12"))]
    pub work_hours: i32,
}

// ============================================================================
// Feedback Requests
// ============================================================================

/// Submit feedback request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeedbackRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Comment must be at most 1000 characters"))]
    pub comment: String,

    /// Hide the volunteer reference on the stored feedback
    #[serde(default)]
    pub anonymous: bool,
}

// ============================================================================
// Donation Requests
// ============================================================================

/// Donation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DonateRequest {
    pub event_id: String,

    /// Accepts `"75.50"` or `75.5`
    pub amount: Amount,

    pub payment_method: PaymentMethod,

    /// Required for card payments; never stored
    pub card_number: Option<String>,
}

// ============================================================================
// Leaderboard Requests
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub top: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignupRequest {
        SignupRequest {
            name: "Aina".to_string(),
            email: "aina@example.com".to_string(),
            phone: "0123456789".to_string(),
            age: 25,
            shift_start: NaiveDate::from_ymd_opt(2026, 5, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            work_hours: 4,
        }
    }

    #[test]
    fn test_valid_signup() {
        assert!(signup().validate().is_ok());
    }

    #[test]
    fn test_signup_reports_every_field() {
        let request = SignupRequest {
            name: String::new(),
            email: "not-an-email".to_string(),
            phone: "12345".to_string(),
            age: 15,
            work_hours: 13,
            ..signup()
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "email", "phone", "age", "work_hours"] {
            assert!(fields.contains_key(field), "missing {field}");
        }
    }

    #[test]
    fn test_weak_password_rejected() {
        let request = RegisterRequest {
            email: "a@example.com".to_string(),
            name: "A".to_string(),
            password: "short".to_string(),
            account_type: AccountType::Member,
            org_name: None,
            org_address: None,
            org_phone: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_blank_titles_and_names_rejected() {
        let posting = CreatePostingRequest {
            title: "   ".to_string(),
        };
        assert!(posting.validate().is_err());

        let profile = UpdateProfileRequest {
            name: Some(String::new()),
        };
        assert!(profile.validate().is_err());
        assert!(UpdateProfileRequest::default().validate().is_ok());
    }

    #[test]
    fn test_feedback_rating_bounds() {
        let request = FeedbackRequest {
            rating: 6,
            comment: String::new(),
            anonymous: false,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_donation_amount_accepts_string() {
        let request: DonateRequest = serde_json::from_str(
            r#"{"event_id":"E001","amount":"75.50","payment_method":"online_banking"}"#,
        )
        .unwrap();
        assert_eq!(request.amount.cents(), 7550);
        assert_eq!(request.payment_method, PaymentMethod::OnlineBanking);
    }
}
