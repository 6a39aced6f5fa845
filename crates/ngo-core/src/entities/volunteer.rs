//! Volunteer entity - a person who signs up for event shifts

use serde::{Deserialize, Serialize};

use crate::value_objects::Identifier;

pub const MIN_VOLUNTEER_AGE: i32 = 18;
pub const MAX_VOLUNTEER_AGE: i32 = 120;

/// Volunteer entity, unique per e-mail address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: Identifier,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
}

/// Personal details captured at signup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolunteerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: i32,
}

/// Trim and lower-case an e-mail address so it can be used as a join key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Check a Malaysian mobile number: `+60` or `0`, a non-zero digit, then 7 to 9 digits
pub fn is_valid_mobile_number(phone: &str) -> bool {
    let rest = if let Some(rest) = phone.strip_prefix("+60") {
        rest
    } else if let Some(rest) = phone.strip_prefix('0') {
        rest
    } else {
        return false;
    };

    let bytes = rest.as_bytes();
    match bytes.split_first() {
        Some((first, tail)) => {
            (b'1'..=b'9').contains(first)
                && (7..=9).contains(&tail.len())
                && tail.iter().all(u8::is_ascii_digit)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_numbers() {
        assert!(is_valid_mobile_number("0123456789"));
        assert!(is_valid_mobile_number("+60123456789"));
        assert!(is_valid_mobile_number("012345678"));
        assert!(is_valid_mobile_number("01234567890"));

        assert!(!is_valid_mobile_number("0023456789"));
        assert!(!is_valid_mobile_number("0123456"));
        assert!(!is_valid_mobile_number("01234567"));
        assert!(!is_valid_mobile_number("012345678901"));
        assert!(!is_valid_mobile_number("+6512345678"));
        assert!(!is_valid_mobile_number("012-3456789"));
        assert!(!is_valid_mobile_number(""));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  User@X.com "), "user@x.com");
    }
}
