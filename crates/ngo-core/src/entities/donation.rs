//! Donation entity - an immutable record of money given to an event

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::value_objects::{Amount, Identifier};

/// How a donation was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    OnlineBanking,
    EWallet,
}

impl PaymentMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::OnlineBanking => "online_banking",
            Self::EWallet => "e_wallet",
        }
    }

    /// Card methods must carry a card number
    #[inline]
    pub const fn requires_card(self) -> bool {
        matches!(self, Self::CreditCard | Self::DebitCard)
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit_card" => Ok(Self::CreditCard),
            "debit_card" => Ok(Self::DebitCard),
            "online_banking" => Ok(Self::OnlineBanking),
            "e_wallet" => Ok(Self::EWallet),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

/// Donation entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donation {
    pub id: i64,
    pub donor_email: String,
    pub event_id: Identifier,
    pub amount: Amount,
    pub payment_method: PaymentMethod,
    /// Masked card digits and fingerprint; never the raw number
    pub payment_reference: Option<String>,
    pub donated_at: NaiveDateTime,
}

/// Data for a new donation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDonation {
    pub donor_email: String,
    pub event_id: Identifier,
    pub amount: Amount,
    pub payment_method: PaymentMethod,
    pub payment_reference: Option<String>,
    pub donated_at: NaiveDateTime,
}

/// Strip spaces and dashes from a card number
pub fn normalize_card_number(number: &str) -> String {
    number.chars().filter(|c| !matches!(c, ' ' | '-')).collect()
}

/// Check length (13 to 19 digits) and the Luhn checksum
pub fn is_valid_card_number(number: &str) -> bool {
    let digits = normalize_card_number(number);
    if !(13..=19).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// Last four digits of a card number for display
pub fn last_four(number: &str) -> String {
    let digits = normalize_card_number(number);
    let start = digits.len().saturating_sub(4);
    digits[start..].to_string()
}
