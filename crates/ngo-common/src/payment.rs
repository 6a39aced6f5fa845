//! Payment instrument references
//!
//! Card numbers are never stored. A donation keeps the last four digits and a
//! peppered SHA-256 fingerprint, enough to recognise a repeat card without
//! being able to recover it.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use ngo_core::entities::{last_four, normalize_card_number};
use sha2::{Digest, Sha256};

/// Bytes of the digest kept in the reference
const FINGERPRINT_BYTES: usize = 12;

/// Builds stored references for card payments
#[derive(Clone)]
pub struct PaymentReferencer {
    pepper: String,
}

impl PaymentReferencer {
    #[must_use]
    pub fn new(pepper: impl Into<String>) -> Self {
        Self {
            pepper: pepper.into(),
        }
    }

    /// Reference of the form `card:1111:<fingerprint>`
    #[must_use]
    pub fn reference(&self, card_number: &str) -> String {
        let digits = normalize_card_number(card_number);
        let mut hasher = Sha256::new();
        hasher.update(self.pepper.as_bytes());
        hasher.update(digits.as_bytes());
        let digest = hasher.finalize();
        format!(
            "card:{}:{}",
            last_four(&digits),
            URL_SAFE_NO_PAD.encode(&digest[..FINGERPRINT_BYTES])
        )
    }
}

impl std::fmt::Debug for PaymentReferencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentReferencer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_hides_number() {
        let referencer = PaymentReferencer::new("pepper");
        let reference = referencer.reference("4111 1111 1111 1111");
        assert!(reference.starts_with("card:1111:"));
        assert!(!reference.contains("41111111"));
    }

    #[test]
    fn test_reference_is_stable_per_card() {
        let referencer = PaymentReferencer::new("pepper");
        assert_eq!(
            referencer.reference("4111-1111-1111-1111"),
            referencer.reference("4111111111111111")
        );
        assert_ne!(
            referencer.reference("4111111111111111"),
            PaymentReferencer::new("other").reference("4111111111111111")
        );
    }
}
