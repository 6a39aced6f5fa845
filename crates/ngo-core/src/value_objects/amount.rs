//! Currency amount held as integer cents

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Error when parsing an amount
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount must be a number with at most two decimal places")]
    InvalidFormat,

    #[error("amount must be greater than zero")]
    NotPositive,

    #[error("amount cannot exceed 1000000000.00")]
    TooLarge,
}

/// Largest accepted amount: 1,000,000,000.00
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000;

/// Positive two-decimal currency amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Create from a number of cents
    pub fn from_cents(cents: i64) -> Result<Self, AmountError> {
        if cents <= 0 {
            return Err(AmountError::NotPositive);
        }
        if cents > MAX_AMOUNT_CENTS {
            return Err(AmountError::TooLarge);
        }
        Ok(Self(cents))
    }

    /// Total in cents; saturates instead of overflowing
    pub fn sum_cents<I>(amounts: I) -> i64
    where
        I: IntoIterator<Item = Amount>,
    {
        amounts
            .into_iter()
            .fold(0_i64, |total, amount| total.saturating_add(amount.0))
    }

    /// Parse a decimal string such as `75.50`, `75.5` or `75`
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        let s = s.trim();
        let (whole, fraction) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty()
            || fraction.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(AmountError::InvalidFormat);
        }

        let units: i64 = whole.parse().map_err(|_| AmountError::TooLarge)?;
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| AmountError::InvalidFormat)? * 10,
            _ => fraction.parse().map_err(|_| AmountError::InvalidFormat)?,
        };

        let total = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .ok_or(AmountError::TooLarge)?;
        Self::from_cents(total)
    }

    #[inline]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Whole currency units, fractional part truncated
    #[inline]
    pub const fn whole_units(self) -> i64 {
        self.0 / 100
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl std::str::FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse(s)
    }
}

// Serialize as a decimal string to avoid float rounding on the client
impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

// Deserialize from a decimal string or a JSON number
impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AmountVisitor;

        impl de::Visitor<'_> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a positive amount with at most two decimal places")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                Amount::parse(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                let units = i64::try_from(v).map_err(|_| E::custom(AmountError::TooLarge))?;
                units
                    .checked_mul(100)
                    .ok_or_else(|| E::custom(AmountError::TooLarge))
                    .and_then(|c| Amount::from_cents(c).map_err(E::custom))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                v.checked_mul(100)
                    .ok_or_else(|| E::custom(AmountError::TooLarge))
                    .and_then(|c| Amount::from_cents(c).map_err(E::custom))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
                // Round-trip through the two-decimal text form so 75.5 and 75.50 agree
                Amount::parse(&format!("{v:.2}")).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}
