//! Human-readable sequential identifiers (`E004`, `V012`, `F003`, `P001`)
//!
//! Structure: one uppercase prefix letter naming the entity type followed by a
//! three digit, zero padded sequence number. Sequences start at `001` for every
//! entity type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Entity types that carry a prefixed identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    Event,
    Volunteer,
    Feedback,
    Posting,
}

impl IdentifierKind {
    /// Prefix letter used in the textual form
    pub const fn prefix(self) -> char {
        match self {
            Self::Event => 'E',
            Self::Volunteer => 'V',
            Self::Feedback => 'F',
            Self::Posting => 'P',
        }
    }

    fn from_prefix(c: char) -> Option<Self> {
        match c {
            'E' => Some(Self::Event),
            'V' => Some(Self::Volunteer),
            'F' => Some(Self::Feedback),
            'P' => Some(Self::Posting),
            _ => None,
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Event => "event",
            Self::Volunteer => "volunteer",
            Self::Feedback => "feedback",
            Self::Posting => "posting",
        };
        f.write_str(name)
    }
}

/// Error when parsing or allocating an identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("invalid identifier: {0}")]
    InvalidFormat(String),

    #[error("no identifiers left for {0}")]
    Exhausted(IdentifierKind),
}

/// Prefixed identifier such as `E001`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    kind: IdentifierKind,
    sequence: u16,
}

impl Identifier {
    /// Largest sequence number representable in three digits
    pub const MAX_SEQUENCE: u16 = 999;

    /// Build an identifier from its parts
    pub fn new(kind: IdentifierKind, sequence: u16) -> Result<Self, IdentifierError> {
        if sequence > Self::MAX_SEQUENCE {
            return Err(IdentifierError::Exhausted(kind));
        }
        Ok(Self { kind, sequence })
    }

    /// First identifier handed out for a kind
    pub const fn first(kind: IdentifierKind) -> Self {
        Self { kind, sequence: 1 }
    }

    /// Compute the identifier following the current maximum stored value.
    ///
    /// A missing maximum, or one that does not parse as an identifier of the
    /// same kind, yields the first identifier.
    pub fn next(kind: IdentifierKind, current_max: Option<&str>) -> Result<Self, IdentifierError> {
        let Some(current) = current_max.and_then(|s| Self::parse(s).ok()) else {
            return Ok(Self::first(kind));
        };
        if current.kind != kind {
            return Ok(Self::first(kind));
        }
        if current.sequence >= Self::MAX_SEQUENCE {
            return Err(IdentifierError::Exhausted(kind));
        }
        Self::new(kind, current.sequence + 1)
    }

    /// Parse the textual form (`E007`)
    pub fn parse(s: &str) -> Result<Self, IdentifierError> {
        let invalid = || IdentifierError::InvalidFormat(s.to_string());
        let mut chars = s.chars();
        let kind = chars
            .next()
            .and_then(IdentifierKind::from_prefix)
            .ok_or_else(invalid)?;
        let digits = chars.as_str();
        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let sequence = digits.parse::<u16>().map_err(|_| invalid())?;
        Ok(Self { kind, sequence })
    }

    /// Parse and require a specific kind
    pub fn parse_kind(kind: IdentifierKind, s: &str) -> Result<Self, IdentifierError> {
        let id = Self::parse(s)?;
        if id.kind == kind {
            Ok(id)
        } else {
            Err(IdentifierError::InvalidFormat(s.to_string()))
        }
    }

    #[inline]
    pub const fn kind(&self) -> IdentifierKind {
        self.kind
    }

    #[inline]
    pub const fn sequence(&self) -> u16 {
        self.sequence
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.kind.prefix(), self.sequence)
    }
}

impl std::str::FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::parse(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Identifier::parse(&s).map_err(serde::de::Error::custom)
    }
}
