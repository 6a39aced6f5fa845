//! Entity to model mappers
//!
//! Rows are converted with `TryFrom<Model> for Entity`: text columns holding
//! identifiers and statuses are parsed, and a row that does not parse is
//! reported as a database error rather than silently defaulted.

mod donation;
mod event;
mod feedback;
mod participation;
mod posting;
mod tally;
mod user;
mod volunteer;

use ngo_core::{DomainError, Identifier, IdentifierKind};

pub use user::{profile_columns, ProfileColumns};

/// Parse an identifier column of a known kind
pub(crate) fn parse_identifier(
    kind: IdentifierKind,
    value: &str,
) -> Result<Identifier, DomainError> {
    Identifier::parse_kind(kind, value).map_err(|e| corrupt_row(kind.to_string(), e))
}

/// Parse an enum column stored as text
pub(crate) fn parse_column<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| corrupt_row(column, e))
}

pub(crate) fn corrupt_row(
    column: impl std::fmt::Display,
    reason: impl std::fmt::Display,
) -> DomainError {
    DomainError::DatabaseError(format!("invalid {column} column: {reason}"))
}
