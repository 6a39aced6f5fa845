//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in ngo-core.
//! Each repository handles database operations for a specific domain entity.

mod donation;
mod error;
mod event;
mod feedback;
mod participation;
mod posting;
mod user;
mod volunteer;

pub use donation::PgDonationRepository;
pub use event::PgEventRepository;
pub use feedback::PgFeedbackRepository;
pub use participation::PgParticipationRepository;
pub use posting::PgPostingRepository;
pub use user::PgUserRepository;
pub use volunteer::PgVolunteerRepository;

/// `ILIKE` pattern matching `value` anywhere, with wildcards escaped
pub(crate) fn contains_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("beach"), "%beach%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
