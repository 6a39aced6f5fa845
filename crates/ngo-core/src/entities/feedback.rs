//! Feedback entity - a volunteer's rating of a concluded event

use chrono::NaiveDateTime;

use crate::value_objects::Identifier;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;
pub const MAX_COMMENT_LEN: u64 = 1000;

/// Feedback entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub id: Identifier,
    pub event_id: Identifier,
    /// `None` for anonymous feedback
    pub volunteer_id: Option<Identifier>,
    pub rating: i16,
    pub comment: String,
    pub submitted_at: NaiveDateTime,
}

impl Feedback {
    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.volunteer_id.is_none()
    }
}

/// Data for new feedback.
///
/// `submitter` is always the eligible volunteer and is kept by storage as the
/// deduplication key even when `anonymous` hides it from readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub event_id: Identifier,
    pub submitter: Identifier,
    pub anonymous: bool,
    pub rating: i16,
    pub comment: String,
    pub submitted_at: NaiveDateTime,
}

impl NewFeedback {
    /// Volunteer reference visible on the stored record
    pub fn visible_volunteer(&self) -> Option<Identifier> {
        (!self.anonymous).then(|| self.submitter.clone())
    }
}
