//! Posting entity - a titled photo shown in the public gallery

use chrono::{DateTime, Utc};

use crate::value_objects::Identifier;

pub const MAX_POSTING_TITLE_LEN: usize = 100;

/// Posting entity; every posting carries a photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub id: Identifier,
    pub title: String,
    pub photo_url: String,
    /// Creator e-mail; legacy postings have none
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Posting {
    /// Check whether `email` created this posting
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.created_by
            .as_deref()
            .is_some_and(|owner| owner.eq_ignore_ascii_case(email))
    }
}

/// Data for a new posting; the identifier is allocated by storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPosting {
    pub title: String,
    pub photo_url: String,
    pub created_by: Option<String>,
}
