//! Posting entity <-> model mapper

use ngo_core::{DomainError, IdentifierKind, Posting};

use super::parse_identifier;
use crate::models::PostingModel;

impl TryFrom<PostingModel> for Posting {
    type Error = DomainError;

    fn try_from(model: PostingModel) -> Result<Self, Self::Error> {
        Ok(Posting {
            id: parse_identifier(IdentifierKind::Posting, &model.id)?,
            title: model.title,
            photo_url: model.photo_url,
            created_by: model.created_by,
            created_at: model.created_at,
        })
    }
}
