//! Feedback entity <-> model mapper

use ngo_core::{DomainError, Feedback, IdentifierKind};

use super::parse_identifier;
use crate::models::FeedbackModel;

impl TryFrom<FeedbackModel> for Feedback {
    type Error = DomainError;

    fn try_from(model: FeedbackModel) -> Result<Self, Self::Error> {
        let volunteer_id = model
            .volunteer_id
            .as_deref()
            .map(|id| parse_identifier(IdentifierKind::Volunteer, id))
            .transpose()?;

        Ok(Feedback {
            id: parse_identifier(IdentifierKind::Feedback, &model.id)?,
            event_id: parse_identifier(IdentifierKind::Event, &model.event_id)?,
            volunteer_id,
            rating: model.rating,
            comment: model.comment,
            submitted_at: model.submitted_at,
        })
    }
}
