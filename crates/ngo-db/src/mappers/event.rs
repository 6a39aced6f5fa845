//! Event entity <-> model mapper

use ngo_core::{DomainError, Event, EventStatus, IdentifierKind};

use super::{parse_column, parse_identifier};
use crate::models::EventModel;

impl TryFrom<EventModel> for Event {
    type Error = DomainError;

    fn try_from(model: EventModel) -> Result<Self, Self::Error> {
        Ok(Event {
            id: parse_identifier(IdentifierKind::Event, &model.id)?,
            title: model.title,
            description: model.description,
            location: model.location,
            start_date: model.start_date,
            end_date: model.end_date,
            start_time: model.start_time,
            end_time: model.end_time,
            photo_url: model.photo_url,
            status: parse_column::<EventStatus>("status", &model.status)?,
            created_by: model.created_by,
            created_at: model.created_at,
        })
    }
}
