//! Volunteer entity <-> model mapper

use ngo_core::{DomainError, IdentifierKind, Volunteer};

use super::parse_identifier;
use crate::models::VolunteerModel;

impl TryFrom<VolunteerModel> for Volunteer {
    type Error = DomainError;

    fn try_from(model: VolunteerModel) -> Result<Self, Self::Error> {
        Ok(Volunteer {
            id: parse_identifier(IdentifierKind::Volunteer, &model.id)?,
            name: model.name,
            email: model.email,
            phone: model.phone,
            age: model.age,
        })
    }
}
