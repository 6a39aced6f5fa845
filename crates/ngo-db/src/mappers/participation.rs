//! Participation entity <-> model mapper

use ngo_core::{
    ApprovalStatus, CompletionStatus, DomainError, Enrollment, IdentifierKind, Participation,
    Volunteer,
};

use super::{parse_column, parse_identifier};
use crate::models::{EnrollmentModel, ParticipationModel};

impl TryFrom<ParticipationModel> for Participation {
    type Error = DomainError;

    fn try_from(model: ParticipationModel) -> Result<Self, Self::Error> {
        Ok(Participation {
            id: model.id,
            volunteer_id: parse_identifier(IdentifierKind::Volunteer, &model.volunteer_id)?,
            event_id: parse_identifier(IdentifierKind::Event, &model.event_id)?,
            shift_start: model.shift_start,
            work_hours: model.work_hours,
            points: model.points,
            completion: parse_column::<CompletionStatus>("completion", &model.completion)?,
            approval: parse_column::<ApprovalStatus>("approval", &model.approval)?,
            created_at: model.created_at,
        })
    }
}

impl TryFrom<EnrollmentModel> for Enrollment {
    type Error = DomainError;

    fn try_from(model: EnrollmentModel) -> Result<Self, Self::Error> {
        let participation = Participation::try_from(model.participation)?;
        let volunteer = Volunteer {
            id: participation.volunteer_id.clone(),
            name: model.volunteer_name,
            email: model.volunteer_email,
            phone: model.volunteer_phone,
            age: model.volunteer_age,
        };
        Ok(Enrollment {
            participation,
            volunteer,
        })
    }
}
