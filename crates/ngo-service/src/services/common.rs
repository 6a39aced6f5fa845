//! Helpers shared by several services

use ngo_core::{Event, Identifier, IdentifierKind};
use validator::ValidationErrors;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Parse a path identifier; a malformed one can never match and reads as missing
pub(crate) fn parse_id(kind: IdentifierKind, raw: &str) -> ServiceResult<Identifier> {
    Identifier::parse_kind(kind, raw.trim()).map_err(|_| {
        let resource = match kind {
            IdentifierKind::Event => "Event",
            IdentifierKind::Volunteer => "Volunteer",
            IdentifierKind::Feedback => "Feedback",
            IdentifierKind::Posting => "Posting",
        };
        ServiceError::not_found(resource, raw)
    })
}

/// Load an event or fail with `EventNotFound`
pub(crate) async fn load_event(ctx: &ServiceContext, raw_id: &str) -> ServiceResult<Event> {
    let id = parse_id(IdentifierKind::Event, raw_id)?;
    let event = ctx
        .event_repo()
        .find_by_id(&id)
        .await?
        .ok_or(ngo_core::DomainError::EventNotFound(id))?;
    Ok(event)
}

/// Copy the errors of `fields` from `from` into `into`
pub(crate) fn absorb(
    into: &mut ValidationErrors,
    from: &ValidationErrors,
    fields: &[&'static str],
) {
    let field_errors = from.field_errors();
    for &field in fields {
        if let Some(errors) = field_errors.get(field) {
            for error in errors.iter() {
                into.add(field, error.clone());
            }
        }
    }
}

/// `Ok(())` when empty, the errors otherwise
pub(crate) fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
