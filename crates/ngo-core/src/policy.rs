//! Authorization policy
//!
//! Checks are explicit functions over an [`Actor`] and the resource, evaluated
//! per operation rather than folded into storage queries.

use crate::entities::{Event, Posting, Role};
use crate::error::DomainError;

/// The authenticated caller of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub email: String,
    pub role: Role,
}

impl Actor {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Admins manage everything, organisers what they created, members nothing
fn manages(actor: &Actor, created_by_actor: bool) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Organiser => created_by_actor,
        Role::Member => false,
    }
}

/// `actor.role == Admin || event.created_by == actor.email`, for event managers only
pub fn can_manage_event(actor: &Actor, event: &Event) -> bool {
    manages(actor, event.is_owned_by(&actor.email))
}

/// Same rule as [`can_manage_event`], applied to a gallery posting
pub fn can_manage_posting(actor: &Actor, posting: &Posting) -> bool {
    manages(actor, posting.is_owned_by(&actor.email))
}

/// Require the admin role
pub fn require_admin(actor: &Actor) -> Result<(), DomainError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(DomainError::InsufficientRole(actor.role.to_string()))
    }
}

/// Require a role that runs events (admin or organiser)
pub fn require_event_manager(actor: &Actor) -> Result<(), DomainError> {
    if actor.role.manages_events() {
        Ok(())
    } else {
        Err(DomainError::InsufficientRole(actor.role.to_string()))
    }
}

/// Require permission to manage this particular event
pub fn require_event_access(actor: &Actor, event: &Event) -> Result<(), DomainError> {
    require_event_manager(actor)?;
    if can_manage_event(actor, event) {
        Ok(())
    } else {
        Err(DomainError::NotEventOwner)
    }
}

/// Require permission to edit or delete this posting
pub fn require_posting_access(actor: &Actor, posting: &Posting) -> Result<(), DomainError> {
    require_event_manager(actor)?;
    if can_manage_posting(actor, posting) {
        Ok(())
    } else {
        Err(DomainError::NotPostingOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EventStatus;
    use crate::value_objects::{Identifier, IdentifierKind};
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn event(owner: Option<&str>) -> Event {
        let day = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        Event {
            id: Identifier::first(IdentifierKind::Event),
            title: "Food drive".to_string(),
            description: String::new(),
            location: "KL".to_string(),
            start_date: day,
            end_date: day,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            photo_url: None,
            status: EventStatus::Upcoming,
            created_by: owner.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_admin_manages_everything() {
        let admin = Actor::new("admin@ngo.my", Role::Admin);
        assert!(can_manage_event(&admin, &event(Some("org@ngo.my"))));
        assert!(can_manage_event(&admin, &event(None)));
        assert!(require_admin(&admin).is_ok());
    }

    #[test]
    fn test_organiser_only_own_events() {
        let org = Actor::new("org@ngo.my", Role::Organiser);
        assert!(require_event_access(&org, &event(Some("org@ngo.my"))).is_ok());
        assert!(matches!(
            require_event_access(&org, &event(Some("other@ngo.my"))),
            Err(DomainError::NotEventOwner)
        ));
        // Legacy events without a creator belong to admins only
        assert!(!can_manage_event(&org, &event(None)));
        assert!(require_admin(&org).is_err());
    }

    fn posting(owner: Option<&str>) -> Posting {
        Posting {
            id: Identifier::first(IdentifierKind::Posting),
            title: "Harvest day".to_string(),
            photo_url: "/uploads/postings/1.jpg".to_string(),
            created_by: owner.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_posting_ownership() {
        let org = Actor::new("org@ngo.my", Role::Organiser);
        assert!(require_posting_access(&org, &posting(Some("org@ngo.my"))).is_ok());
        assert!(matches!(
            require_posting_access(&org, &posting(Some("other@ngo.my"))),
            Err(DomainError::NotPostingOwner)
        ));
        assert!(!can_manage_posting(&org, &posting(None)));

        let admin = Actor::new("admin@ngo.my", Role::Admin);
        assert!(require_posting_access(&admin, &posting(None)).is_ok());

        let member = Actor::new("org@ngo.my", Role::Member);
        assert!(matches!(
            require_posting_access(&member, &posting(Some("org@ngo.my"))),
            Err(DomainError::InsufficientRole(_))
        ));
    }

    #[test]
    fn test_member_manages_nothing() {
        let member = Actor::new("org@ngo.my", Role::Member);
        assert!(!can_manage_event(&member, &event(Some("org@ngo.my"))));
        assert!(matches!(
            require_event_access(&member, &event(Some("org@ngo.my"))),
            Err(DomainError::InsufficientRole(_))
        ));
    }
}
