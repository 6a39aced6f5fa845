//! Participation entity - one volunteer's shift at one event
//!
//! Two independent state axes live on a participation:
//! - approval: `Pending -> Approved | Rejected`, reset back to `Pending` only explicitly
//! - completion: `Waiting -> Completed | Cancelled`
//!
//! A completed shift keeps its approval; it cannot be reset to pending.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::volunteer::{Volunteer, VolunteerDetails};
use crate::error::DomainError;
use crate::value_objects::Identifier;

pub const MIN_WORK_HOURS: i32 = 1;
pub const MAX_WORK_HOURS: i32 = 12;
pub const DEFAULT_POINTS_PER_HOUR: i32 = 10;

/// Points awarded for a shift of `work_hours`
pub fn points_for(work_hours: i32, points_per_hour: i32) -> i32 {
    work_hours.saturating_mul(points_per_hour)
}

/// Approval axis of a participation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Decide a move to `target`.
    ///
    /// Returns `Ok(None)` when already in `target`. Leaving a terminal state is a
    /// conflict; use [`ApprovalStatus::reset`] to return to `Pending`.
    pub fn transition_to(self, target: Self) -> Result<Option<Self>, DomainError> {
        if self == target {
            return Ok(None);
        }
        match (self, target) {
            (Self::Pending, Self::Approved | Self::Rejected) => Ok(Some(target)),
            _ => Err(DomainError::InvalidTransition {
                from: self.as_str(),
                to: target.as_str(),
            }),
        }
    }

    /// Explicit reset to `Pending`; `None` when already pending
    pub fn reset(self) -> Option<Self> {
        (self != Self::Pending).then_some(Self::Pending)
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown approval status: {other}")),
        }
    }
}

/// Completion axis of a participation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    Waiting,
    Completed,
    Cancelled,
}

impl CompletionStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Decide a move to `target`; `Ok(None)` when already there
    pub fn transition_to(self, target: Self) -> Result<Option<Self>, DomainError> {
        if self == target {
            return Ok(None);
        }
        match (self, target) {
            (Self::Waiting, Self::Completed | Self::Cancelled) => Ok(Some(target)),
            _ => Err(DomainError::InvalidTransition {
                from: self.as_str(),
                to: target.as_str(),
            }),
        }
    }
}

impl std::str::FromStr for CompletionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "waiting" => Ok(Self::Waiting),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown completion status: {other}")),
        }
    }
}

/// Participation entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participation {
    pub id: i64,
    pub volunteer_id: Identifier,
    pub event_id: Identifier,
    pub shift_start: NaiveDateTime,
    pub work_hours: i32,
    pub points: i32,
    pub completion: CompletionStatus,
    pub approval: ApprovalStatus,
    pub created_at: DateTime<Utc>,
}

impl Participation {
    /// End of the shift
    pub fn shift_end(&self) -> NaiveDateTime {
        self.shift_start + Duration::hours(i64::from(self.work_hours))
    }

    #[inline]
    pub fn is_approved(&self) -> bool {
        self.approval == ApprovalStatus::Approved
    }

    #[inline]
    pub fn status(&self) -> ParticipationStatus {
        ParticipationStatus {
            approval: self.approval,
            completion: self.completion,
        }
    }
}

/// Both state axes read together; the expectation of a guarded update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipationStatus {
    pub approval: ApprovalStatus,
    pub completion: CompletionStatus,
}

impl ParticipationStatus {
    /// Decide a reset of the approval to `Pending`; `None` when already pending
    pub fn reset_approval(self) -> Result<Option<ApprovalStatus>, DomainError> {
        let Some(target) = self.approval.reset() else {
            return Ok(None);
        };
        if self.completion == CompletionStatus::Completed {
            return Err(DomainError::InvalidTransition {
                from: CompletionStatus::Completed.as_str(),
                to: target.as_str(),
            });
        }
        Ok(Some(target))
    }
}

/// A participation together with its volunteer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub participation: Participation,
    pub volunteer: Volunteer,
}

/// Participation fields fixed at signup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParticipation {
    pub event_id: Identifier,
    pub shift_start: NaiveDateTime,
    pub work_hours: i32,
    pub points: i32,
}

/// Everything storage needs to record a signup atomically
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSignup {
    pub volunteer: VolunteerDetails,
    pub participation: NewParticipation,
}
