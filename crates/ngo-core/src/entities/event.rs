//! Event entity - a scheduled NGO activity volunteers sign up for

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors};

use crate::value_objects::Identifier;

/// Earliest permitted start time-of-day, in seconds from midnight (08:00)
const START_WINDOW_OPEN: u32 = 8 * 3600;
/// Latest permitted start time-of-day, in seconds from midnight (18:00)
const START_WINDOW_CLOSE: u32 = 18 * 3600;

/// Lifecycle status of an event relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Concluded,
}

impl EventStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Concluded => "concluded",
        }
    }
}

impl std::str::FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upcoming" => Ok(Self::Upcoming),
            "ongoing" => Ok(Self::Ongoing),
            "concluded" => Ok(Self::Concluded),
            other => Err(format!("unknown event status: {other}")),
        }
    }
}

/// Derive an event's status from its date range.
///
/// Both boundary days count as ongoing.
pub fn derive_status(start_date: NaiveDate, end_date: NaiveDate, today: NaiveDate) -> EventStatus {
    if today < start_date {
        EventStatus::Upcoming
    } else if today > end_date {
        EventStatus::Concluded
    } else {
        EventStatus::Ongoing
    }
}

/// Dates and daily times of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSchedule {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl EventSchedule {
    /// Check the schedule invariants, collecting every violation
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.start_date < today {
            errors.add(
                "start_date",
                ValidationError::new("start_date_past")
                    .with_message("Start date cannot be in the past.".into()),
            );
        }
        if self.end_date < self.start_date {
            errors.add(
                "end_date",
                ValidationError::new("end_before_start")
                    .with_message("End date cannot be earlier than start date.".into()),
            );
        }

        let start_secs = self.start_time.num_seconds_from_midnight();
        if !(START_WINDOW_OPEN..=START_WINDOW_CLOSE).contains(&start_secs) {
            errors.add(
                "start_time",
                ValidationError::new("start_time_window")
                    .with_message("Start time must be between 08:00 and 18:00.".into()),
            );
        }
        // Both times fall on one day, so end > start also bounds the span below 24 hours
        if self.end_time <= self.start_time {
            errors.add(
                "end_time",
                ValidationError::new("end_before_start")
                    .with_message("End time must be later than start time.".into()),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// First moment of the event
    pub fn starts_at(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }

    /// Last moment of the event (end date at end time)
    pub fn ends_at(&self) -> NaiveDateTime {
        self.end_date.and_time(self.end_time)
    }
}

/// Event entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: Identifier,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub photo_url: Option<String>,
    /// Cached status; re-derive with [`Event::status_on`] before relying on it
    pub status: EventStatus,
    /// Creator e-mail; legacy events have none
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn schedule(&self) -> EventSchedule {
        EventSchedule {
            start_date: self.start_date,
            end_date: self.end_date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    /// Status as of `today`
    pub fn status_on(&self, today: NaiveDate) -> EventStatus {
        derive_status(self.start_date, self.end_date, today)
    }

    /// Re-derive and cache the status
    pub fn refresh_status(&mut self, today: NaiveDate) -> EventStatus {
        self.status = self.status_on(today);
        self.status
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.schedule().starts_at()
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.schedule().ends_at()
    }

    /// Registration closes once the event has fully ended
    pub fn accepts_signups_at(&self, now: NaiveDateTime) -> bool {
        now <= self.ends_at()
    }

    /// Feedback opens the day after the end date
    pub fn feedback_open_on(&self, today: NaiveDate) -> bool {
        self.end_date < today
    }

    /// Check whether `email` created this event
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.created_by
            .as_deref()
            .is_some_and(|owner| owner.eq_ignore_ascii_case(email))
    }

    /// Replace the editable fields from a draft
    pub fn apply(&mut self, draft: &NewEvent, today: NaiveDate) {
        self.title.clone_from(&draft.title);
        self.description.clone_from(&draft.description);
        self.location.clone_from(&draft.location);
        self.start_date = draft.schedule.start_date;
        self.end_date = draft.schedule.end_date;
        self.start_time = draft.schedule.start_time;
        self.end_time = draft.schedule.end_time;
        self.refresh_status(today);
    }
}

/// Data for a new event; the identifier is allocated by storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub schedule: EventSchedule,
    pub photo_url: Option<String>,
    pub status: EventStatus,
    pub created_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::IdentifierKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn schedule(start: NaiveDate, end: NaiveDate) -> EventSchedule {
        EventSchedule {
            start_date: start,
            end_date: end,
            start_time: time(9, 0),
            end_time: time(17, 0),
        }
    }

    fn event(owner: Option<&str>) -> Event {
        let s = schedule(date(2026, 3, 10), date(2026, 3, 11));
        Event {
            id: Identifier::first(IdentifierKind::Event),
            title: "Beach cleanup".to_string(),
            description: String::new(),
            location: "Batu Ferringhi".to_string(),
            start_date: s.start_date,
            end_date: s.end_date,
            start_time: s.start_time,
            end_time: s.end_time,
            photo_url: None,
            status: EventStatus::Upcoming,
            created_by: owner.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_derive_status_boundaries() {
        let start = date(2026, 3, 10);
        let end = date(2026, 3, 12);
        assert_eq!(derive_status(start, end, date(2026, 3, 9)), EventStatus::Upcoming);
        assert_eq!(derive_status(start, end, start), EventStatus::Ongoing);
        assert_eq!(derive_status(start, end, date(2026, 3, 11)), EventStatus::Ongoing);
        assert_eq!(derive_status(start, end, end), EventStatus::Ongoing);
        assert_eq!(derive_status(start, end, date(2026, 3, 13)), EventStatus::Concluded);
    }

    #[test]
    fn test_derive_status_exhaustive_window() {
        // Sweep every (start, end, today) triple over a three-week window
        let base = date(2026, 1, 1);
        for s in 0..21 {
            for len in 0..7 {
                let start = base + chrono::Days::new(s);
                let end = start + chrono::Days::new(len);
                for t in 0..30 {
                    let today = base + chrono::Days::new(t);
                    let expected = if today < start {
                        EventStatus::Upcoming
                    } else if today > end {
                        EventStatus::Concluded
                    } else {
                        EventStatus::Ongoing
                    };
                    assert_eq!(derive_status(start, end, today), expected);
                    // Pure: same inputs, same answer
                    assert_eq!(derive_status(start, end, today), derive_status(start, end, today));
                }
            }
        }
    }

    #[test]
    fn test_schedule_valid() {
        let today = date(2026, 3, 1);
        assert!(schedule(date(2026, 3, 1), date(2026, 3, 1)).validate(today).is_ok());
    }

    #[test]
    fn test_schedule_collects_all_violations() {
        let today = date(2026, 3, 5);
        let bad = EventSchedule {
            start_date: date(2026, 3, 4),
            end_date: date(2026, 3, 3),
            start_time: time(19, 0),
            end_time: time(7, 0),
        };
        let errors = bad.validate(today).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("start_date"));
        assert!(fields.contains_key("end_date"));
        assert!(fields.contains_key("start_time"));
        assert!(fields.contains_key("end_time"));
    }

    #[test]
    fn test_start_window_is_inclusive() {
        let today = date(2026, 3, 1);
        let mut s = schedule(date(2026, 3, 2), date(2026, 3, 2));
        s.start_time = time(8, 0);
        assert!(s.validate(today).is_ok());
        s.start_time = time(18, 0);
        s.end_time = time(20, 0);
        assert!(s.validate(today).is_ok());
        s.start_time = time(7, 59);
        assert!(s.validate(today).is_err());
        s.start_time = time(18, 1);
        assert!(s.validate(today).is_err());
    }

    #[test]
    fn test_signup_window_closes_at_end() {
        let e = event(None);
        let end = date(2026, 3, 11).and_time(time(17, 0));
        assert!(e.accepts_signups_at(end));
        assert!(e.accepts_signups_at(date(2026, 3, 10).and_time(time(12, 0))));
        assert!(!e.accepts_signups_at(end + chrono::Duration::minutes(1)));
    }

    #[test]
    fn test_feedback_opens_after_end_date() {
        let e = event(None);
        assert!(!e.feedback_open_on(date(2026, 3, 11)));
        assert!(e.feedback_open_on(date(2026, 3, 12)));
    }

    #[test]
    fn test_ownership() {
        assert!(event(Some("org@ngo.my")).is_owned_by("ORG@ngo.my"));
        assert!(!event(Some("org@ngo.my")).is_owned_by("other@ngo.my"));
        assert!(!event(None).is_owned_by("org@ngo.my"));
    }
}
