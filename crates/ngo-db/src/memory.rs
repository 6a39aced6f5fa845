//! In-memory storage backend
//!
//! Implements every repository trait over one mutex-guarded state so the
//! multi-row operations (identifier allocation, signup, guarded updates) are
//! atomic exactly as their PostgreSQL counterparts are. Used by the service
//! tests and by `STORAGE_BACKEND=memory`.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use ngo_core::{
    ApprovalStatus, CompletionStatus, Donation, DonationRepository, DonationTally, DomainError,
    Enrollment, Event, EventQuery, EventRepository, Feedback, FeedbackRepository, Identifier,
    IdentifierKind, NewDonation, NewEvent, NewFeedback, NewPosting, NewSignup, Participation,
    ParticipationRepository, ParticipationStatus, Posting, PostingQuery, PostingRepository,
    RepoResult, Role, User, UserRepository, Volunteer, VolunteerRepository, VolunteerTally,
};

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<String, (User, String)>,
    events: BTreeMap<String, Event>,
    volunteers: BTreeMap<String, Volunteer>,
    participations: BTreeMap<i64, Participation>,
    donations: Vec<Donation>,
    /// Stored feedback with its submitter, which readers never see
    feedback: BTreeMap<String, (Feedback, Identifier)>,
    postings: BTreeMap<String, Posting>,
    next_participation_id: i64,
    next_donation_id: i64,
}

impl MemoryState {
    /// Keys are fixed-width, so the last key is the numeric maximum
    fn next_identifier<V>(
        map: &BTreeMap<String, V>,
        kind: IdentifierKind,
    ) -> RepoResult<Identifier> {
        let current_max = map.keys().next_back().map(String::as_str);
        Ok(Identifier::next(kind, current_max)?)
    }

    fn volunteer_by_email(&self, email: &str) -> Option<&Volunteer> {
        self.volunteers.values().find(|v| v.email == email)
    }

    fn enrollment(&self, participation: &Participation) -> RepoResult<Enrollment> {
        let volunteer = self
            .volunteers
            .get(&participation.volunteer_id.to_string())
            .cloned()
            .ok_or_else(|| DomainError::VolunteerNotFound(participation.volunteer_id.clone()))?;
        Ok(Enrollment {
            participation: participation.clone(),
            volunteer,
        })
    }

    fn participation_mut(&mut self, id: i64) -> RepoResult<&mut Participation> {
        self.participations
            .get_mut(&id)
            .ok_or(DomainError::ParticipationNotFound(id))
    }
}

/// Shared in-memory store; clones see the same data
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn find_by_id(&self, id: &Identifier) -> RepoResult<Option<Event>> {
        Ok(self.state.lock().events.get(&id.to_string()).cloned())
    }

    async fn list(&self, query: &EventQuery) -> RepoResult<Vec<Event>> {
        let state = self.state.lock();
        let title = query.title.as_deref().map(str::to_lowercase);

        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|e| {
                title
                    .as_deref()
                    .is_none_or(|t| e.title.to_lowercase().contains(t))
            })
            .filter(|e| {
                query
                    .created_by
                    .as_deref()
                    .is_none_or(|owner| e.is_owned_by(owner))
            })
            .cloned()
            .collect();

        events.sort_by(|a, b| {
            a.starts_at()
                .cmp(&b.starts_at())
                .then_with(|| a.id.to_string().cmp(&b.id.to_string()))
        });
        Ok(events)
    }

    async fn create(&self, event: &NewEvent) -> RepoResult<Event> {
        let mut state = self.state.lock();
        let id = MemoryState::next_identifier(&state.events, IdentifierKind::Event)?;

        let created = Event {
            id: id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            start_date: event.schedule.start_date,
            end_date: event.schedule.end_date,
            start_time: event.schedule.start_time,
            end_time: event.schedule.end_time,
            photo_url: event.photo_url.clone(),
            status: event.status,
            created_by: event.created_by.clone(),
            created_at: Utc::now(),
        };
        state.events.insert(id.to_string(), created.clone());
        Ok(created)
    }

    async fn update(&self, event: &Event) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .events
            .get_mut(&event.id.to_string())
            .ok_or_else(|| DomainError::EventNotFound(event.id.clone()))?;

        // Ownership and creation time are not editable
        let created_by = stored.created_by.take();
        let created_at = stored.created_at;
        *stored = Event {
            created_by,
            created_at,
            ..event.clone()
        };
        Ok(())
    }

    async fn delete(&self, id: &Identifier) -> RepoResult<()> {
        let mut state = self.state.lock();
        let key = id.to_string();

        if !state.events.contains_key(&key) {
            return Err(DomainError::EventNotFound(id.clone()));
        }
        if state.donations.iter().any(|d| &d.event_id == id) {
            return Err(DomainError::EventHasDonations);
        }

        state.events.remove(&key);
        state.participations.retain(|_, p| &p.event_id != id);
        state.feedback.retain(|_, (f, _)| &f.event_id != id);
        Ok(())
    }
}

#[async_trait]
impl VolunteerRepository for InMemoryStore {
    async fn find_by_id(&self, id: &Identifier) -> RepoResult<Option<Volunteer>> {
        Ok(self.state.lock().volunteers.get(&id.to_string()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Volunteer>> {
        Ok(self.state.lock().volunteer_by_email(email).cloned())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(i64::try_from(self.state.lock().volunteers.len()).unwrap_or(i64::MAX))
    }
}

#[async_trait]
impl ParticipationRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Participation>> {
        Ok(self.state.lock().participations.get(&id).cloned())
    }

    async fn find_by_event_and_email(
        &self,
        event_id: &Identifier,
        email: &str,
    ) -> RepoResult<Option<Participation>> {
        let state = self.state.lock();
        let Some(volunteer) = state.volunteer_by_email(email) else {
            return Ok(None);
        };
        Ok(state
            .participations
            .values()
            .find(|p| &p.event_id == event_id && p.volunteer_id == volunteer.id)
            .cloned())
    }

    async fn list_by_event(&self, event_id: &Identifier) -> RepoResult<Vec<Enrollment>> {
        let state = self.state.lock();
        let mut rows: Vec<&Participation> = state
            .participations
            .values()
            .filter(|p| &p.event_id == event_id)
            .collect();
        rows.sort_by_key(|p| (p.shift_start, p.id));
        rows.into_iter().map(|p| state.enrollment(p)).collect()
    }

    async fn list_by_email(&self, email: &str) -> RepoResult<Vec<Participation>> {
        let state = self.state.lock();
        let Some(volunteer) = state.volunteer_by_email(email) else {
            return Ok(Vec::new());
        };
        let mut rows: Vec<Participation> = state
            .participations
            .values()
            .filter(|p| p.volunteer_id == volunteer.id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.shift_start, b.id).cmp(&(a.shift_start, a.id)));
        Ok(rows)
    }

    async fn list_pending(&self, created_by: Option<&str>) -> RepoResult<Vec<Enrollment>> {
        let state = self.state.lock();
        let mut rows: Vec<&Participation> = state
            .participations
            .values()
            .filter(|p| p.approval == ApprovalStatus::Pending)
            .filter(|p| {
                created_by.is_none_or(|owner| {
                    state
                        .events
                        .get(&p.event_id.to_string())
                        .is_some_and(|e| e.is_owned_by(owner))
                })
            })
            .collect();
        rows.sort_by_key(|p| (p.created_at, p.id));
        rows.into_iter().map(|p| state.enrollment(p)).collect()
    }

    async fn sign_up(&self, signup: &NewSignup) -> RepoResult<Enrollment> {
        let mut state = self.state.lock();
        let draft = &signup.participation;

        if !state.events.contains_key(&draft.event_id.to_string()) {
            return Err(DomainError::EventNotFound(draft.event_id.clone()));
        }

        let volunteer = match state.volunteer_by_email(&signup.volunteer.email) {
            Some(existing) => existing.clone(),
            None => {
                let id =
                    MemoryState::next_identifier(&state.volunteers, IdentifierKind::Volunteer)?;
                let details = &signup.volunteer;
                let created = Volunteer {
                    id: id.clone(),
                    name: details.name.clone(),
                    email: details.email.clone(),
                    phone: details.phone.clone(),
                    age: details.age,
                };
                state.volunteers.insert(id.to_string(), created.clone());
                created
            }
        };

        let duplicate = state
            .participations
            .values()
            .any(|p| p.event_id == draft.event_id && p.volunteer_id == volunteer.id);
        if duplicate {
            return Err(DomainError::DuplicateSignup);
        }

        state.next_participation_id += 1;
        let participation = Participation {
            id: state.next_participation_id,
            volunteer_id: volunteer.id.clone(),
            event_id: draft.event_id.clone(),
            shift_start: draft.shift_start,
            work_hours: draft.work_hours,
            points: draft.points,
            completion: CompletionStatus::Waiting,
            approval: ApprovalStatus::Pending,
            created_at: Utc::now(),
        };
        state
            .participations
            .insert(participation.id, participation.clone());

        Ok(Enrollment {
            participation,
            volunteer,
        })
    }

    async fn update_approval(
        &self,
        id: i64,
        expected: ParticipationStatus,
        target: ApprovalStatus,
    ) -> RepoResult<Participation> {
        let mut state = self.state.lock();
        let participation = state.participation_mut(id)?;
        if participation.status() != expected {
            return Err(DomainError::ConcurrentModification);
        }
        participation.approval = target;
        Ok(participation.clone())
    }

    async fn update_completion(
        &self,
        id: i64,
        expected: ParticipationStatus,
        target: CompletionStatus,
    ) -> RepoResult<Participation> {
        let mut state = self.state.lock();
        let participation = state.participation_mut(id)?;
        if participation.status() != expected {
            return Err(DomainError::ConcurrentModification);
        }
        participation.completion = target;
        Ok(participation.clone())
    }

    async fn approved_tallies(&self) -> RepoResult<Vec<VolunteerTally>> {
        let state = self.state.lock();
        let mut tallies: BTreeMap<String, VolunteerTally> = BTreeMap::new();

        for p in state.participations.values().filter(|p| p.is_approved()) {
            let Some(volunteer) = state.volunteers.get(&p.volunteer_id.to_string()) else {
                continue;
            };
            let tally = tallies
                .entry(volunteer.email.clone())
                .or_insert_with(|| VolunteerTally {
                    email: volunteer.email.clone(),
                    points: 0,
                    event_count: 0,
                    last_shift: None,
                });
            tally.points = tally.points.saturating_add(i64::from(p.points));
            tally.event_count += 1;
            tally.last_shift = tally.last_shift.max(Some(p.shift_start));
        }

        Ok(tallies.into_values().collect())
    }

    async fn count_pending(&self) -> RepoResult<i64> {
        let state = self.state.lock();
        let pending = state
            .participations
            .values()
            .filter(|p| p.approval == ApprovalStatus::Pending)
            .count();
        Ok(i64::try_from(pending).unwrap_or(i64::MAX))
    }
}

#[async_trait]
impl DonationRepository for InMemoryStore {
    async fn create(&self, donation: &NewDonation) -> RepoResult<Donation> {
        let mut state = self.state.lock();
        if !state.events.contains_key(&donation.event_id.to_string()) {
            return Err(DomainError::EventNotFound(donation.event_id.clone()));
        }

        state.next_donation_id += 1;
        let created = Donation {
            id: state.next_donation_id,
            donor_email: donation.donor_email.clone(),
            event_id: donation.event_id.clone(),
            amount: donation.amount,
            payment_method: donation.payment_method,
            payment_reference: donation.payment_reference.clone(),
            donated_at: donation.donated_at,
        };
        state.donations.push(created.clone());
        Ok(created)
    }

    async fn list_by_donor(&self, email: &str) -> RepoResult<Vec<Donation>> {
        let mut rows: Vec<Donation> = self
            .state
            .lock()
            .donations
            .iter()
            .filter(|d| d.donor_email == email)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.donated_at, b.id).cmp(&(a.donated_at, a.id)));
        Ok(rows)
    }

    async fn list_all(&self) -> RepoResult<Vec<Donation>> {
        let mut rows = self.state.lock().donations.clone();
        rows.sort_by(|a, b| (b.donated_at, b.id).cmp(&(a.donated_at, a.id)));
        Ok(rows)
    }

    async fn tallies(&self) -> RepoResult<Vec<DonationTally>> {
        let state = self.state.lock();
        let mut tallies: BTreeMap<String, DonationTally> = BTreeMap::new();

        for d in &state.donations {
            let tally = tallies
                .entry(d.donor_email.clone())
                .or_insert_with(|| DonationTally {
                    email: d.donor_email.clone(),
                    total_cents: 0,
                    donation_count: 0,
                    last_donation: None,
                });
            tally.total_cents = tally.total_cents.saturating_add(d.amount.cents());
            tally.donation_count += 1;
            tally.last_donation = tally.last_donation.max(Some(d.donated_at));
        }

        Ok(tallies.into_values().collect())
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryStore {
    async fn find_by_id(&self, id: &Identifier) -> RepoResult<Option<Feedback>> {
        Ok(self
            .state
            .lock()
            .feedback
            .get(&id.to_string())
            .map(|(f, _)| f.clone()))
    }

    async fn list(&self, event_id: Option<&Identifier>) -> RepoResult<Vec<Feedback>> {
        let state = self.state.lock();
        let mut rows: Vec<Feedback> = state
            .feedback
            .values()
            .map(|(f, _)| f)
            .filter(|f| event_id.is_none_or(|id| &f.event_id == id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.id.to_string().cmp(&a.id.to_string()))
        });
        Ok(rows)
    }

    async fn exists_for(&self, submitter: &Identifier, event_id: &Identifier) -> RepoResult<bool> {
        Ok(self
            .state
            .lock()
            .feedback
            .values()
            .any(|(f, by)| by == submitter && &f.event_id == event_id))
    }

    async fn create(&self, feedback: &NewFeedback) -> RepoResult<Feedback> {
        let mut state = self.state.lock();

        let duplicate = state
            .feedback
            .values()
            .any(|(f, by)| by == &feedback.submitter && f.event_id == feedback.event_id);
        if duplicate {
            return Err(DomainError::FeedbackAlreadySubmitted);
        }
        if !state.events.contains_key(&feedback.event_id.to_string()) {
            return Err(DomainError::EventNotFound(feedback.event_id.clone()));
        }

        let id = MemoryState::next_identifier(&state.feedback, IdentifierKind::Feedback)?;
        let created = Feedback {
            id: id.clone(),
            event_id: feedback.event_id.clone(),
            volunteer_id: feedback.visible_volunteer(),
            rating: feedback.rating,
            comment: feedback.comment.clone(),
            submitted_at: feedback.submitted_at,
        };
        state
            .feedback
            .insert(id.to_string(), (created.clone(), feedback.submitter.clone()));
        Ok(created)
    }

    async fn delete(&self, id: &Identifier) -> RepoResult<()> {
        self.state
            .lock()
            .feedback
            .remove(&id.to_string())
            .map(|_| ())
            .ok_or_else(|| DomainError::FeedbackNotFound(id.clone()))
    }
}

#[async_trait]
impl PostingRepository for InMemoryStore {
    async fn find_by_id(&self, id: &Identifier) -> RepoResult<Option<Posting>> {
        Ok(self.state.lock().postings.get(&id.to_string()).cloned())
    }

    async fn list(&self, query: &PostingQuery) -> RepoResult<Vec<Posting>> {
        let state = self.state.lock();
        let title = query.title.as_deref().map(str::to_lowercase);

        Ok(state
            .postings
            .values()
            .filter(|p| {
                title
                    .as_deref()
                    .is_none_or(|t| p.title.to_lowercase().contains(t))
            })
            .filter(|p| {
                query
                    .created_by
                    .as_deref()
                    .is_none_or(|owner| p.is_owned_by(owner))
            })
            .cloned()
            .collect())
    }

    async fn create(&self, posting: &NewPosting) -> RepoResult<Posting> {
        let mut state = self.state.lock();
        let id = MemoryState::next_identifier(&state.postings, IdentifierKind::Posting)?;

        let created = Posting {
            id: id.clone(),
            title: posting.title.clone(),
            photo_url: posting.photo_url.clone(),
            created_by: posting.created_by.clone(),
            created_at: Utc::now(),
        };
        state.postings.insert(id.to_string(), created.clone());
        Ok(created)
    }

    async fn update(&self, posting: &Posting) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .postings
            .get_mut(&posting.id.to_string())
            .ok_or_else(|| DomainError::PostingNotFound(posting.id.clone()))?;

        stored.title.clone_from(&posting.title);
        stored.photo_url.clone_from(&posting.photo_url);
        Ok(())
    }

    async fn delete(&self, id: &Identifier) -> RepoResult<()> {
        self.state
            .lock()
            .postings
            .remove(&id.to_string())
            .map(|_| ())
            .ok_or_else(|| DomainError::PostingNotFound(id.clone()))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self.state.lock().users.get(email).map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.state.lock().users.contains_key(email))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.users.contains_key(&user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        state
            .users
            .insert(user.email.clone(), (user.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut state = self.state.lock();
        let (stored, _) = state
            .users
            .get_mut(&user.email)
            .filter(|(stored, _)| stored.role() == user.role())
            .ok_or_else(|| DomainError::UserNotFound(user.email.clone()))?;

        stored.name.clone_from(&user.name);
        stored.profile = user.profile.clone();
        Ok(())
    }

    async fn get_password_hash(&self, email: &str) -> RepoResult<Option<String>> {
        Ok(self.state.lock().users.get(email).map(|(_, h)| h.clone()))
    }

    async fn list(&self) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self
            .state
            .lock()
            .users
            .values()
            .map(|(u, _)| u.clone())
            .collect();
        users.sort_by(|a, b| a.joined_at.cmp(&b.joined_at).then_with(|| a.email.cmp(&b.email)));
        Ok(users)
    }

    async fn count_by_role(&self) -> RepoResult<HashMap<Role, i64>> {
        let mut counts = HashMap::new();
        for (user, _) in self.state.lock().users.values() {
            *counts.entry(user.role()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn display_names(&self, emails: &[String]) -> RepoResult<HashMap<String, String>> {
        let state = self.state.lock();
        Ok(emails
            .iter()
            .filter_map(|email| {
                state
                    .users
                    .get(email)
                    .map(|(u, _)| (email.clone(), u.display_name().to_string()))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use ngo_core::{
        Amount, EventSchedule, EventStatus, NewParticipation, PaymentMethod, UserProfile,
        VolunteerDetails,
    };

    fn shift(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn new_event(title: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: String::new(),
            location: "Penang".to_string(),
            schedule: EventSchedule {
                start_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 5, 3).unwrap(),
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            },
            photo_url: None,
            status: EventStatus::Upcoming,
            created_by: Some("org@x.com".to_string()),
        }
    }

    fn signup(event_id: &Identifier, email: &str, name: &str) -> NewSignup {
        NewSignup {
            volunteer: VolunteerDetails {
                name: name.to_string(),
                email: email.to_string(),
                phone: "0123456789".to_string(),
                age: 25,
            },
            participation: NewParticipation {
                event_id: event_id.clone(),
                shift_start: shift(1),
                work_hours: 4,
                points: 40,
            },
        }
    }

    #[tokio::test]
    async fn test_event_ids_are_sequential() {
        let store = InMemoryStore::new();
        let first = EventRepository::create(&store, &new_event("A")).await.unwrap();
        let second = EventRepository::create(&store, &new_event("B")).await.unwrap();
        assert_eq!(first.id.to_string(), "E001");
        assert_eq!(second.id.to_string(), "E002");
    }

    #[tokio::test]
    async fn test_signup_reuses_volunteer_by_email() {
        let store = InMemoryStore::new();
        let a = EventRepository::create(&store, &new_event("A")).await.unwrap();
        let b = EventRepository::create(&store, &new_event("B")).await.unwrap();

        let first = store.sign_up(&signup(&a.id, "v@x.com", "Original")).await.unwrap();
        let second = store.sign_up(&signup(&b.id, "v@x.com", "Renamed")).await.unwrap();

        assert_eq!(first.volunteer.id, second.volunteer.id);
        assert_eq!(second.volunteer.name, "Original");
        assert_eq!(VolunteerRepository::count(&store).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_signup_rejected() {
        let store = InMemoryStore::new();
        let event = EventRepository::create(&store, &new_event("A")).await.unwrap();
        store.sign_up(&signup(&event.id, "v@x.com", "V")).await.unwrap();

        let err = store.sign_up(&signup(&event.id, "v@x.com", "V")).await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateSignup));
    }

    #[tokio::test]
    async fn test_guarded_update_detects_stale_expectation() {
        let store = InMemoryStore::new();
        let event = EventRepository::create(&store, &new_event("A")).await.unwrap();
        let enrollment = store.sign_up(&signup(&event.id, "v@x.com", "V")).await.unwrap();
        let id = enrollment.participation.id;
        let read = enrollment.participation.status();

        store
            .update_approval(id, read, ApprovalStatus::Approved)
            .await
            .unwrap();
        let err = store
            .update_approval(id, read, ApprovalStatus::Rejected)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ConcurrentModification));

        // Completion changed under a reset decided from the approved state
        let approved = ParticipationStatus {
            approval: ApprovalStatus::Approved,
            ..read
        };
        store
            .update_completion(id, approved, CompletionStatus::Completed)
            .await
            .unwrap();
        let err = store
            .update_approval(id, approved, ApprovalStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ConcurrentModification));

        let missing = store
            .update_approval(999, read, ApprovalStatus::Approved)
            .await
            .unwrap_err();
        assert!(matches!(missing, DomainError::ParticipationNotFound(999)));
    }

    #[tokio::test]
    async fn test_delete_event_blocked_by_donations() {
        let store = InMemoryStore::new();
        let event = EventRepository::create(&store, &new_event("A")).await.unwrap();
        DonationRepository::create(
            &store,
            &NewDonation {
                donor_email: "d@x.com".to_string(),
                event_id: event.id.clone(),
                amount: Amount::from_cents(1000).unwrap(),
                payment_method: PaymentMethod::OnlineBanking,
                payment_reference: None,
                donated_at: shift(1),
            },
        )
        .await
        .unwrap();

        let err = EventRepository::delete(&store, &event.id).await.unwrap_err();
        assert!(matches!(err, DomainError::EventHasDonations));
    }

    #[tokio::test]
    async fn test_delete_event_cascades_participations() {
        let store = InMemoryStore::new();
        let event = EventRepository::create(&store, &new_event("A")).await.unwrap();
        store.sign_up(&signup(&event.id, "v@x.com", "V")).await.unwrap();

        EventRepository::delete(&store, &event.id).await.unwrap();
        assert!(store.list_by_event(&event.id).await.unwrap().is_empty());
        assert!(EventRepository::find_by_id(&store, &event.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_anonymous_feedback_hides_submitter_but_blocks_resubmission() {
        let store = InMemoryStore::new();
        let event = EventRepository::create(&store, &new_event("A")).await.unwrap();
        let volunteer = store
            .sign_up(&signup(&event.id, "v@x.com", "V"))
            .await
            .unwrap()
            .volunteer;

        let draft = NewFeedback {
            event_id: event.id.clone(),
            submitter: volunteer.id.clone(),
            anonymous: true,
            rating: 4,
            comment: "Good".to_string(),
            submitted_at: shift(5),
        };
        let stored = FeedbackRepository::create(&store, &draft).await.unwrap();
        assert!(stored.is_anonymous());
        assert_eq!(stored.id.to_string(), "F001");
        assert!(store.exists_for(&volunteer.id, &event.id).await.unwrap());

        let again = NewFeedback {
            anonymous: false,
            ..draft
        };
        let err = FeedbackRepository::create(&store, &again).await.unwrap_err();
        assert!(matches!(err, DomainError::FeedbackAlreadySubmitted));
    }

    #[tokio::test]
    async fn test_tallies_group_by_email() {
        let store = InMemoryStore::new();
        let event = EventRepository::create(&store, &new_event("A")).await.unwrap();
        for cents in [60, 60] {
            DonationRepository::create(
                &store,
                &NewDonation {
                    donor_email: "d@x.com".to_string(),
                    event_id: event.id.clone(),
                    amount: Amount::from_cents(cents).unwrap(),
                    payment_method: PaymentMethod::EWallet,
                    payment_reference: None,
                    donated_at: shift(2),
                },
            )
            .await
            .unwrap();
        }

        let tallies = DonationRepository::tallies(&store).await.unwrap();
        assert_eq!(tallies.len(), 1);
        assert_eq!(tallies[0].total_cents, 120);
        assert_eq!(tallies[0].donation_count, 2);
    }

    fn new_posting(title: &str, owner: &str) -> NewPosting {
        NewPosting {
            title: title.to_string(),
            photo_url: format!("/uploads/postings/{title}.jpg"),
            created_by: Some(owner.to_string()),
        }
    }

    #[tokio::test]
    async fn test_postings_allocate_ids_and_filter() {
        let store = InMemoryStore::new();
        let first = PostingRepository::create(&store, &new_posting("Harvest", "a@x.com"))
            .await
            .unwrap();
        let second = PostingRepository::create(&store, &new_posting("Beach day", "b@x.com"))
            .await
            .unwrap();
        assert_eq!(first.id.to_string(), "P001");
        assert_eq!(second.id.to_string(), "P002");

        let by_title = PostingQuery {
            title: Some("BEACH".to_string()),
            created_by: None,
        };
        let found = PostingRepository::list(&store, &by_title).await.unwrap();
        assert_eq!(found, vec![second.clone()]);

        let by_owner = PostingQuery {
            title: None,
            created_by: Some("A@x.com".to_string()),
        };
        let found = PostingRepository::list(&store, &by_owner).await.unwrap();
        assert_eq!(found, vec![first.clone()]);

        let all = PostingRepository::list(&store, &PostingQuery::default()).await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn test_posting_update_keeps_owner() {
        let store = InMemoryStore::new();
        let posting = PostingRepository::create(&store, &new_posting("Harvest", "a@x.com"))
            .await
            .unwrap();

        let edited = Posting {
            title: "Harvest festival".to_string(),
            created_by: Some("intruder@x.com".to_string()),
            ..posting.clone()
        };
        PostingRepository::update(&store, &edited).await.unwrap();

        let stored = PostingRepository::find_by_id(&store, &posting.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.title, "Harvest festival");
        assert_eq!(stored.created_by.as_deref(), Some("a@x.com"));

        PostingRepository::delete(&store, &posting.id).await.unwrap();
        let err = PostingRepository::delete(&store, &posting.id).await.unwrap_err();
        assert!(matches!(err, DomainError::PostingNotFound(_)));
    }

    #[tokio::test]
    async fn test_user_update_cannot_change_role() {
        let store = InMemoryStore::new();
        let member = User::new(
            "m@x.com".to_string(),
            "Mira".to_string(),
            UserProfile::Member { photo_url: None },
        );
        UserRepository::create(&store, &member, "hash").await.unwrap();

        let renamed = User {
            name: "Mira Tan".to_string(),
            profile: UserProfile::Member {
                photo_url: Some("/uploads/members/1.png".to_string()),
            },
            ..member.clone()
        };
        UserRepository::update(&store, &renamed).await.unwrap();
        let stored = UserRepository::find_by_email(&store, "m@x.com").await.unwrap().unwrap();
        assert_eq!(stored.name, "Mira Tan");
        assert_eq!(stored.profile, renamed.profile);

        let promoted = User {
            profile: UserProfile::Admin,
            ..member
        };
        let err = UserRepository::update(&store, &promoted).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound(_)));
    }
}
