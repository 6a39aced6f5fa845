//! Event service
//!
//! Handles event creation, updates, photos, deletion, and listing.
//! Statuses in responses are always derived from the clock, never read back.

use ngo_core::{
    derive_status, normalize_email, require_event_access, require_event_manager, Actor,
    EventQuery, EventSchedule, NewEvent, PhotoUpload,
};
use tracing::{info, instrument, warn};
use validator::{Validate, ValidationErrors};

use crate::dto::{CreateEventRequest, EventListQuery, EventResponse, UpdateEventRequest};

use super::common::{absorb, into_result, load_event};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Folder event photos are stored under
pub const EVENT_PHOTO_FOLDER: &str = "events";

const SCHEDULE_FIELDS: [&str; 4] = ["start_date", "end_date", "start_time", "end_time"];

/// Event service
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    /// Create a new EventService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an event owned by the caller, optionally with a photo
    #[instrument(skip(self, request, photo), fields(actor = %actor.email, title = %request.title))]
    pub async fn create_event(
        &self,
        actor: &Actor,
        request: CreateEventRequest,
        photo: Option<PhotoUpload>,
    ) -> ServiceResult<EventResponse> {
        require_event_manager(actor)?;
        let today = self.ctx.clock().today();

        let schedule = EventSchedule {
            start_date: request.start_date,
            end_date: request.end_date,
            start_time: request.start_time,
            end_time: request.end_time,
        };

        let mut errors = request.validate().err().unwrap_or_else(ValidationErrors::new);
        if let Err(schedule_errors) = schedule.validate(today) {
            absorb(&mut errors, &schedule_errors, &SCHEDULE_FIELDS);
        }
        if let Some(photo) = &photo {
            if let Err(photo_errors) = photo.check(self.ctx.settings().max_photo_bytes) {
                absorb(&mut errors, &photo_errors, &["photo"]);
            }
        }
        into_result(errors)?;

        let photo_url = match &photo {
            Some(upload) => Some(self.ctx.photo_store().save(upload, EVENT_PHOTO_FOLDER).await?),
            None => None,
        };

        let draft = NewEvent {
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            location: request.location.trim().to_string(),
            schedule,
            photo_url: photo_url.clone(),
            status: derive_status(schedule.start_date, schedule.end_date, today),
            created_by: Some(actor.email.clone()),
        };

        let event = match self.ctx.event_repo().create(&draft).await {
            Ok(event) => event,
            Err(err) => {
                if let Some(url) = &photo_url {
                    self.discard_photo(url).await;
                }
                return Err(err.into());
            }
        };

        info!(event_id = %event.id, status = event.status.as_str(), "Event created");
        Ok(EventResponse::from_event(&event, today))
    }

    /// Update an event; absent fields keep their value
    #[instrument(skip(self, request), fields(actor = %actor.email))]
    pub async fn update_event(
        &self,
        actor: &Actor,
        event_id: &str,
        request: UpdateEventRequest,
    ) -> ServiceResult<EventResponse> {
        let mut event = load_event(self.ctx, event_id).await?;
        require_event_access(actor, &event)?;
        let today = self.ctx.clock().today();

        let schedule = EventSchedule {
            start_date: request.start_date.unwrap_or(event.start_date),
            end_date: request.end_date.unwrap_or(event.end_date),
            start_time: request.start_time.unwrap_or(event.start_time),
            end_time: request.end_time.unwrap_or(event.end_time),
        };

        // A start date already in the past may stay; only a changed one is checked
        let reference_day = if schedule.start_date == event.start_date {
            today.min(event.start_date)
        } else {
            today
        };

        let mut errors = request.validate().err().unwrap_or_else(ValidationErrors::new);
        if let Err(schedule_errors) = schedule.validate(reference_day) {
            absorb(&mut errors, &schedule_errors, &SCHEDULE_FIELDS);
        }
        into_result(errors)?;

        let draft = NewEvent {
            title: request
                .title
                .as_deref()
                .map_or_else(|| event.title.clone(), |t| t.trim().to_string()),
            description: request
                .description
                .as_deref()
                .map_or_else(|| event.description.clone(), |d| d.trim().to_string()),
            location: request
                .location
                .as_deref()
                .map_or_else(|| event.location.clone(), |l| l.trim().to_string()),
            schedule,
            photo_url: event.photo_url.clone(),
            status: derive_status(schedule.start_date, schedule.end_date, today),
            created_by: event.created_by.clone(),
        };
        event.apply(&draft, today);
        self.ctx.event_repo().update(&event).await?;

        info!(event_id = %event.id, "Event updated");
        Ok(EventResponse::from_event(&event, today))
    }

    /// Attach or replace the event photo; the previous asset is deleted
    #[instrument(skip(self, upload), fields(actor = %actor.email, file_name = %upload.file_name))]
    pub async fn set_event_photo(
        &self,
        actor: &Actor,
        event_id: &str,
        upload: PhotoUpload,
    ) -> ServiceResult<EventResponse> {
        let mut event = load_event(self.ctx, event_id).await?;
        require_event_access(actor, &event)?;
        upload.check(self.ctx.settings().max_photo_bytes)?;

        let url = self.ctx.photo_store().save(&upload, EVENT_PHOTO_FOLDER).await?;
        let previous = event.photo_url.replace(url.clone());

        if let Err(err) = self.ctx.event_repo().update(&event).await {
            self.discard_photo(&url).await;
            return Err(err.into());
        }
        if let Some(old) = previous {
            self.discard_photo(&old).await;
        }

        info!(event_id = %event.id, "Event photo replaced");
        Ok(EventResponse::from_event(&event, self.ctx.clock().today()))
    }

    /// Delete an event with its participations and feedback
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn delete_event(&self, actor: &Actor, event_id: &str) -> ServiceResult<()> {
        let event = load_event(self.ctx, event_id).await?;
        require_event_access(actor, &event)?;

        self.ctx.event_repo().delete(&event.id).await?;
        if let Some(url) = &event.photo_url {
            self.discard_photo(url).await;
        }

        info!(event_id = %event.id, "Event deleted");
        Ok(())
    }

    /// Get an event
    #[instrument(skip(self))]
    pub async fn get_event(&self, event_id: &str) -> ServiceResult<EventResponse> {
        let event = load_event(self.ctx, event_id).await?;
        Ok(EventResponse::from_event(&event, self.ctx.clock().today()))
    }

    /// List events, earliest start first
    #[instrument(skip(self))]
    pub async fn list_events(&self, query: EventListQuery) -> ServiceResult<Vec<EventResponse>> {
        let query = EventQuery {
            title: query
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            created_by: query.created_by.as_deref().map(normalize_email),
        };
        self.list(&query).await
    }

    /// Events the caller manages: all for admins, their own for organisers
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn list_managed_events(&self, actor: &Actor) -> ServiceResult<Vec<EventResponse>> {
        require_event_manager(actor)?;
        let query = EventQuery {
            title: None,
            created_by: (!actor.is_admin()).then(|| actor.email.clone()),
        };
        self.list(&query).await
    }

    async fn list(&self, query: &EventQuery) -> ServiceResult<Vec<EventResponse>> {
        let today = self.ctx.clock().today();
        let events = self.ctx.event_repo().list(query).await?;
        Ok(events
            .iter()
            .map(|e| EventResponse::from_event(e, today))
            .collect())
    }

    async fn discard_photo(&self, url: &str) {
        if let Err(err) = self.ctx.photo_store().delete(url, EVENT_PHOTO_FOLDER).await {
            warn!(url = %url, error = %err, "Failed to delete event photo");
        }
    }
}
