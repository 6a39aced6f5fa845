//! Volunteer signup service
//!
//! Registers a volunteer for a shift at an event. Anyone may sign up; no
//! account is needed. The volunteer record and the participation are written
//! in one storage transaction, and the confirmation mail is sent afterwards
//! on a detached task.

use ngo_core::{
    normalize_email, points_for, DomainError, Enrollment, Event, NewParticipation, NewSignup,
    VolunteerDetails,
};
use tracing::{info, instrument, warn};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dto::{EnrollmentResponse, SignupRequest};

use super::common::{into_result, load_event};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Signup service
pub struct SignupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SignupService<'a> {
    /// Create a new SignupService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sign a volunteer up for an event shift.
    ///
    /// Checks run in order: field validation (all violations at once), the
    /// event's existence, whether it has ended, the shift window, and finally
    /// duplicate registration.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn sign_up(
        &self,
        event_id: &str,
        request: SignupRequest,
    ) -> ServiceResult<EnrollmentResponse> {
        request.validate()?;

        let event = load_event(self.ctx, event_id).await?;
        let now = self.ctx.clock().now();
        if !event.accepts_signups_at(now) {
            return Err(DomainError::EventConcluded.into());
        }
        check_shift_window(&event, &request)?;

        let email = normalize_email(&request.email);
        if self
            .ctx
            .participation_repo()
            .find_by_event_and_email(&event.id, &email)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateSignup.into());
        }

        let signup = NewSignup {
            volunteer: VolunteerDetails {
                name: request.name.trim().to_string(),
                email,
                phone: request.phone.trim().to_string(),
                age: request.age,
            },
            participation: NewParticipation {
                event_id: event.id.clone(),
                shift_start: request.shift_start,
                work_hours: request.work_hours,
                points: points_for(request.work_hours, self.ctx.settings().points_per_hour),
            },
        };

        let enrollment = self.ctx.participation_repo().sign_up(&signup).await?;

        info!(
            event_id = %event.id,
            volunteer_id = %enrollment.volunteer.id,
            participation_id = enrollment.participation.id,
            points = enrollment.participation.points,
            "Volunteer signed up"
        );

        self.send_confirmation(&event, &enrollment);
        Ok(EnrollmentResponse::from(&enrollment))
    }

    /// Spawn the confirmation mail; delivery never affects the signup
    fn send_confirmation(&self, event: &Event, enrollment: &Enrollment) {
        let notifier = self.ctx.notifier();
        let to = enrollment.volunteer.email.clone();
        let subject = format!("Registration received: {}", event.title);
        let body = confirmation_body(event, enrollment);

        tokio::spawn(async move {
            if let Err(err) = notifier.send(&to, &subject, &body).await {
                warn!(to = %to, error = %err, "Failed to send signup confirmation");
            }
        });
    }
}

/// The shift must start within the event's span
fn check_shift_window(event: &Event, request: &SignupRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if request.shift_start < event.starts_at() || request.shift_start > event.ends_at() {
        errors.add(
            "shift_start",
            ValidationError::new("shift_outside_event")
                .with_message("Shift must start within the event's dates and times.".into()),
        );
    }
    into_result(errors)
}

fn confirmation_body(event: &Event, enrollment: &Enrollment) -> String {
    let participation = &enrollment.participation;
    format!(
        "Hi {name},\n\n\
         Thank you for signing up for \"{title}\" at {location}.\n\
         Shift: {start} to {end} ({hours} hours, {points} points once approved).\n\n\
         Your registration is pending approval by the organiser.\n",
        name = enrollment.volunteer.name,
        title = event.title,
        location = event.location,
        start = participation.shift_start.format("%Y-%m-%d %H:%M"),
        end = participation.shift_end().format("%Y-%m-%d %H:%M"),
        hours = participation.work_hours,
        points = participation.points,
    )
}
