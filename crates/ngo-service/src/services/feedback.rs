//! Feedback service
//!
//! A volunteer may rate an event once, after it has ended, and only with an
//! approved participation. Anonymous feedback hides the volunteer from
//! readers while storage still keys the one-per-event rule on them.

use ngo_core::{
    normalize_email, require_admin, Actor, DomainError, Event, IdentifierKind, NewFeedback,
    Participation,
};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{FeedbackEligibilityResponse, FeedbackRequest, FeedbackResponse};

use super::common::{load_event, parse_id};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Feedback service
pub struct FeedbackService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedbackService<'a> {
    /// Create a new FeedbackService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Whether `email` may submit feedback for the event right now
    #[instrument(skip(self))]
    pub async fn can_submit_feedback(&self, email: &str, event_id: &str) -> ServiceResult<bool> {
        match self.check(&normalize_email(email), event_id).await {
            Ok(_) => Ok(true),
            Err(err) if is_refusal(&err) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Eligibility with the rule that blocks it, for clients to explain
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn eligibility(
        &self,
        actor: &Actor,
        event_id: &str,
    ) -> ServiceResult<FeedbackEligibilityResponse> {
        let event = load_event(self.ctx, event_id).await?;
        let event_id = event.id.clone();

        match self.check_event(&actor.email, event).await {
            Ok(_) => Ok(FeedbackEligibilityResponse {
                event_id,
                eligible: true,
                reason: None,
            }),
            Err(err) if is_refusal(&err) => Ok(FeedbackEligibilityResponse {
                event_id,
                eligible: false,
                reason: Some(err.error_code().to_string()),
            }),
            Err(err) => Err(err),
        }
    }

    /// Submit feedback for a concluded event
    #[instrument(skip(self, request), fields(actor = %actor.email, rating = request.rating))]
    pub async fn submit_feedback(
        &self,
        actor: &Actor,
        event_id: &str,
        request: FeedbackRequest,
    ) -> ServiceResult<FeedbackResponse> {
        request.validate()?;
        let (event, participation) = self.check(&actor.email, event_id).await?;

        let draft = NewFeedback {
            event_id: event.id.clone(),
            submitter: participation.volunteer_id,
            anonymous: request.anonymous,
            rating: request.rating,
            comment: request.comment.trim().to_string(),
            submitted_at: self.ctx.clock().now(),
        };
        let feedback = self.ctx.feedback_repo().create(&draft).await?;

        info!(
            feedback_id = %feedback.id,
            event_id = %event.id,
            anonymous = feedback.is_anonymous(),
            "Feedback submitted"
        );
        Ok(FeedbackResponse::from(&feedback))
    }

    /// List feedback, newest first, optionally for one event
    #[instrument(skip(self))]
    pub async fn list_feedback(
        &self,
        event_id: Option<&str>,
    ) -> ServiceResult<Vec<FeedbackResponse>> {
        let event_id = event_id
            .map(|raw| parse_id(IdentifierKind::Event, raw))
            .transpose()?;
        let feedback = self.ctx.feedback_repo().list(event_id.as_ref()).await?;
        Ok(feedback.iter().map(FeedbackResponse::from).collect())
    }

    /// Delete feedback (admin only)
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn delete_feedback(&self, actor: &Actor, feedback_id: &str) -> ServiceResult<()> {
        require_admin(actor)?;
        let id = parse_id(IdentifierKind::Feedback, feedback_id)?;
        self.ctx.feedback_repo().delete(&id).await?;

        info!(feedback_id = %id, "Feedback deleted");
        Ok(())
    }

    async fn check(&self, email: &str, event_id: &str) -> ServiceResult<(Event, Participation)> {
        let event = load_event(self.ctx, event_id).await?;
        self.check_event(email, event).await
    }

    /// Apply every gate rule in order
    async fn check_event(
        &self,
        email: &str,
        event: Event,
    ) -> ServiceResult<(Event, Participation)> {
        if !event.feedback_open_on(self.ctx.clock().today()) {
            return Err(DomainError::FeedbackNotOpen.into());
        }

        let participation = self
            .ctx
            .participation_repo()
            .find_by_event_and_email(&event.id, email)
            .await?
            .filter(Participation::is_approved)
            .ok_or(DomainError::NotApprovedVolunteer)?;

        if self
            .ctx
            .feedback_repo()
            .exists_for(&participation.volunteer_id, &event.id)
            .await?
        {
            return Err(DomainError::FeedbackAlreadySubmitted.into());
        }

        Ok((event, participation))
    }
}

/// Errors that mean "not eligible" rather than a failure
fn is_refusal(err: &ServiceError) -> bool {
    match err {
        ServiceError::NotFound { .. } => true,
        other => other.as_domain().is_some_and(|e| {
            e.is_not_found()
                || matches!(
                    e,
                    DomainError::FeedbackNotOpen
                        | DomainError::NotApprovedVolunteer
                        | DomainError::FeedbackAlreadySubmitted
                )
        }),
    }
}
