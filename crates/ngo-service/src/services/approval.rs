//! Approval workflow service
//!
//! Moves participations through approval (pending, approved, rejected) and
//! completion (waiting, completed, cancelled). Every change is written with a
//! compare-and-set on the state it was decided from, so two managers acting
//! at once cannot both win. Points are never touched here, and a completed
//! shift is never reset to pending.

use ngo_core::{
    require_event_access, require_event_manager, Actor, ApprovalStatus, CompletionStatus,
    DomainError, Participation,
};
use tracing::{info, instrument};

use crate::dto::{EnrollmentResponse, ParticipationResponse};

use super::common::load_event;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Approval workflow service
pub struct ApprovalService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ApprovalService<'a> {
    /// Create a new ApprovalService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Approve a pending participation
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn approve(
        &self,
        actor: &Actor,
        participation_id: i64,
    ) -> ServiceResult<ParticipationResponse> {
        self.decide(actor, participation_id, ApprovalStatus::Approved).await
    }

    /// Reject a pending participation
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn reject(
        &self,
        actor: &Actor,
        participation_id: i64,
    ) -> ServiceResult<ParticipationResponse> {
        self.decide(actor, participation_id, ApprovalStatus::Rejected).await
    }

    /// Return a decided participation to pending
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn reset_to_pending(
        &self,
        actor: &Actor,
        participation_id: i64,
    ) -> ServiceResult<ParticipationResponse> {
        let participation = self.load_managed(actor, participation_id).await?;
        let Some(target) = participation.status().reset_approval()? else {
            return Ok(ParticipationResponse::from(&participation));
        };

        let updated = self
            .ctx
            .participation_repo()
            .update_approval(participation.id, participation.status(), target)
            .await?;

        info!(
            participation_id = updated.id,
            from = participation.approval.as_str(),
            "Participation reset to pending"
        );
        Ok(ParticipationResponse::from(&updated))
    }

    /// Mark an approved participation as completed
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn mark_completed(
        &self,
        actor: &Actor,
        participation_id: i64,
    ) -> ServiceResult<ParticipationResponse> {
        self.finish(actor, participation_id, CompletionStatus::Completed).await
    }

    /// Mark a participation as cancelled
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn mark_cancelled(
        &self,
        actor: &Actor,
        participation_id: i64,
    ) -> ServiceResult<ParticipationResponse> {
        self.finish(actor, participation_id, CompletionStatus::Cancelled).await
    }

    /// Participations of one event with their volunteers
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn list_for_event(
        &self,
        actor: &Actor,
        event_id: &str,
    ) -> ServiceResult<Vec<EnrollmentResponse>> {
        let event = load_event(self.ctx, event_id).await?;
        require_event_access(actor, &event)?;

        let enrollments = self.ctx.participation_repo().list_by_event(&event.id).await?;
        Ok(enrollments.iter().map(EnrollmentResponse::from).collect())
    }

    /// Pending participations: all for admins, own events for organisers
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn list_pending(&self, actor: &Actor) -> ServiceResult<Vec<EnrollmentResponse>> {
        require_event_manager(actor)?;
        let owner = (!actor.is_admin()).then_some(actor.email.as_str());

        let enrollments = self.ctx.participation_repo().list_pending(owner).await?;
        Ok(enrollments.iter().map(EnrollmentResponse::from).collect())
    }

    async fn decide(
        &self,
        actor: &Actor,
        participation_id: i64,
        target: ApprovalStatus,
    ) -> ServiceResult<ParticipationResponse> {
        let participation = self.load_managed(actor, participation_id).await?;
        let Some(target) = participation.approval.transition_to(target)? else {
            return Ok(ParticipationResponse::from(&participation));
        };

        let updated = self
            .ctx
            .participation_repo()
            .update_approval(participation.id, participation.status(), target)
            .await?;

        info!(
            participation_id = updated.id,
            event_id = %updated.event_id,
            approval = updated.approval.as_str(),
            "Participation decided"
        );
        Ok(ParticipationResponse::from(&updated))
    }

    async fn finish(
        &self,
        actor: &Actor,
        participation_id: i64,
        target: CompletionStatus,
    ) -> ServiceResult<ParticipationResponse> {
        let participation = self.load_managed(actor, participation_id).await?;
        let Some(target) = participation.completion.transition_to(target)? else {
            return Ok(ParticipationResponse::from(&participation));
        };
        if target == CompletionStatus::Completed && !participation.is_approved() {
            return Err(DomainError::CompletionRequiresApproval.into());
        }

        let updated = self
            .ctx
            .participation_repo()
            .update_completion(participation.id, participation.status(), target)
            .await?;

        info!(
            participation_id = updated.id,
            completion = updated.completion.as_str(),
            "Participation completion updated"
        );
        Ok(ParticipationResponse::from(&updated))
    }

    /// Load a participation the actor may manage
    async fn load_managed(
        &self,
        actor: &Actor,
        participation_id: i64,
    ) -> ServiceResult<Participation> {
        require_event_manager(actor)?;

        let participation = self
            .ctx
            .participation_repo()
            .find_by_id(participation_id)
            .await?
            .ok_or(DomainError::ParticipationNotFound(participation_id))?;

        let event = self
            .ctx
            .event_repo()
            .find_by_id(&participation.event_id)
            .await?
            .ok_or_else(|| DomainError::EventNotFound(participation.event_id.clone()))?;
        require_event_access(actor, &event)?;

        Ok(participation)
    }
}
