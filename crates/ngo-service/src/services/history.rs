//! Volunteer history service

use std::collections::HashMap;

use ngo_core::{normalize_email, Amount, EventQuery};
use tracing::instrument;

use crate::dto::{ActivityResponse, DonationResponse, HistoryResponse, ParticipationResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// History service
pub struct HistoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HistoryService<'a> {
    /// Create a new HistoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Participations of `email` with their events, newest shift first,
    /// plus donations and point totals
    #[instrument(skip(self))]
    pub async fn my_activities(&self, email: &str) -> ServiceResult<HistoryResponse> {
        let email = normalize_email(email);
        let today = self.ctx.clock().today();

        let participations = self.ctx.participation_repo().list_by_email(&email).await?;
        let events: HashMap<_, _> = self
            .ctx
            .event_repo()
            .list(&EventQuery::default())
            .await?
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect();

        let volunteer_points: i64 = participations
            .iter()
            .filter(|p| p.is_approved())
            .map(|p| i64::from(p.points))
            .fold(0_i64, i64::saturating_add);

        // Participations cascade with their event, so a miss is a concurrent delete
        let activities = participations
            .iter()
            .filter_map(|p| {
                let event = events.get(&p.event_id)?;
                Some(ActivityResponse {
                    participation: ParticipationResponse::from(p),
                    event_title: event.title.clone(),
                    event_start_date: event.start_date,
                    event_end_date: event.end_date,
                    event_status: event.status_on(today),
                })
            })
            .collect();

        let donations = self.ctx.donation_repo().list_by_donor(&email).await?;
        let donated_cents = Amount::sum_cents(donations.iter().map(|d| d.amount));
        let donation_points = donated_cents / 100;

        Ok(HistoryResponse {
            email,
            activities,
            donations: donations.iter().map(DonationResponse::from).collect(),
            volunteer_points,
            donation_points,
            total_points: volunteer_points.saturating_add(donation_points),
        })
    }
}
