//! Admin dashboard service

use ngo_core::{require_admin, Actor, Amount, EventQuery, EventStatus, Role};
use tracing::instrument;

use crate::dto::{format_cents, DashboardResponse, EventStatusCounts, RoleCounts};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Dashboard service
pub struct DashboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DashboardService<'a> {
    /// Create a new DashboardService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Platform-wide counts (admin only)
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn dashboard(&self, actor: &Actor) -> ServiceResult<DashboardResponse> {
        require_admin(actor)?;
        let today = self.ctx.clock().today();

        let by_role = self.ctx.user_repo().count_by_role().await?;
        let users = RoleCounts {
            admin: by_role.get(&Role::Admin).copied().unwrap_or(0),
            organiser: by_role.get(&Role::Organiser).copied().unwrap_or(0),
            member: by_role.get(&Role::Member).copied().unwrap_or(0),
        };

        let mut events = EventStatusCounts::default();
        for event in self.ctx.event_repo().list(&EventQuery::default()).await? {
            match event.status_on(today) {
                EventStatus::Upcoming => events.upcoming += 1,
                EventStatus::Ongoing => events.ongoing += 1,
                EventStatus::Concluded => events.concluded += 1,
            }
            events.total += 1;
        }

        let donations = self.ctx.donation_repo().list_all().await?;
        let donation_total = Amount::sum_cents(donations.iter().map(|d| d.amount));

        Ok(DashboardResponse {
            users,
            events,
            pending_approvals: self.ctx.participation_repo().count_pending().await?,
            total_volunteers: self.ctx.volunteer_repo().count().await?,
            donation_count: i64::try_from(donations.len()).unwrap_or(i64::MAX),
            donation_total: format_cents(donation_total),
        })
    }
}
