//! Leaderboard service
//!
//! Recomputed from storage on every call.

use std::collections::BTreeSet;

use ngo_core::rank_leaderboard;
use tracing::{debug, instrument};

use crate::dto::LeaderboardResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Leaderboard service
pub struct LeaderboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LeaderboardService<'a> {
    /// Create a new LeaderboardService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Rank everyone with approved volunteering or donations.
    ///
    /// `top` only truncates the ranked list.
    #[instrument(skip(self))]
    pub async fn compute_leaderboard(
        &self,
        top: Option<usize>,
    ) -> ServiceResult<LeaderboardResponse> {
        let volunteers = self.ctx.participation_repo().approved_tallies().await?;
        let donations = self.ctx.donation_repo().tallies().await?;

        let emails: Vec<String> = volunteers
            .iter()
            .map(|t| t.email.clone())
            .chain(donations.iter().map(|t| t.email.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let names = self.ctx.user_repo().display_names(&emails).await?;

        let entries = rank_leaderboard(volunteers, donations, &names, top);
        debug!(participants = emails.len(), shown = entries.len(), "Leaderboard computed");

        Ok(LeaderboardResponse { entries })
    }
}
