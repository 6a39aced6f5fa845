//! Aggregate rows -> leaderboard tallies

use ngo_core::{DonationTally, VolunteerTally};

use crate::models::{DonationTallyModel, VolunteerTallyModel};

impl From<VolunteerTallyModel> for VolunteerTally {
    fn from(model: VolunteerTallyModel) -> Self {
        VolunteerTally {
            email: model.email,
            points: model.points,
            event_count: model.event_count,
            last_shift: model.last_shift,
        }
    }
}

impl From<DonationTallyModel> for DonationTally {
    fn from(model: DonationTallyModel) -> Self {
        DonationTally {
            email: model.email,
            total_cents: model.total_cents,
            donation_count: model.donation_count,
            last_donation: model.last_donation,
        }
    }
}
