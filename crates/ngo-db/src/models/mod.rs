//! Database models - SQLx-compatible structs for PostgreSQL tables

mod donation;
mod event;
mod feedback;
mod participation;
mod posting;
mod tally;
mod user;
mod volunteer;

pub use donation::DonationModel;
pub use event::EventModel;
pub use feedback::FeedbackModel;
pub use participation::{EnrollmentModel, ParticipationModel};
pub use posting::PostingModel;
pub use tally::{DonationTallyModel, RoleCountModel, VolunteerTallyModel};
pub use user::UserModel;
pub use volunteer::VolunteerModel;
