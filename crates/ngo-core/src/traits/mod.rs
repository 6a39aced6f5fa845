//! Ports implemented by infrastructure

mod clock;
mod notifier;
mod photo_store;
mod repositories;

pub use clock::{Clock, ManualClock, SystemClock};
pub use notifier::{Notifier, NotifyError};
pub use photo_store::{PhotoError, PhotoStore};
pub use repositories::{
    DonationRepository, EventQuery, EventRepository, FeedbackRepository, ParticipationRepository,
    PostingQuery, PostingRepository, RepoResult, UserRepository, VolunteerRepository,
};
