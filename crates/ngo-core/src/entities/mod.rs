//! Domain entities - core business objects

mod donation;
mod event;
mod feedback;
mod participation;
mod posting;
mod user;
mod volunteer;

pub use donation::{
    is_valid_card_number, last_four, normalize_card_number, Donation, NewDonation, PaymentMethod,
};
pub use event::{derive_status, Event, EventSchedule, EventStatus, NewEvent};
pub use feedback::{Feedback, NewFeedback, MAX_COMMENT_LEN, MAX_RATING, MIN_RATING};
pub use participation::{
    points_for, ApprovalStatus, CompletionStatus, Enrollment, NewParticipation, NewSignup,
    Participation, ParticipationStatus, DEFAULT_POINTS_PER_HOUR, MAX_WORK_HOURS, MIN_WORK_HOURS,
};
pub use posting::{NewPosting, Posting, MAX_POSTING_TITLE_LEN};
pub use user::{Role, User, UserProfile};
pub use volunteer::{
    is_valid_mobile_number, normalize_email, Volunteer, VolunteerDetails, MAX_VOLUNTEER_AGE,
    MIN_VOLUNTEER_AGE,
};
