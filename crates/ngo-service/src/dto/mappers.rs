//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chrono::NaiveDate;
use ngo_core::{
    Donation, Enrollment, Event, Feedback, Participation, Posting, User, UserProfile, Volunteer,
};

use super::responses::{
    DonationResponse, EnrollmentResponse, EventResponse, FeedbackResponse, OrganisationResponse,
    ParticipationResponse, PostingResponse, UserResponse, VolunteerResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        let (photo_url, organisation) = match &user.profile {
            UserProfile::Admin => (None, None),
            UserProfile::Member { photo_url } => (photo_url.clone(), None),
            UserProfile::Organiser {
                org_name,
                org_address,
                org_phone,
            } => (
                None,
                Some(OrganisationResponse {
                    name: org_name.clone(),
                    address: org_address.clone(),
                    phone: org_phone.clone(),
                }),
            ),
        };

        Self {
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role(),
            photo_url,
            organisation,
            joined_at: user.joined_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Posting Mappers
// ============================================================================

impl From<&Posting> for PostingResponse {
    fn from(posting: &Posting) -> Self {
        Self {
            id: posting.id.clone(),
            title: posting.title.clone(),
            photo_url: posting.photo_url.clone(),
            created_by: posting.created_by.clone(),
            created_at: posting.created_at,
        }
    }
}

// ============================================================================
// Participation Mappers
// ============================================================================

impl From<&Volunteer> for VolunteerResponse {
    fn from(volunteer: &Volunteer) -> Self {
        Self {
            id: volunteer.id.clone(),
            name: volunteer.name.clone(),
            email: volunteer.email.clone(),
            phone: volunteer.phone.clone(),
            age: volunteer.age,
        }
    }
}

impl From<&Participation> for ParticipationResponse {
    fn from(p: &Participation) -> Self {
        Self {
            id: p.id,
            volunteer_id: p.volunteer_id.clone(),
            event_id: p.event_id.clone(),
            shift_start: p.shift_start,
            shift_end: p.shift_end(),
            work_hours: p.work_hours,
            points: p.points,
            completion: p.completion,
            approval: p.approval,
            created_at: p.created_at,
        }
    }
}

impl From<Participation> for ParticipationResponse {
    fn from(p: Participation) -> Self {
        Self::from(&p)
    }
}

impl From<&Enrollment> for EnrollmentResponse {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            participation: ParticipationResponse::from(&enrollment.participation),
            volunteer: VolunteerResponse::from(&enrollment.volunteer),
        }
    }
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(enrollment: Enrollment) -> Self {
        Self::from(&enrollment)
    }
}

// ============================================================================
// Feedback / Donation Mappers
// ============================================================================

impl From<&Feedback> for FeedbackResponse {
    fn from(feedback: &Feedback) -> Self {
        Self {
            id: feedback.id.clone(),
            event_id: feedback.event_id.clone(),
            volunteer_id: feedback.volunteer_id.clone(),
            anonymous: feedback.is_anonymous(),
            rating: feedback.rating,
            comment: feedback.comment.clone(),
            submitted_at: feedback.submitted_at,
        }
    }
}

impl From<Feedback> for FeedbackResponse {
    fn from(feedback: Feedback) -> Self {
        Self::from(&feedback)
    }
}

impl From<&Donation> for DonationResponse {
    fn from(donation: &Donation) -> Self {
        Self {
            id: donation.id,
            donor_email: donation.donor_email.clone(),
            event_id: donation.event_id.clone(),
            amount: donation.amount,
            payment_method: donation.payment_method,
            payment_reference: donation.payment_reference.clone(),
            donated_at: donation.donated_at,
        }
    }
}

impl From<Donation> for DonationResponse {
    fn from(donation: Donation) -> Self {
        Self::from(&donation)
    }
}

// ============================================================================
// Event Mappers
// ============================================================================

impl EventResponse {
    /// Map an event, deriving its status as of `today`
    pub fn from_event(event: &Event, today: NaiveDate) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            start_time: event.start_time,
            end_time: event.end_time,
            photo_url: event.photo_url.clone(),
            status: event.status_on(today),
            created_by: event.created_by.clone(),
            created_at: event.created_at,
        }
    }
}
