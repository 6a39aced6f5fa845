//! Service context - dependency container for services
//!
//! Holds all repositories and the I/O seams (clock, notifier, photo store)
//! needed by services.

use std::sync::Arc;

use ngo_common::{JwtService, PaymentReferencer};
use ngo_core::{
    Clock, DonationRepository, EventRepository, FeedbackRepository, Notifier,
    ParticipationRepository, PhotoStore, PostingRepository, SystemClock, UserRepository,
    VolunteerRepository, DEFAULT_POINTS_PER_HOUR, MAX_PHOTO_BYTES,
};

use super::error::{ServiceError, ServiceResult};

/// Tunable values the services read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    pub points_per_hour: i32,
    pub max_photo_bytes: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            points_per_hour: DEFAULT_POINTS_PER_HOUR,
            max_photo_bytes: MAX_PHOTO_BYTES,
        }
    }
}

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories for every collection
/// - The clock every date comparison reads
/// - Notifier and photo store adapters
/// - JWT and payment reference services
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    event_repo: Arc<dyn EventRepository>,
    volunteer_repo: Arc<dyn VolunteerRepository>,
    participation_repo: Arc<dyn ParticipationRepository>,
    donation_repo: Arc<dyn DonationRepository>,
    feedback_repo: Arc<dyn FeedbackRepository>,
    posting_repo: Arc<dyn PostingRepository>,

    // Seams
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    photo_store: Arc<dyn PhotoStore>,

    // Services
    jwt_service: Arc<JwtService>,
    payment_referencer: Arc<PaymentReferencer>,

    settings: ServiceSettings,
}

impl ServiceContext {
    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the event repository
    pub fn event_repo(&self) -> &dyn EventRepository {
        self.event_repo.as_ref()
    }

    /// Get the volunteer repository
    pub fn volunteer_repo(&self) -> &dyn VolunteerRepository {
        self.volunteer_repo.as_ref()
    }

    /// Get the participation repository
    pub fn participation_repo(&self) -> &dyn ParticipationRepository {
        self.participation_repo.as_ref()
    }

    /// Get the donation repository
    pub fn donation_repo(&self) -> &dyn DonationRepository {
        self.donation_repo.as_ref()
    }

    /// Get the feedback repository
    pub fn feedback_repo(&self) -> &dyn FeedbackRepository {
        self.feedback_repo.as_ref()
    }

    pub fn posting_repo(&self) -> &dyn PostingRepository {
        self.posting_repo.as_ref()
    }

    // === Seams ===

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Shared handle, for work that outlives the request
    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    pub fn photo_store(&self) -> &dyn PhotoStore {
        self.photo_store.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn payment_referencer(&self) -> &PaymentReferencer {
        self.payment_referencer.as_ref()
    }

    pub fn settings(&self) -> ServiceSettings {
        self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    event_repo: Option<Arc<dyn EventRepository>>,
    volunteer_repo: Option<Arc<dyn VolunteerRepository>>,
    participation_repo: Option<Arc<dyn ParticipationRepository>>,
    donation_repo: Option<Arc<dyn DonationRepository>>,
    feedback_repo: Option<Arc<dyn FeedbackRepository>>,
    posting_repo: Option<Arc<dyn PostingRepository>>,
    clock: Option<Arc<dyn Clock>>,
    notifier: Option<Arc<dyn Notifier>>,
    photo_store: Option<Arc<dyn PhotoStore>>,
    jwt_service: Option<Arc<JwtService>>,
    payment_referencer: Option<Arc<PaymentReferencer>>,
    settings: ServiceSettings,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use one store for every repository
    pub fn store<S>(self, store: Arc<S>) -> Self
    where
        S: UserRepository
            + EventRepository
            + VolunteerRepository
            + ParticipationRepository
            + DonationRepository
            + FeedbackRepository
            + PostingRepository
            + 'static,
    {
        self.user_repo(store.clone())
            .event_repo(store.clone())
            .volunteer_repo(store.clone())
            .participation_repo(store.clone())
            .donation_repo(store.clone())
            .feedback_repo(store.clone())
            .posting_repo(store)
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn EventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn volunteer_repo(mut self, repo: Arc<dyn VolunteerRepository>) -> Self {
        self.volunteer_repo = Some(repo);
        self
    }

    pub fn participation_repo(mut self, repo: Arc<dyn ParticipationRepository>) -> Self {
        self.participation_repo = Some(repo);
        self
    }

    pub fn donation_repo(mut self, repo: Arc<dyn DonationRepository>) -> Self {
        self.donation_repo = Some(repo);
        self
    }

    pub fn feedback_repo(mut self, repo: Arc<dyn FeedbackRepository>) -> Self {
        self.feedback_repo = Some(repo);
        self
    }

    pub fn posting_repo(mut self, repo: Arc<dyn PostingRepository>) -> Self {
        self.posting_repo = Some(repo);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn photo_store(mut self, store: Arc<dyn PhotoStore>) -> Self {
        self.photo_store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn payment_referencer(mut self, referencer: Arc<PaymentReferencer>) -> Self {
        self.payment_referencer = Some(referencer);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the ServiceContext
    ///
    /// The clock defaults to [`SystemClock`].
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` naming the first unset collaborator
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &'static str) -> ServiceResult<T> {
            value.ok_or(ServiceError::MissingDependency(name))
        }

        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            event_repo: required(self.event_repo, "event_repo")?,
            volunteer_repo: required(self.volunteer_repo, "volunteer_repo")?,
            participation_repo: required(self.participation_repo, "participation_repo")?,
            donation_repo: required(self.donation_repo, "donation_repo")?,
            feedback_repo: required(self.feedback_repo, "feedback_repo")?,
            posting_repo: required(self.posting_repo, "posting_repo")?,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            notifier: required(self.notifier, "notifier")?,
            photo_store: required(self.photo_store, "photo_store")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            payment_referencer: required(self.payment_referencer, "payment_referencer")?,
            settings: self.settings,
        })
    }
}
