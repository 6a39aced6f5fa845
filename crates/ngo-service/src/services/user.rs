//! User service
//!
//! Read access to accounts, and profile updates by their owners.

use ngo_core::{
    normalize_email, require_admin, Actor, DomainError, PhotoUpload, User, UserProfile,
};
use tracing::{info, instrument, warn};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dto::{UpdateProfileRequest, UserResponse};

use super::common::{absorb, into_result};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Folder member photos are stored under
pub const USER_PHOTO_FOLDER: &str = "members";

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get an account; callers see their own, admins see any
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn get_user(&self, actor: &Actor, email: &str) -> ServiceResult<UserResponse> {
        let email = normalize_email(email);
        if email != actor.email {
            require_admin(actor)?;
        }

        let user = self.load_user(&email).await?;
        Ok(UserResponse::from(&user))
    }

    /// List every account (admin only)
    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn list_users(&self, actor: &Actor) -> ServiceResult<Vec<UserResponse>> {
        require_admin(actor)?;
        let users = self.ctx.user_repo().list().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Update the caller's own name and, for members, their photo
    ///
    /// A new photo replaces the stored one, which is then deleted.
    #[instrument(skip(self, request, photo), fields(actor = %actor.email))]
    pub async fn update_profile(
        &self,
        actor: &Actor,
        request: UpdateProfileRequest,
        photo: Option<PhotoUpload>,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.load_user(&actor.email).await?;

        let mut errors = request.validate().err().unwrap_or_else(ValidationErrors::new);
        if let Some(upload) = &photo {
            if !matches!(user.profile, UserProfile::Member { .. }) {
                errors.add(
                    "photo",
                    ValidationError::new("photo_role")
                        .with_message("Only members have a profile photo.".into()),
                );
            } else if let Err(photo_errors) = upload.check(self.ctx.settings().max_photo_bytes) {
                absorb(&mut errors, &photo_errors, &["photo"]);
            }
        }
        into_result(errors)?;

        if let Some(name) = request.name.as_deref() {
            user.name = name.trim().to_string();
        }

        let (new_url, previous) = match (&photo, &mut user.profile) {
            (Some(upload), UserProfile::Member { photo_url }) => {
                let url = self.ctx.photo_store().save(upload, USER_PHOTO_FOLDER).await?;
                (Some(url.clone()), photo_url.replace(url))
            }
            _ => (None, None),
        };

        if let Err(err) = self.ctx.user_repo().update(&user).await {
            if let Some(url) = &new_url {
                self.discard_photo(url).await;
            }
            return Err(err.into());
        }
        if let Some(old) = &previous {
            self.discard_photo(old).await;
        }

        info!(photo_replaced = new_url.is_some(), "Profile updated");
        Ok(UserResponse::from(&user))
    }

    async fn load_user(&self, email: &str) -> ServiceResult<User> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(email.to_string()))?;
        Ok(user)
    }

    async fn discard_photo(&self, url: &str) {
        if let Err(err) = self.ctx.photo_store().delete(url, USER_PHOTO_FOLDER).await {
            warn!(url = %url, error = %err, "Failed to delete member photo");
        }
    }
}
