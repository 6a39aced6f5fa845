//! Authentication service
//!
//! Handles account registration, login, and bootstrapping the first admin.

use ngo_common::{hash_password, verify_password, AccessToken, AppError};
use ngo_core::{normalize_email, Actor, DomainError, User, UserProfile};
use tracing::{info, instrument, warn};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dto::{AccountType, AuthResponse, LoginRequest, RegisterRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a member or organiser account
    #[instrument(
        skip(self, request),
        fields(email = %request.email, account_type = ?request.account_type)
    )]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        request.validate()?;
        let profile = profile_for(&request)?;

        let email = normalize_email(&request.email);
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::new(email, request.name.trim().to_string(), profile);
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(email = %user.email, role = %user.role(), "Account registered");

        let token = self.ctx.jwt_service().issue(&user.email, user.role())?;
        Ok(auth_response(token, &user))
    }

    /// Login with e-mail and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        request.validate()?;
        let email = normalize_email(&request.email);

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown account");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(&email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!("Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(role = %user.role(), "User logged in");

        let token = self.ctx.jwt_service().issue(&user.email, user.role())?;
        Ok(auth_response(token, &user))
    }

    /// Account of the authenticated caller
    #[instrument(skip(self), fields(email = %actor.email))]
    pub async fn current_user(&self, actor: &Actor) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&actor.email)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(actor.email.clone()))?;
        Ok(UserResponse::from(&user))
    }

    /// Create the admin account if it does not exist yet.
    ///
    /// Returns `true` when an account was created.
    #[instrument(skip(self, password))]
    pub async fn ensure_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> ServiceResult<bool> {
        let email = normalize_email(email);
        if self.ctx.user_repo().email_exists(&email).await? {
            return Ok(false);
        }

        let password_hash = hash_password(password)?;
        let admin = User::new(email, name.to_string(), UserProfile::Admin);
        self.ctx.user_repo().create(&admin, &password_hash).await?;

        info!(email = %admin.email, "Admin account bootstrapped");
        Ok(true)
    }
}

/// Build the profile for the requested account type.
///
/// Organisers must supply every organisation field; each missing one is
/// reported under its own name.
fn profile_for(request: &RegisterRequest) -> Result<UserProfile, ValidationErrors> {
    match request.account_type {
        AccountType::Member => Ok(UserProfile::Member { photo_url: None }),
        AccountType::Organiser => {
            let mut errors = ValidationErrors::new();
            let mut required = |field: &'static str, value: &Option<String>| -> String {
                match value.as_deref().map(str::trim) {
                    Some(v) if !v.is_empty() => v.to_string(),
                    _ => {
                        errors.add(
                            field,
                            ValidationError::new("required")
                                .with_message("Required for organiser accounts.".into()),
                        );
                        String::new()
                    }
                }
            };

            let org_name = required("org_name", &request.org_name);
            let org_address = required("org_address", &request.org_address);
            let org_phone = required("org_phone", &request.org_phone);

            if errors.is_empty() {
                Ok(UserProfile::Organiser {
                    org_name,
                    org_address,
                    org_phone,
                })
            } else {
                Err(errors)
            }
        }
    }
}

fn auth_response(token: AccessToken, user: &User) -> AuthResponse {
    AuthResponse {
        access_token: token.access_token,
        token_type: token.token_type,
        expires_in: token.expires_in,
        user: UserResponse::from(user),
    }
}
