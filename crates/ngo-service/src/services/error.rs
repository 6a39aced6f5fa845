//! Service layer error types
//!
//! Services return [`ServiceError`]; the API layer turns it into a status
//! and a stable error code.

use ngo_common::{domain_status, AppError};
use ngo_core::{DomainError, PhotoError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Rule violation raised by the domain or storage layer
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Credential, token or infrastructure failure
    #[error(transparent)]
    App(#[from] AppError),

    /// Unknown or malformed identifier
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// The context builder was not given a collaborator
    #[error("Service context is missing {0}")]
    MissingDependency(&'static str),
}

impl ServiceError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// The wrapped domain error, if any
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) | Self::App(AppError::Domain(e)) => Some(e),
            _ => None,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::NotFound { .. } => 404,
            Self::MissingDependency(_) => 500,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::MissingDependency(_) => "CONFIG_ERROR",
        }
    }
}

// Field errors from `validate()` and the photo check share the domain's
// `InvalidFields` so every violation reaches the response together.
impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Domain(DomainError::InvalidFields(errors))
    }
}

impl From<PhotoError> for ServiceError {
    fn from(err: PhotoError) -> Self {
        match err {
            PhotoError::Rejected(errors) => errors.into(),
            PhotoError::Storage(msg) => Self::App(AppError::ExternalService(msg)),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::NotFound { resource, id } => {
                AppError::not_found(format!("{resource} {id}"))
            }
            ServiceError::MissingDependency(name) => {
                AppError::Config(format!("service context is missing {name}"))
            }
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found("Event", "E123");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(err.to_string().contains("Event not found: E123"));
    }

    #[test]
    fn test_domain_errors_keep_their_status() {
        assert_eq!(ServiceError::from(DomainError::DuplicateSignup).status_code(), 409);
        assert_eq!(ServiceError::from(DomainError::EventConcluded).status_code(), 422);
        assert_eq!(ServiceError::from(DomainError::NotEventOwner).status_code(), 403);
    }

    #[test]
    fn test_photo_rejection_is_a_field_error() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("photo", validator::ValidationError::new("photo_type"));
        let err = ServiceError::from(PhotoError::Rejected(errors));
        assert_eq!(err.status_code(), 400);
        assert!(err.as_domain().and_then(DomainError::field_errors).is_some());
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError = ServiceError::from(DomainError::EmailAlreadyExists).into();
        assert_eq!(app_err.status_code(), 409);

        let app_err: AppError = ServiceError::MissingDependency("notifier").into();
        assert_eq!(app_err.error_code(), "CONFIG_ERROR");
    }
}
