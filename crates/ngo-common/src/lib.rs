//! # ngo-common
//!
//! Shared utilities including configuration, error handling, authentication,
//! payment references, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod payment;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{hash_password, password_problems, verify_password, AccessToken, Claims, JwtService};
pub use config::{
    AdminBootstrap, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, MailConfig, PaymentConfig, RateLimitConfig, ScoringConfig, ServerConfig,
    StorageBackend, StorageConfig,
};
pub use error::{domain_status, AppError, AppResult};
pub use payment::PaymentReferencer;
pub use telemetry::{try_init_tracing, TracingConfig, TracingError};
