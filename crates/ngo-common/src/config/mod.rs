//! Configuration structs

mod app_config;

pub use app_config::{
    AdminBootstrap, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, MailConfig, PaymentConfig, RateLimitConfig, ScoringConfig, ServerConfig,
    StorageBackend, StorageConfig,
};
