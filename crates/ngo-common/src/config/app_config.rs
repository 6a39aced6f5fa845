//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub mail: MailConfig,
    pub scoring: ScoringConfig,
    pub payment: PaymentConfig,
    pub admin: Option<AdminBootstrap>,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where workflow data lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local store for development and tests
    Memory,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Required for the Postgres backend
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Photo storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// URL prefix under which `upload_dir` is served
    #[serde(default = "default_public_url")]
    pub public_url: String,
    #[serde(default = "default_max_photo_bytes")]
    pub max_photo_bytes: usize,
}

/// Outbound mail configuration; without an SMTP host mail is only logged
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    #[serde(default = "default_mail_from")]
    pub from: String,
}

impl MailConfig {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.smtp_host.as_deref().is_some_and(|h| !h.is_empty())
    }
}

/// Points configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_points_per_hour")]
    pub points_per_hour: i32,
}

/// Payment reference configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Secret mixed into card fingerprints
    pub reference_pepper: String,
}

/// Administrator account ensured at start-up
#[derive(Debug, Clone, Deserialize)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
    #[serde(default = "default_admin_name")]
    pub name: String,
}

// Default value functions
fn default_app_name() -> String {
    "ngo-volunteer".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_access_token_expiry() -> i64 {
    3600 // 1 hour
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_public_url() -> String {
    "/uploads".to_string()
}

fn default_max_photo_bytes() -> usize {
    ngo_core::value_objects::MAX_PHOTO_BYTES
}

fn default_smtp_port() -> u16 {
    587
}

fn default_mail_from() -> String {
    "NGO Volunteer <no-reply@localhost>".to_string()
}

fn default_points_per_hour() -> i32 {
    ngo_core::entities::DEFAULT_POINTS_PER_HOUR
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

const DEV_JWT_SECRET: &str = "development-only-secret-change-me";
const DEV_PEPPER: &str = "development-only-pepper";

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required values are missing or invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            lookup(key)
                .map(|s| {
                    s.trim()
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidValue(key, s))
                })
                .transpose()
        };

        let env = match lookup("APP_ENV") {
            Some(s) => Environment::parse(&s).ok_or(ConfigError::InvalidValue("APP_ENV", s))?,
            None => Environment::default(),
        };

        let backend = match lookup("STORAGE_BACKEND").as_deref() {
            None | Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::InvalidValue("STORAGE_BACKEND", other.to_string()))
            }
        };
        let database_url = lookup("DATABASE_URL");
        if backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingVar("DATABASE_URL"));
        }

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) => secret,
            None if env.is_production() => return Err(ConfigError::MissingVar("JWT_SECRET")),
            None => DEV_JWT_SECRET.to_string(),
        };
        if env.is_production() && jwt_secret.len() < 32 {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET",
                "must be at least 32 characters in production".to_string(),
            ));
        }

        let reference_pepper = match lookup("PAYMENT_REFERENCE_PEPPER") {
            Some(pepper) => pepper,
            None if env.is_production() => {
                return Err(ConfigError::MissingVar("PAYMENT_REFERENCE_PEPPER"))
            }
            None => DEV_PEPPER.to_string(),
        };

        let points_per_hour = match lookup("POINTS_PER_HOUR") {
            Some(s) => match s.trim().parse::<i32>() {
                Ok(v) if v > 0 => v,
                _ => return Err(ConfigError::InvalidValue("POINTS_PER_HOUR", s)),
            },
            None => default_points_per_hour(),
        };

        let admin = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminBootstrap {
                email,
                password,
                name: lookup("ADMIN_NAME").unwrap_or_else(default_admin_name),
            }),
            (Some(_), None) => return Err(ConfigError::MissingVar("ADMIN_PASSWORD")),
            _ => None,
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: parsed("API_PORT")?
                    .map(|p| {
                        u16::try_from(p)
                            .map_err(|_| ConfigError::InvalidValue("API_PORT", p.to_string()))
                    })
                    .transpose()?
                    .unwrap_or_else(default_port),
                request_timeout_secs: parsed("REQUEST_TIMEOUT_SECS")?
                    .unwrap_or_else(default_request_timeout),
            },
            database: DatabaseConfig {
                backend,
                url: database_url,
                max_connections: parsed("DATABASE_MAX_CONNECTIONS")?
                    .map_or_else(default_max_connections, |v| v as u32),
                min_connections: parsed("DATABASE_MIN_CONNECTIONS")?
                    .map_or_else(default_min_connections, |v| v as u32),
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                access_token_expiry: parsed("JWT_ACCESS_TOKEN_EXPIRY")?
                    .map_or_else(default_access_token_expiry, |v| v as i64),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: parsed("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .map_or_else(default_requests_per_second, |v| v as u32),
                burst: parsed("RATE_LIMIT_BURST")?.map_or_else(default_burst, |v| v as u32),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
            storage: StorageConfig {
                upload_dir: lookup("UPLOAD_DIR").unwrap_or_else(default_upload_dir),
                public_url: lookup("UPLOAD_PUBLIC_URL").unwrap_or_else(default_public_url),
                max_photo_bytes: parsed("MAX_PHOTO_BYTES")?
                    .map_or_else(default_max_photo_bytes, |v| v as usize),
            },
            mail: MailConfig {
                smtp_host: lookup("SMTP_HOST"),
                smtp_port: parsed("SMTP_PORT")?.map_or_else(default_smtp_port, |v| v as u16),
                smtp_username: lookup("SMTP_USERNAME"),
                smtp_password: lookup("SMTP_PASSWORD"),
                from: lookup("MAIL_FROM").unwrap_or_else(default_mail_from),
            },
            scoring: ScoringConfig { points_per_hour },
            payment: PaymentConfig { reference_pepper },
            admin,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_memory_backend_defaults() {
        let config = load(&[("STORAGE_BACKEND", "memory")]).unwrap();
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert!(config.database.url.is_none());
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.scoring.points_per_hour, 10);
        assert_eq!(config.storage.max_photo_bytes, 1024 * 1024);
        assert!(!config.mail.is_enabled());
        assert!(config.admin.is_none());
    }

    #[test]
    fn test_postgres_requires_url() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingVar("DATABASE_URL"))));
        let config = load(&[("DATABASE_URL", "postgres://localhost/ngo")]).unwrap();
        assert_eq!(config.database.backend, StorageBackend::Postgres);
    }

    #[test]
    fn test_production_requires_strong_secret() {
        let base = [
            ("APP_ENV", "production"),
            ("STORAGE_BACKEND", "memory"),
            ("PAYMENT_REFERENCE_PEPPER", "pepper"),
        ];
        assert!(load(&base).is_err());

        let mut short = base.to_vec();
        short.push(("JWT_SECRET", "short"));
        assert!(matches!(load(&short), Err(ConfigError::InvalidValue("JWT_SECRET", _))));

        let mut strong = base.to_vec();
        strong.push(("JWT_SECRET", "0123456789abcdef0123456789abcdef"));
        assert!(load(&strong).unwrap().app.env.is_production());
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        assert!(load(&[("STORAGE_BACKEND", "memory"), ("API_PORT", "http")]).is_err());
        assert!(load(&[("STORAGE_BACKEND", "memory"), ("POINTS_PER_HOUR", "0")]).is_err());
        assert!(load(&[("STORAGE_BACKEND", "sqlite")]).is_err());
    }

    #[test]
    fn test_admin_bootstrap() {
        let config = load(&[
            ("STORAGE_BACKEND", "memory"),
            ("ADMIN_EMAIL", "admin@ngo.my"),
            ("ADMIN_PASSWORD", "Secret123"),
        ])
        .unwrap();
        let admin = config.admin.unwrap();
        assert_eq!(admin.email, "admin@ngo.my");
        assert_eq!(admin.name, "Administrator");

        assert!(load(&[("STORAGE_BACKEND", "memory"), ("ADMIN_EMAIL", "a@b.c")]).is_err());
    }
}
