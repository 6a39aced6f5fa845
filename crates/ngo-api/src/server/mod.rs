//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use ngo_common::{AppConfig, AppError, JwtService, PaymentReferencer, StorageBackend};
use ngo_core::{Clock, Notifier, SystemClock};
use ngo_db::{
    create_pool, migrations_dir, run_migrations, DatabaseConfig, InMemoryStore,
    PgDonationRepository, PgEventRepository, PgFeedbackRepository, PgParticipationRepository,
    PgPool, PgPostingRepository, PgUserRepository, PgVolunteerRepository,
};
use ngo_service::{
    AuthService, LocalPhotoStore, LogNotifier, ServiceContextBuilder, ServiceSettings,
    SmtpNotifier,
};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes and uploaded photos bypass the rate limiter.
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();

    let api = apply_rate_limit(create_router(), &config.rate_limit);
    let mut router = api.merge(health_routes());

    let public_url = config.storage.public_url.trim_end_matches('/');
    if public_url.starts_with('/') && public_url.len() > 1 {
        router = router.nest_service(public_url, ServeDir::new(&config.storage.upload_dir));
    }

    apply_middleware(
        router,
        &config.cors,
        Duration::from_secs(config.api.request_timeout_secs),
        config.app.env.is_production(),
    )
    .with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    create_app_state_with_clock(config, Arc::new(SystemClock)).await
}

/// Initialize all dependencies with an explicit clock
pub async fn create_app_state_with_clock(
    config: AppConfig,
    clock: Arc<dyn Clock>,
) -> Result<AppState, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let payment_referencer = Arc::new(PaymentReferencer::new(
        config.payment.reference_pepper.clone(),
    ));
    let photo_store = Arc::new(LocalPhotoStore::new(
        &config.storage.upload_dir,
        &config.storage.public_url,
        config.storage.max_photo_bytes,
    ));

    let builder = ServiceContextBuilder::new()
        .clock(clock)
        .notifier(create_notifier(&config)?)
        .photo_store(photo_store)
        .jwt_service(jwt_service)
        .payment_referencer(payment_referencer)
        .settings(ServiceSettings {
            points_per_hour: config.scoring.points_per_hour,
            max_photo_bytes: config.storage.max_photo_bytes,
        });

    let (builder, pool) = match config.database.backend {
        StorageBackend::Memory => {
            warn!("Using the in-memory store; data is lost on shutdown");
            (builder.store(Arc::new(InMemoryStore::new())), None)
        }
        StorageBackend::Postgres => {
            let pool = connect_postgres(&config).await?;
            let builder = builder
                .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
                .event_repo(Arc::new(PgEventRepository::new(pool.clone())))
                .volunteer_repo(Arc::new(PgVolunteerRepository::new(pool.clone())))
                .participation_repo(Arc::new(PgParticipationRepository::new(pool.clone())))
                .donation_repo(Arc::new(PgDonationRepository::new(pool.clone())))
                .feedback_repo(Arc::new(PgFeedbackRepository::new(pool.clone())))
                .posting_repo(Arc::new(PgPostingRepository::new(pool.clone())));
            (builder, Some(pool))
        }
    };

    let service_context = builder.build().map_err(|e| AppError::Config(e.to_string()))?;

    if let Some(admin) = &config.admin {
        let created = AuthService::new(&service_context)
            .ensure_admin(&admin.email, &admin.name, &admin.password)
            .await?;
        if created {
            info!(email = %admin.email, "Bootstrap admin created");
        }
    }

    Ok(AppState::new(service_context, config, pool))
}

/// Connect to PostgreSQL and apply pending migrations
async fn connect_postgres(config: &AppConfig) -> Result<PgPool, AppError> {
    let url = config
        .database
        .url
        .clone()
        .ok_or_else(|| AppError::Config("DATABASE_URL is required".to_string()))?;

    info!("Connecting to PostgreSQL...");
    let db_config = DatabaseConfig {
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..DatabaseConfig::with_url(url)
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool, &migrations_dir())
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Database migrations applied");

    Ok(pool)
}

/// SMTP when a host is configured, otherwise log-only
fn create_notifier(config: &AppConfig) -> Result<Arc<dyn Notifier>, AppError> {
    if config.mail.is_enabled() {
        let notifier =
            SmtpNotifier::from_config(&config.mail).map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Arc::new(notifier))
    } else {
        info!("SMTP not configured, notifications will be logged");
        Ok(Arc::new(LogNotifier))
    }
}

/// Run the HTTP server on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use ngo_core::Role;
    use tower::ServiceExt;

    async fn app() -> (Router, AppState) {
        let config = AppConfig::from_lookup(|key| match key {
            "STORAGE_BACKEND" => Some("memory".to_string()),
            _ => None,
        })
        .unwrap();
        let state = create_app_state(config).await.unwrap();
        (create_app(state.clone()), state)
    }

    async fn error_code(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["error"]["code"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_probes() {
        let (app, _) = app().await;
        for path in ["/health", "/health/live", "/health/ready"] {
            let response = app
                .clone()
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{path}");
        }
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let (app, _) = app().await;
        let response = app
            .oneshot(Request::get("/api/v1/users/@me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(response).await, "MISSING_AUTHORIZATION");
    }

    #[tokio::test]
    async fn test_malformed_participation_id_is_not_found() {
        let (app, state) = app().await;
        let token = state.jwt_service().issue("admin@ngo.my", Role::Admin).unwrap();

        let response = app
            .oneshot(
                Request::post("/api/v1/participations/abc/approve")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token.access_token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let (app, _) = app().await;
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }
}
