//! NGO volunteer API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p ngo-api
//! ```
//!
//! Configuration is loaded from environment variables and an optional `.env` file.

use anyhow::Context;
use ngo_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;

    if let Err(e) = try_init_tracing(&TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        backend = ?config.database.backend,
        port = config.api.port,
        "Configuration loaded"
    );

    if let Err(e) = ngo_api::run(config).await {
        error!(error = %e, "Server failed");
        return Err(e.into());
    }
    Ok(())
}
