//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the HealthBro REST API (with OpenAPI/Swagger UI) on its own.
//!
//! ## Intended use
//! Useful for development and debugging. The workspace's main `healthbro-run` binary serves the
//! same router with `.env` support.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::router;
use healthbro_core::{constants::TRIAGE_CONFIG_ENV, triage_config_from_env_value, TriageService};

/// Main entry point for the HealthBro REST API server
///
/// # Environment Variables
/// - `HEALTHBRO_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `HEALTHBRO_TRIAGE_CONFIG`: Optional YAML file overriding the triage thresholds
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the triage configuration cannot be read or fails validation,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("healthbro_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("HEALTHBRO_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let config = triage_config_from_env_value(std::env::var(TRIAGE_CONFIG_ENV).ok())?;
    let service = Arc::new(TriageService::in_memory(config)?);

    tracing::info!("-- Starting HealthBro REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(service)).await?;

    Ok(())
}
