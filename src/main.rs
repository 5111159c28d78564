use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use healthbro_core::{TriageService, constants::TRIAGE_CONFIG_ENV, triage_config_from_env_value};

/// Main entry point for the HealthBro application
///
/// Loads `.env`, resolves the triage configuration once, and serves the REST API until
/// Ctrl-C is received.
///
/// # Environment Variables
/// - `HEALTHBRO_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `HEALTHBRO_TRIAGE_CONFIG`: Optional YAML file overriding the triage thresholds
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, startup or the server itself fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("healthbro_run=info".parse()?)
                .add_directive("healthbro_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var("HEALTHBRO_REST_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".into())
        .parse()?;

    let config = triage_config_from_env_value(std::env::var(TRIAGE_CONFIG_ENV).ok())?;
    let service = Arc::new(TriageService::in_memory(config)?);

    tracing::info!("++ Starting HealthBro REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, api_rest::router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HealthBro REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
