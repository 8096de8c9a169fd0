//! VibePulse API - Main Entry Point

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vibepulse_api::config::{ApiConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use vibepulse_api::{build_router, ApiState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("VibePulse API v{}", env!("CARGO_PKG_VERSION"));

    // Load config
    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());

    let config = ApiConfig::load(&config_path)
        .unwrap_or_else(|err| {
            tracing::warn!(path = %config_path, error = %err, "Config not loaded, using defaults");
            ApiConfig::default()
        })
        .with_env_overrides();

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    let app = build_router(ApiState::in_memory(config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
