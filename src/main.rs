use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use secrecy::ExposeSecret;
use tracing::info;

use client_service::api::create_router;
use client_service::app::AppState;
use client_service::infra::{
    AppConfig, PostgresClientRepository, init_metrics_handle, init_tracing,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    // The recorder must be installed before the first counter is touched,
    // otherwise those increments land in the no-op recorder.
    let metrics_handle = init_metrics_handle();

    let repository =
        PostgresClientRepository::new(config.database_url.expose_secret(), config.pool.clone())
            .await
            .context("failed to connect to PostgreSQL")?;

    let mut state = AppState::new(Arc::new(repository));
    if let Some(handle) = metrics_handle {
        state = state.with_metrics(handle);
    }

    let router = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.server_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server_addr))?;
    info!("Server listening on http://{}", config.server_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received, draining connections");
}
