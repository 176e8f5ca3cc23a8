//! Main entry point for the event booking backend.
//!
//! This file initializes logging and configuration, sets up the database
//! connection, and serves the Axum application until Ctrl-C is received.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
#[cfg(test)]
mod test_utils;
mod utils;

use anyhow::{Context, Result};
use config::Config;
use database::Database;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> Result<()> {
    init();

    let config = Config::from_env()?;
    let cookie_key = config.cookie_key()?;
    let db = Database::new(&config).await?;

    let app = api::app_router(db.pool().clone(), config.clone(), cookie_key);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Starting event booking server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
