//! # Toko Server
//!
//! HTTP JSON API for the Toko backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Toko Server                             │
//! │                                                                 │
//! │  Client ───► HTTP (8080) ───► handlers ───► toko-db ───► SQLite │
//! │                                  │                              │
//! │                                  ▼                              │
//! │                       CheckoutEngine / SummaryAggregator        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod routes;

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use toko_db::{Database, DbConfig};

use crate::config::ServerConfig;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Toko server...");

    let config = ServerConfig::load()?;
    info!(
        port = config.port,
        database = %config.database_path.display(),
        "Configuration loaded"
    );

    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Database ready, migrations applied");

    let state = AppState::new(db.clone(), config.checkout_timeout);
    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
