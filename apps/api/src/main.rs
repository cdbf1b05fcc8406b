//! # Stockroom API
//!
//! Product REST service over an embedded SQLite file.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom API Server                             │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► Router ───► Handlers ───► SQLite          │
//! │                                                     (./database.db)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Startup failures (bad configuration, unreachable store, schema error)
//! are logged and end the process with a non-zero exit code.

use anyhow::Context;
use stockroom_api::{build_router, AppConfig, AppState};
use stockroom_db::Database;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();

    // RUST_LOG wins over STOCKROOM_LOG
    let log_filter = config
        .as_ref()
        .map(|c| c.log_filter.clone())
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_target(true)
        .init();

    info!("Starting Stockroom API server...");

    let config = config.map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e
    })?;
    let addr = config.bind_address()?;
    info!(
        %addr,
        database = %config.database_path.display(),
        max_connections = config.max_connections,
        "Configuration loaded"
    );

    let db = match Database::new(config.db_config()).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "Failed to open database");
            return Err(e).context("opening database");
        }
    };

    let app = build_router(AppState::new(db.clone()));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    db.close().await;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
