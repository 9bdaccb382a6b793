//! Tradepost server binary.
//!
//! Boots tracing, loads configuration, opens (and migrates) the SQLite
//! store, then serves the API until ctrl-c or SIGTERM.

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tradepost_db::{Database, DbConfig};
use tradepost_server::{app, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("tradepost_server=info,tradepost_db=info,tradepost_sync=info")
        }))
        .with_target(true)
        .init();

    info!("Starting Tradepost server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        port = config.port,
        db_path = %config.database_path.display(),
        remote_configured = config.remote_url.is_some(),
        "Configuration loaded"
    );

    // Open database, creating the parent directory for a fresh install
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Database ready");

    // Shared state + router
    let state = AppState::new(db, config.clone())?;
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

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
