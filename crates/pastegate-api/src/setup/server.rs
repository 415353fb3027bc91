//! Server startup and graceful shutdown

use crate::setup::Application;
use anyhow::{Context, Result};
use pastegate_core::Config;
use pastegate_infra::shutdown_telemetry;

/// Start the server with graceful shutdown
pub async fn start_server(config: &Config, app: Application) -> Result<()> {
    let addr = format!("0.0.0.0:{}", config.server_port());
    tracing::info!(addr = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        access_policy = %config.access_policy(),
        max_upload_mb = config.max_upload_size_bytes() / 1024 / 1024,
        session_ttl_secs = config.session_ttl_secs(),
        files = app.state.files.metadata.len().await,
        "Server ready and accepting connections"
    );

    axum::serve(listener, app.router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    for task in &app.background_tasks {
        task.abort();
    }
    tracing::info!("Background tasks stopped");

    shutdown_telemetry().await;

    Ok(())
}

/// Signal handler for graceful shutdown
///
/// Listens for Ctrl+C (SIGINT) and SIGTERM signals to initiate graceful shutdown.
///
/// # Panics
/// - Panics if Ctrl+C signal handler cannot be installed (unrecoverable system error)
/// - On Unix systems, panics if SIGTERM signal handler cannot be installed (unrecoverable system error)
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal");
        },
    }

    tracing::info!("Shutting down gracefully...");
}
