//! Application setup and initialization
//!
//! Everything `main` needs is built here so the integration tests can assemble
//! the same router without binding a socket or spawning timers.

pub mod routes;
pub mod server;
pub mod services;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::Router;
use pastegate_core::Config;
use pastegate_infra::{init_telemetry, LogFormat};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A fully wired application, ready to serve.
pub struct Application {
    pub state: Arc<AppState>,
    pub router: Router,
    /// Session sweep and password rotation timers
    pub background_tasks: Vec<JoinHandle<()>>,
}

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<Application> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    init_telemetry(LogFormat::for_environment(config.is_production()))
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        access_policy = %config.access_policy(),
        data_dir = %config.data_dir().display(),
        "Configuration loaded and validated successfully"
    );

    let state = services::initialize_services(&config).await?;
    let background_tasks = start_background_tasks(&config, &state);
    let router = routes::setup_routes(&config, state.clone())?;

    Ok(Application {
        state,
        router,
        background_tasks,
    })
}

/// Spawn the session sweeper and the password rotator.
///
/// The rotator's first tick fires immediately, which performs the startup rotation.
pub fn start_background_tasks(config: &Config, state: &Arc<AppState>) -> Vec<JoinHandle<()>> {
    let sweep_every = Duration::from_secs(config.session_sweep_interval_secs());
    let rotate_every = Duration::from_secs(config.password_rotation_interval_secs());

    tracing::info!(
        sweep_interval_secs = sweep_every.as_secs(),
        rotation_interval_secs = rotate_every.as_secs(),
        "Starting background tasks"
    );

    vec![
        state.access.sessions.clone().start_sweeper(sweep_every),
        state.access.password.clone().start(rotate_every),
    ]
}
