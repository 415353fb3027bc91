//! Service initialization

use crate::setup::storage::{setup_metadata, setup_storage};
use crate::state::{AccessState, AppState, FileState};
use anyhow::{Context, Result};
use pastegate_core::{build_policy, Config, SessionLookup};
use pastegate_infra::{PasswordRotator, SessionStore, WebhookNotifier};
use std::sync::Arc;
use std::time::Duration;

/// Build every process-scoped object and wire them into [`AppState`].
///
/// No background task is started here.
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let storage = setup_storage(config).await?;
    let metadata = setup_metadata(config).await;

    let webhooks = WebhookNotifier::new(
        config.webhook_url().map(str::to_string),
        Duration::from_secs(config.webhook_timeout_secs()),
    )
    .context("Failed to initialize webhook notifier")?;
    tracing::info!(enabled = webhooks.is_enabled(), "Webhook notifier initialized");

    let sessions = Arc::new(SessionStore::new(Duration::from_secs(
        config.session_ttl_secs(),
    )));

    let password = Arc::new(PasswordRotator::new(
        config.password_length(),
        Duration::from_secs(config.password_rotation_interval_secs()),
        webhooks.clone(),
    ));

    let lookup: Arc<dyn SessionLookup> = sessions.clone();
    let policy = build_policy(config.access_policy(), config.client_key(), lookup);
    tracing::info!(policy = policy.name(), "Access policy selected");

    Ok(Arc::new(AppState {
        files: FileState {
            metadata,
            storage,
            max_upload_size: config.max_upload_size_bytes(),
        },
        access: AccessState {
            policy,
            sessions,
            password,
        },
        webhooks,
    }))
}
