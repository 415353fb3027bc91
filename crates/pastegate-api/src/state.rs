//! Application state and sub-state extractors.
//!
//! Every process-scoped object (metadata, content store, sessions, rotating
//! password, webhook notifier, access policy) is created once at startup and
//! injected here. Handlers extract either the whole `Arc<AppState>` or just the
//! sub-state they need via `FromRef`.

use axum::extract::FromRef;
use pastegate_core::AccessPolicy;
use pastegate_db::MetadataRepository;
use pastegate_infra::{PasswordRotator, SessionStore, WebhookNotifier};
use pastegate_storage::ContentStore;
use std::sync::Arc;

/// Metadata and content stores.
#[derive(Clone)]
pub struct FileState {
    pub metadata: Arc<MetadataRepository>,
    pub storage: Arc<dyn ContentStore>,
    pub max_upload_size: usize,
}

/// The configured gate plus the credential stores it and the auth routes use.
#[derive(Clone)]
pub struct AccessState {
    pub policy: Arc<dyn AccessPolicy>,
    pub sessions: Arc<SessionStore>,
    pub password: Arc<PasswordRotator>,
}

#[derive(Clone)]
pub struct AppState {
    pub files: FileState,
    pub access: AccessState,
    pub webhooks: WebhookNotifier,
}

impl FromRef<Arc<AppState>> for FileState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.files.clone()
    }
}

impl FromRef<Arc<AppState>> for AccessState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.access.clone()
    }
}

#[allow(dead_code)]
fn _assert_app_state_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AppState>();
}
