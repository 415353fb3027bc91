//! Test helpers: build AppState and router for integration tests.
//!
//! Each app gets its own temporary data directory. Background timers are not
//! started; tests drive expiry with short TTLs instead.

#![allow(dead_code)]

pub mod uploads;

use axum_test::TestServer;
use pastegate_api::setup::{routes, services};
use pastegate_api::AppState;
use pastegate_core::{BaseConfig, Config, PolicyKind, ServerConfig};
use std::sync::Arc;
use tempfile::TempDir;

/// User agent the default gate lets through.
pub const GAME_USER_AGENT: &str = "Roblox/WinInet";

/// User agent the default gate rejects.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) Firefox/120.0";

pub const TEST_CLIENT_KEY: &str = "test-client-key";

/// Test application: server, shared state, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub config: Config,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn test_config(temp_dir: &TempDir, policy: PolicyKind) -> ServerConfig {
    ServerConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
        },
        data_dir: temp_dir.path().to_path_buf(),
        access_policy: policy,
        client_key: TEST_CLIENT_KEY.to_string(),
        session_ttl_secs: 600,
        session_sweep_interval_secs: 60,
        password_rotation_interval_secs: 600,
        password_length: 12,
        max_upload_size_bytes: 1024 * 1024,
        webhook_url: None,
        webhook_timeout_secs: 5,
    }
}

/// Setup a test app with the given access policy and default settings.
pub async fn setup_test_app(policy: PolicyKind) -> TestApp {
    setup_test_app_with(policy, |_| {}).await
}

/// Setup a test app, letting the caller adjust the configuration first.
pub async fn setup_test_app_with(
    policy: PolicyKind,
    customize: impl FnOnce(&mut ServerConfig),
) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut server_config = test_config(&temp_dir, policy);
    customize(&mut server_config);
    let config = Config::new(server_config);

    let state = services::initialize_services(&config)
        .await
        .expect("Failed to initialize services");
    let router = routes::setup_routes(&config, state.clone()).expect("Failed to setup routes");
    let server = TestServer::new(router.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        state,
        config,
        _temp_dir: temp_dir,
    }
}
