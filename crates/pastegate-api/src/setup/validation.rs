//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use pastegate_core::Config;

/// Validate configuration, then warn about settings that are legal but risky.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let is_production = config.is_production();

    if is_production && config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!(
            "CORS configured to allow all origins (*) in production - set CORS_ORIGINS to restrict"
        );
    }

    if is_production && config.client_key() == "pastegate" {
        tracing::warn!("CLIENT_KEY is the default value - set CLIENT_KEY in production");
    }

    if config.session_sweep_interval_secs() > config.session_ttl_secs() {
        tracing::warn!(
            sweep_interval_secs = config.session_sweep_interval_secs(),
            session_ttl_secs = config.session_ttl_secs(),
            "Session sweep runs less often than sessions expire - expired sessions linger longer"
        );
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pastegate_core::{BaseConfig, PolicyKind, ServerConfig};
    use std::path::PathBuf;

    fn config(environment: &str, session_ttl_secs: u64) -> Config {
        Config::new(ServerConfig {
            base: BaseConfig {
                server_port: 3000,
                cors_origins: vec!["*".to_string()],
                environment: environment.to_string(),
            },
            data_dir: PathBuf::from("data"),
            access_policy: PolicyKind::UserAgent,
            client_key: "pastegate".to_string(),
            session_ttl_secs,
            session_sweep_interval_secs: 60,
            password_rotation_interval_secs: 600,
            password_length: 12,
            max_upload_size_bytes: 1024,
            webhook_url: None,
            webhook_timeout_secs: 10,
        })
    }

    #[test]
    fn test_production_wildcard_cors_is_allowed() {
        assert!(validate_config(&config("production", 600)).is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(validate_config(&config("development", 0)).is_err());
    }

    #[test]
    fn test_unbounded_session_ttl_rejected() {
        assert!(validate_config(&config("development", 10_000_000_000_000)).is_err());
    }
}
