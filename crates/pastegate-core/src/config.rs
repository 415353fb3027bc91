//! Configuration module
//!
//! Everything is read from the environment (optionally seeded from a `.env` file).
//! Only the listen port and the webhook URL are meant to vary between deployments;
//! the rest have sensible defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::gate::PolicyKind;

// Common constants
const SERVER_PORT: u16 = 3000;
const SESSION_TTL_SECS: u64 = 600;
const SESSION_SWEEP_INTERVAL_SECS: u64 = 60;
const PASSWORD_ROTATION_INTERVAL_SECS: u64 = 600;
const PASSWORD_LENGTH: usize = 12;
const MAX_UPLOAD_SIZE_MB: usize = 50;
const WEBHOOK_TIMEOUT_SECS: u64 = 10;
/// Upper bound for session TTL and password validity (one year)
pub const MAX_LIFETIME_SECS: u64 = 365 * 24 * 60 * 60;

/// Base configuration shared by every deployment
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
}

/// Full server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub base: BaseConfig,
    pub data_dir: PathBuf,
    pub access_policy: PolicyKind,
    /// Value expected in the sentinel header by the header-password gate
    pub client_key: String,
    pub session_ttl_secs: u64,
    pub session_sweep_interval_secs: u64,
    pub password_rotation_interval_secs: u64,
    pub password_length: usize,
    pub max_upload_size_bytes: usize,
    pub webhook_url: Option<String>,
    pub webhook_timeout_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServerConfig>);

impl Config {
    fn inner(&self) -> &ServerConfig {
        &self.0
    }

    pub fn new(config: ServerConfig) -> Self {
        Config(Box::new(config))
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ServerConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.inner().base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.inner().data_dir
    }

    /// JSON snapshot holding every file record
    pub fn metadata_path(&self) -> PathBuf {
        self.inner().data_dir.join("files.json")
    }

    /// Directory holding uploaded content
    pub fn upload_dir(&self) -> PathBuf {
        self.inner().data_dir.join("uploads")
    }

    pub fn access_policy(&self) -> PolicyKind {
        self.inner().access_policy
    }

    pub fn client_key(&self) -> &str {
        &self.inner().client_key
    }

    pub fn session_ttl_secs(&self) -> u64 {
        self.inner().session_ttl_secs
    }

    pub fn session_sweep_interval_secs(&self) -> u64 {
        self.inner().session_sweep_interval_secs
    }

    pub fn password_rotation_interval_secs(&self) -> u64 {
        self.inner().password_rotation_interval_secs
    }

    pub fn password_length(&self) -> usize {
        self.inner().password_length
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.inner().max_upload_size_bytes
    }

    pub fn webhook_url(&self) -> Option<&str> {
        self.inner().webhook_url.as_deref()
    }

    pub fn webhook_timeout_secs(&self) -> u64 {
        self.inner().webhook_timeout_secs
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
        };

        let access_policy = match env::var("ACCESS_POLICY") {
            Ok(value) => value.parse()?,
            Err(_) => PolicyKind::UserAgent,
        };

        let config = ServerConfig {
            base,
            data_dir: PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string())),
            access_policy,
            client_key: env::var("CLIENT_KEY").unwrap_or_else(|_| "pastegate".to_string()),
            session_ttl_secs: env_or("SESSION_TTL_SECS", SESSION_TTL_SECS),
            session_sweep_interval_secs: env_or(
                "SESSION_SWEEP_INTERVAL_SECS",
                SESSION_SWEEP_INTERVAL_SECS,
            ),
            password_rotation_interval_secs: env_or(
                "PASSWORD_ROTATION_INTERVAL_SECS",
                PASSWORD_ROTATION_INTERVAL_SECS,
            ),
            password_length: env_or("PASSWORD_LENGTH", PASSWORD_LENGTH),
            max_upload_size_bytes: env_or("MAX_UPLOAD_SIZE_MB", MAX_UPLOAD_SIZE_MB) * 1024 * 1024,
            webhook_url: env::var("WEBHOOK_URL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            webhook_timeout_secs: env_or("WEBHOOK_TIMEOUT_SECS", WEBHOOK_TIMEOUT_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.session_ttl_secs == 0 {
            return Err(anyhow::anyhow!("SESSION_TTL_SECS must be greater than 0"));
        }

        if self.session_sweep_interval_secs == 0 {
            return Err(anyhow::anyhow!(
                "SESSION_SWEEP_INTERVAL_SECS must be greater than 0"
            ));
        }

        if self.password_rotation_interval_secs == 0 {
            return Err(anyhow::anyhow!(
                "PASSWORD_ROTATION_INTERVAL_SECS must be greater than 0"
            ));
        }

        if self.session_ttl_secs > MAX_LIFETIME_SECS {
            return Err(anyhow::anyhow!(
                "SESSION_TTL_SECS must be at most {} (one year)",
                MAX_LIFETIME_SECS
            ));
        }

        if self.password_rotation_interval_secs > MAX_LIFETIME_SECS {
            return Err(anyhow::anyhow!(
                "PASSWORD_ROTATION_INTERVAL_SECS must be at most {} (one year)",
                MAX_LIFETIME_SECS
            ));
        }

        if self.password_length == 0 {
            return Err(anyhow::anyhow!("PASSWORD_LENGTH must be greater than 0"));
        }

        if self.client_key.is_empty() {
            return Err(anyhow::anyhow!("CLIENT_KEY cannot be empty"));
        }

        if let Some(url) = &self.webhook_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!(
                    "WEBHOOK_URL must be an http:// or https:// URL"
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ServerConfig {
        ServerConfig {
            base: BaseConfig {
                server_port: 3000,
                cors_origins: vec!["*".to_string()],
                environment: "test".to_string(),
            },
            data_dir: PathBuf::from("data"),
            access_policy: PolicyKind::UserAgent,
            client_key: "pastegate".to_string(),
            session_ttl_secs: SESSION_TTL_SECS,
            session_sweep_interval_secs: SESSION_SWEEP_INTERVAL_SECS,
            password_rotation_interval_secs: PASSWORD_ROTATION_INTERVAL_SECS,
            password_length: PASSWORD_LENGTH,
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            webhook_url: None,
            webhook_timeout_secs: WEBHOOK_TIMEOUT_SECS,
        }
    }

    #[test]
    fn test_defaults_validate() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = sample();
        config.session_ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lifetimes_capped_at_one_year() {
        let mut config = sample();
        config.session_ttl_secs = MAX_LIFETIME_SECS;
        config.password_rotation_interval_secs = MAX_LIFETIME_SECS;
        assert!(config.validate().is_ok());

        config.session_ttl_secs = 10_000_000_000_000;
        assert!(config.validate().is_err());

        config.session_ttl_secs = SESSION_TTL_SECS;
        config.password_rotation_interval_secs = u64::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_webhook_url_must_be_http() {
        let mut config = sample();
        config.webhook_url = Some("ftp://example.com/hook".to_string());
        assert!(config.validate().is_err());

        config.webhook_url = Some("https://example.com/hook".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_paths() {
        let config = Config::new(sample());
        assert_eq!(config.metadata_path(), PathBuf::from("data/files.json"));
        assert_eq!(config.upload_dir(), PathBuf::from("data/uploads"));
        assert!(!config.is_production());
    }
}
