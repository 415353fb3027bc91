//! Pastegate Core Library
//!
//! Domain models, the access gate, error types and configuration shared by every
//! Pastegate crate.

pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod tokens;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ServerConfig};
pub use error::{AppError, CredentialFailure, ErrorMetadata, LogLevel};
pub use gate::{
    build_policy, AccessPolicy, Credentials, Decision, Denial, DenialBody, DenyReason,
    PolicyKind, SessionLookup,
};
// Note: ContentStore and StorageError live in pastegate-storage
pub use models::{FileKind, FileRecord, FileSummary, RotatingPassword, Session};
