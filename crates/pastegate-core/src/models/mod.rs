//! Data models for the application
//!
//! Stored file metadata, bearer sessions, the global rotating password and
//! outbound webhook payloads.

mod file_record;
mod password;
mod session;
mod webhook;

// Re-export all models for convenient imports
pub use file_record::*;
pub use password::*;
pub use session::*;
pub use webhook::*;
