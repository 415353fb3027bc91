//! Pastegate API Library
//!
//! HTTP handlers, routes and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
