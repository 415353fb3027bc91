//! Pastegate Infrastructure Library
//!
//! Process-scoped services shared by the HTTP layer:
//! - Session store with its periodic sweep
//! - Rotating global password
//! - Webhook notifications
//! - Middleware (request ID)
//! - Telemetry initialization

#[cfg(feature = "middleware")]
pub mod middleware;

#[cfg(feature = "observability-basic")]
pub mod telemetry;

pub mod password;
pub mod session;
pub mod webhook;

// Re-export commonly used types
#[cfg(feature = "middleware")]
pub use middleware::{get_request_id, request_id_middleware, RequestId, REQUEST_ID_HEADER};

#[cfg(feature = "observability-basic")]
pub use telemetry::{init_telemetry, shutdown_telemetry, LogFormat};

pub use password::PasswordRotator;
pub use session::SessionStore;
pub use webhook::WebhookNotifier;
