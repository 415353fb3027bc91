//! Route prefixes and header names shared by handlers and tests.

/// Prefix for the JSON API routes
pub const API_PREFIX: &str = "/api";

/// Sentinel header checked by the header-password gate
pub const CLIENT_HEADER: &str = "x-pastegate-client";

/// Per-file password header checked by the header-password gate
pub const PASSWORD_HEADER: &str = "x-pastegate-password";

/// Body returned by the raw routes for an unknown id
pub const INVALID_RAW_ID: &str = "Invalid raw id.";

/// Content type given to pasted code
pub const CODE_MIME_TYPE: &str = "text/plain; charset=utf-8";
