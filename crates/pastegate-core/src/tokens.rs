//! Random identifiers and secrets.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Bytes of randomness behind a file id (16 hex chars).
pub const FILE_ID_BYTES: usize = 8;

/// Bytes of randomness behind a session token (64 hex chars).
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Length of the per-file access password handed out on upload.
pub const ACCESS_PASSWORD_LENGTH: usize = 12;

/// Lowercase hex encoding of `n_bytes` random bytes.
pub fn random_hex(n_bytes: usize) -> String {
    let mut bytes = vec![0u8; n_bytes];
    rand::rng().fill(&mut bytes[..]);
    hex::encode(bytes)
}

/// Random ASCII alphanumeric string of exactly `len` characters.
pub fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn new_file_id() -> String {
    random_hex(FILE_ID_BYTES)
}

pub fn new_session_token() -> String {
    random_hex(SESSION_TOKEN_BYTES)
}

pub fn new_access_password() -> String {
    random_alphanumeric(ACCESS_PASSWORD_LENGTH)
}
