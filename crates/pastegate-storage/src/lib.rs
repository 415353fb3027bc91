//! Pastegate Storage Library
//!
//! Content store for uploaded bytes. Files are written once under a generated
//! stored name and never overwritten.
//!
//! # Stored name format
//!
//! `{uuid-simple}.{ext}`, or just `{uuid-simple}` when the upload had no usable
//! extension. Names must not contain `..`, `/`, `\` or start with `.`. Name
//! generation lives in the `keys` module.

pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use traits::{ByteStream, ContentStore, StorageError, StorageResult};
