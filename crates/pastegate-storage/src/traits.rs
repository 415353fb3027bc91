//! Content store abstraction
//!
//! This module defines the ContentStore trait that storage backends implement.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid stored name: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Chunked file content. Dropping it closes the underlying file.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Content store trait
///
/// Files are immutable once written, so concurrent readers of the same stored
/// name are independent.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Write `data` under a freshly generated name and return that name.
    ///
    /// Never overwrites: a name collision fails with `AlreadyExists`.
    async fn save(&self, data: Vec<u8>, original_extension: Option<&str>) -> StorageResult<String>;

    /// Open a stored file as a byte stream. Fails with `NotFound` if absent.
    async fn open(&self, stored_name: &str) -> StorageResult<ByteStream>;

    /// Read a stored file fully into memory.
    async fn read(&self, stored_name: &str) -> StorageResult<Vec<u8>>;

    /// Check if a stored file exists
    async fn exists(&self, stored_name: &str) -> StorageResult<bool>;
}
