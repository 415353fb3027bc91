//! Repositories for the data access layer
//!
//! File metadata is backed by a single JSON snapshot.

pub mod metadata;

pub use metadata::MetadataRepository;
