//! Pastegate Metadata Store
//!
//! File records kept in memory and mirrored to a single JSON snapshot on disk.

pub mod db;

pub use db::MetadataRepository;
