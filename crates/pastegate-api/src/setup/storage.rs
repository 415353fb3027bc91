//! Storage setup and initialization

use anyhow::{Context, Result};
use pastegate_core::Config;
use pastegate_db::MetadataRepository;
use pastegate_storage::{create_storage, ContentStore};
use std::sync::Arc;

/// Open the content store under `DATA_DIR/uploads`.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn ContentStore>> {
    tracing::info!(upload_dir = %config.upload_dir().display(), "Initializing content store...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize content store")?;
    tracing::info!("Content store initialized successfully");
    Ok(storage)
}

/// Load the metadata snapshot. A missing or corrupt snapshot yields an empty store.
pub async fn setup_metadata(config: &Config) -> Arc<MetadataRepository> {
    let metadata = MetadataRepository::load(config.metadata_path()).await;
    tracing::info!(
        path = %metadata.path().display(),
        records = metadata.len().await,
        "Metadata store loaded"
    );
    Arc::new(metadata)
}
