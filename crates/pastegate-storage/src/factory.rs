use crate::{ContentStore, LocalStorage, StorageResult};
use pastegate_core::Config;
use std::sync::Arc;

/// Create the content store for the configured data directory
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn ContentStore>> {
    let storage = LocalStorage::new(config.upload_dir()).await?;
    Ok(Arc::new(storage))
}
