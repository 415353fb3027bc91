use crate::keys::{generate_stored_name, validate_stored_name};
use crate::traits::{ByteStream, ContentStore, StorageError, StorageResult};
use async_trait::async_trait;
use futures::StreamExt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem content store
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at `base_path` (e.g. "data/uploads"),
    /// creating the directory if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn name_to_path(&self, stored_name: &str) -> StorageResult<PathBuf> {
        validate_stored_name(stored_name)?;
        Ok(self.base_path.join(stored_name))
    }

    async fn write_new(&self, path: &Path, data: &[u8]) -> StorageResult<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    StorageError::AlreadyExists(path.display().to_string())
                }
                _ => StorageError::SaveFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                )),
            })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::SaveFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::SaveFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

fn not_found_or(stored_name: &str, e: std::io::Error, op: &str, path: &Path) -> StorageError {
    if e.kind() == ErrorKind::NotFound {
        StorageError::NotFound(stored_name.to_string())
    } else {
        StorageError::ReadFailed(format!("Failed to {} file {}: {}", op, path.display(), e))
    }
}

#[async_trait]
impl ContentStore for LocalStorage {
    async fn save(&self, data: Vec<u8>, original_extension: Option<&str>) -> StorageResult<String> {
        let stored_name = generate_stored_name(original_extension);
        let path = self.name_to_path(&stored_name)?;
        let size = data.len();
        let start = std::time::Instant::now();

        self.write_new(&path, &data).await?;

        tracing::info!(
            path = %path.display(),
            stored_name = %stored_name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage save successful"
        );

        Ok(stored_name)
    }

    async fn open(&self, stored_name: &str) -> StorageResult<ByteStream> {
        let path = self.name_to_path(stored_name)?;
        let start = std::time::Instant::now();

        let file = fs::File::open(&path)
            .await
            .map_err(|e| not_found_or(stored_name, e, "open", &path))?;

        let reader = tokio_util::io::ReaderStream::new(file);

        let name = stored_name.to_string();
        let path_display = path.display().to_string();
        let stream = reader.map(move |result| {
            result.map_err(|e| {
                tracing::error!(
                    path = %path_display,
                    stored_name = %name,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    error = %e,
                    "Local storage stream read error"
                );
                StorageError::ReadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        Ok(Box::pin(stream))
    }

    async fn read(&self, stored_name: &str) -> StorageResult<Vec<u8>> {
        let path = self.name_to_path(stored_name)?;
        let start = std::time::Instant::now();

        let data = fs::read(&path)
            .await
            .map_err(|e| not_found_or(stored_name, e, "read", &path))?;

        tracing::debug!(
            path = %path.display(),
            stored_name = %stored_name,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage read successful"
        );

        Ok(data)
    }

    async fn exists(&self, stored_name: &str) -> StorageResult<bool> {
        let path = self.name_to_path(stored_name)?;
        Ok(fs::try_exists(&path).await?)
    }
}
