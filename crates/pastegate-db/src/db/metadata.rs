use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use pastegate_core::{models::FileRecord, AppError};
use tokio::fs;
use tokio::sync::Mutex;

type Snapshot = BTreeMap<String, FileRecord>;

/// Repository for file metadata.
///
/// Every mutation rewrites the whole snapshot before returning. The mutex is held
/// across the mutation and the flush so two writers never interleave.
#[derive(Debug)]
pub struct MetadataRepository {
    path: PathBuf,
    records: Mutex<Snapshot>,
}

impl MetadataRepository {
    /// Load the snapshot at `path`.
    ///
    /// A missing, unreadable or corrupt file yields an empty store; startup never fails here.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let records = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Snapshot>(&bytes) {
                Ok(records) => {
                    tracing::info!(
                        path = %path.display(),
                        count = records.len(),
                        "Loaded file metadata snapshot"
                    );
                    records
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Metadata snapshot is corrupt, starting empty"
                    );
                    Snapshot::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No metadata snapshot yet, starting empty");
                Snapshot::new()
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Metadata snapshot is unreadable, starting empty"
                );
                Snapshot::new()
            }
        };

        Self {
            path,
            records: Mutex::new(records),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert or replace a record, then persist.
    #[tracing::instrument(skip(self, record), fields(file_id = %record.id))]
    pub async fn put(&self, record: FileRecord) -> Result<(), AppError> {
        let mut records = self.records.lock().await;
        let mut next = records.clone();
        next.insert(record.id.clone(), record);
        self.commit(&mut records, next).await
    }

    pub async fn get(&self, id: &str) -> Option<FileRecord> {
        self.records.lock().await.get(id).cloned()
    }

    /// All records, newest first. Equal timestamps fall back to id order.
    pub async fn list(&self) -> Vec<FileRecord> {
        let records = self.records.lock().await;
        let mut list: Vec<FileRecord> = records.values().cloned().collect();
        list.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        list
    }

    /// Flip the lock flag and persist.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_lock(&self, id: &str) -> Result<FileRecord, AppError> {
        let mut records = self.records.lock().await;
        let mut next = records.clone();
        let record = next
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;
        record.locked = !record.locked;
        let updated = record.clone();

        self.commit(&mut records, next).await?;
        tracing::info!(locked = updated.locked, "Toggled file lock");
        Ok(updated)
    }

    /// Set the lock flag. Writes to disk only if the value changes.
    #[tracing::instrument(skip(self))]
    pub async fn set_locked(&self, id: &str, locked: bool) -> Result<FileRecord, AppError> {
        let mut records = self.records.lock().await;
        let current = records
            .get(id)
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

        if current.locked == locked {
            return Ok(current.clone());
        }
        let mut updated = current.clone();
        updated.locked = locked;

        let mut next = records.clone();
        next.insert(updated.id.clone(), updated.clone());
        self.commit(&mut records, next).await?;
        tracing::info!(locked, "Updated file lock");
        Ok(updated)
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    /// Persist `next`, then make it the live map. On a failed write the live map is untouched.
    async fn commit(&self, records: &mut Snapshot, next: Snapshot) -> Result<(), AppError> {
        self.flush(&next).await?;
        *records = next;
        Ok(())
    }

    async fn flush(&self, records: &Snapshot) -> Result<(), AppError> {
        self.write_snapshot(records).await.map_err(|e| {
            tracing::error!(error = %e, path = %self.path.display(), "Failed to persist metadata");
            AppError::Storage(format!("Failed to persist metadata: {:#}", e))
        })
    }

    async fn write_snapshot(&self, records: &Snapshot) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_vec_pretty(records).context("Failed to serialize metadata")?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }
}
