use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How the content arrived: a pasted snippet or an uploaded file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Code,
    #[default]
    File,
}

/// Metadata entry for one stored upload. This is what the snapshot file holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub id: String,
    pub original_name: String,
    pub stored_name: String,
    pub mime_type: String,
    pub size: u64,
    #[serde(default)]
    pub locked: bool,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub kind: FileKind,
    /// One-time password assigned at creation, never rotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_password: Option<String>,
}

impl FileRecord {
    pub fn new(
        id: String,
        original_name: String,
        stored_name: String,
        mime_type: String,
        size: u64,
        kind: FileKind,
        access_password: String,
    ) -> Self {
        Self {
            id,
            original_name,
            stored_name,
            mime_type,
            size,
            locked: false,
            uploaded_at: Utc::now(),
            kind,
            access_password: Some(access_password),
        }
    }

    /// Exact comparison against the per-file password. Records without one never match.
    pub fn access_password_matches(&self, candidate: &str) -> bool {
        matches!(&self.access_password, Some(expected) if expected == candidate)
    }

    pub fn summary(&self) -> FileSummary {
        FileSummary::from(self)
    }
}

/// Public view of a [`FileRecord`]; never carries the access password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub id: String,
    pub original_name: String,
    pub stored_name: String,
    pub mime_type: String,
    pub size: u64,
    pub locked: bool,
    pub uploaded_at: DateTime<Utc>,
    pub kind: FileKind,
}

impl From<&FileRecord> for FileSummary {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.id.clone(),
            original_name: record.original_name.clone(),
            stored_name: record.stored_name.clone(),
            mime_type: record.mime_type.clone(),
            size: record.size,
            locked: record.locked,
            uploaded_at: record.uploaded_at,
            kind: record.kind,
        }
    }
}
