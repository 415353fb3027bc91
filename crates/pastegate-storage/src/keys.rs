//! Stored name generation and validation.

use crate::traits::{StorageError, StorageResult};
use uuid::Uuid;

/// Longest extension kept on a stored name.
pub const MAX_EXTENSION_LEN: usize = 16;

/// Extension of an uploaded filename, if it has one.
///
/// `"archive.tar.gz"` gives `Some("gz")`; `"README"` and `".env"` give `None`.
pub fn extension_of(filename: &str) -> Option<&str> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

/// Keep only ASCII alphanumerics, lowercased, capped at [`MAX_EXTENSION_LEN`].
pub fn sanitize_extension(ext: &str) -> Option<String> {
    let cleaned: String = ext
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(MAX_EXTENSION_LEN)
        .collect::<String>()
        .to_ascii_lowercase();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Generate a fresh stored name for the given extension.
pub fn generate_stored_name(original_extension: Option<&str>) -> String {
    let id = Uuid::new_v4().simple().to_string();
    match original_extension.and_then(sanitize_extension) {
        Some(ext) => format!("{}.{}", id, ext),
        None => id,
    }
}

/// Reject anything that could leave the content directory.
pub fn validate_stored_name(stored_name: &str) -> StorageResult<()> {
    if stored_name.is_empty()
        || stored_name.contains("..")
        || stored_name.contains('/')
        || stored_name.contains('\\')
        || stored_name.starts_with('.')
    {
        return Err(StorageError::InvalidKey(
            "Stored name contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
