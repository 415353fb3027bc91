//! Common utilities for upload handlers

use axum::extract::Multipart;
use pastegate_core::AppError;

/// Extract file data, filename, and content type from multipart form.
/// Only one field named "file" is accepted; other fields are ignored.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
) -> Result<(Vec<u8>, String, String), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        if file_data.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }
        filename = field.file_name().map(str::to_string);
        content_type = field.content_type().map(str::to_string);

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

        file_data = Some(data.to_vec());
    }

    let file_data =
        file_data.ok_or_else(|| AppError::MissingInput("No file provided".to_string()))?;

    let original_filename = filename.unwrap_or_else(|| "file".to_string());
    let content_type = content_type
        .filter(|ct| !ct.trim().is_empty())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Ok((file_data, original_filename, content_type))
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// Display name for an upload: last path segment, control characters dropped,
/// capped at 255 characters. Falls back to "file".
pub fn sanitize_filename(filename: &str) -> String {
    const MAX_FILENAME_LENGTH: usize = 255;

    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let sanitized: String = base
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_FILENAME_LENGTH)
        .collect();

    let trimmed = sanitized.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        return "file".to_string();
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_filename_keeps_last_segment() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\script.lua"), "script.lua");
    }

    #[test]
    fn sanitize_filename_accepts_valid_names() {
        assert_eq!(sanitize_filename("image.png"), "image.png");
        assert_eq!(sanitize_filename("my file (1).txt"), "my file (1).txt");
    }

    #[test]
    fn sanitize_filename_falls_back() {
        assert_eq!(sanitize_filename(""), "file");
        assert_eq!(sanitize_filename(".."), "file");
        assert_eq!(sanitize_filename("dir/"), "file");
        assert_eq!(sanitize_filename("a\u{0}b.txt"), "ab.txt");
    }

    #[test]
    fn validate_file_size_limits() {
        assert!(validate_file_size(10, 10).is_ok());
        assert!(matches!(
            validate_file_size(11, 10),
            Err(AppError::PayloadTooLarge(_))
        ));
    }
}
