use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;

use super::file_record::FileRecord;
use super::password::RotatingPassword;

/// Webhook event types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum WebhookEventType {
    #[serde(rename = "password.rotated")]
    PasswordRotated,
    #[serde(rename = "file.uploaded")]
    FileUploaded,
}

impl Display for WebhookEventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            WebhookEventType::PasswordRotated => write!(f, "password.rotated"),
            WebhookEventType::FileUploaded => write!(f, "file.uploaded"),
        }
    }
}

impl FromStr for WebhookEventType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "password.rotated" => Ok(WebhookEventType::PasswordRotated),
            "file.uploaded" => Ok(WebhookEventType::FileUploaded),
            _ => Err(anyhow::anyhow!("Invalid webhook event type: {}", s)),
        }
    }
}

/// Body POSTed to the configured webhook URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub event: WebhookEventType,
    pub timestamp: DateTime<Utc>,
    pub data: JsonValue,
}

impl WebhookPayload {
    pub fn password_rotated(password: &RotatingPassword) -> Self {
        Self {
            event: WebhookEventType::PasswordRotated,
            timestamp: Utc::now(),
            data: json!({
                "password": password.value,
                "expiresAt": password.expires_at,
            }),
        }
    }

    pub fn file_uploaded(record: &FileRecord) -> Self {
        Self {
            event: WebhookEventType::FileUploaded,
            timestamp: Utc::now(),
            data: json!({
                "id": record.id,
                "originalName": record.original_name,
                "mimeType": record.mime_type,
                "size": record.size,
                "kind": record.kind,
            }),
        }
    }
}
