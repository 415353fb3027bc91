use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CredentialFailure;
use crate::tokens;

/// Bearer session bound to a single file id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub file_id: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// New session with a fixed expiry of `now + ttl`. Expiry never slides.
    pub fn issue(file_id: &str, ttl: Duration, now: DateTime<Utc>) -> Self {
        Self {
            token: tokens::new_session_token(),
            file_id: file_id.to_string(),
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Valid iff `now < expires_at` and the session was issued for `file_id`.
    pub fn check(&self, file_id: &str, now: DateTime<Utc>) -> Result<(), CredentialFailure> {
        if self.file_id != file_id {
            return Err(CredentialFailure::Invalid);
        }
        if self.is_expired(now) {
            return Err(CredentialFailure::Expired);
        }
        Ok(())
    }
}
