use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CredentialFailure;
use crate::tokens;

/// Global password shared by all resources, replaced on every rotation tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotatingPassword {
    pub value: String,
    pub generated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl RotatingPassword {
    /// Fresh value whose validity window starts at `now`.
    pub fn generate(length: usize, validity: Duration, now: DateTime<Utc>) -> Self {
        Self {
            value: tokens::random_alphanumeric(length),
            generated_at: now,
            expires_at: now + validity,
        }
    }

    /// Exact match, then expiry. No lockout, no partial matching.
    pub fn verify(&self, candidate: &str, now: DateTime<Utc>) -> Result<(), CredentialFailure> {
        if candidate != self.value {
            return Err(CredentialFailure::Invalid);
        }
        if now >= self.expires_at {
            return Err(CredentialFailure::Expired);
        }
        Ok(())
    }
}
