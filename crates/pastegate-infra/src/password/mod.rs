//! Global rotating password.
//!
//! One value is current at any time. It is replaced on every tick of the rotation
//! task, and each new value is announced through the webhook notifier.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use pastegate_core::models::{RotatingPassword, WebhookPayload};
use pastegate_core::CredentialFailure;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::webhook::WebhookNotifier;

#[derive(Debug)]
pub struct PasswordRotator {
    current: RwLock<RotatingPassword>,
    length: usize,
    validity: chrono::Duration,
    notifier: WebhookNotifier,
}

impl PasswordRotator {
    /// Holds an initial value right away. The rotation task replaces it on its first tick.
    pub fn new(length: usize, validity: Duration, notifier: WebhookNotifier) -> Self {
        let validity = chrono::Duration::seconds(validity.as_secs() as i64);
        Self {
            current: RwLock::new(RotatingPassword::generate(length, validity, Utc::now())),
            length,
            validity,
            notifier,
        }
    }

    /// Replace the current password and announce it.
    pub async fn rotate(&self, now: DateTime<Utc>) -> RotatingPassword {
        let next = RotatingPassword::generate(self.length, self.validity, now);
        *self.current.write().await = next.clone();

        tracing::info!(expires_at = %next.expires_at, "Rotated access password");
        self.notifier.notify(WebhookPayload::password_rotated(&next));
        next
    }

    pub async fn current(&self) -> RotatingPassword {
        self.current.read().await.clone()
    }

    pub async fn expires_at(&self) -> DateTime<Utc> {
        self.current.read().await.expires_at
    }

    /// Check `candidate` and return the expiry of the password it was checked against.
    pub async fn verify(
        &self,
        candidate: &str,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, CredentialFailure> {
        let current = self.current.read().await;
        current.verify(candidate, now)?;
        Ok(current.expires_at)
    }

    /// Start rotating every `every`, beginning immediately. Returns a JoinHandle for shutdown.
    pub fn start(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut rotation_interval = interval(every);
            rotation_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::info!(interval_secs = every.as_secs(), "Password rotation started");

            loop {
                rotation_interval.tick().await;
                self.rotate(Utc::now()).await;
            }
        })
    }
}
