//! In-memory bearer sessions.
//!
//! A session is created by a successful per-file password check and expires at a
//! fixed time. Expiry is decided by clock comparison on every read; the sweep only
//! reclaims memory.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pastegate_core::{models::Session, CredentialFailure, SessionLookup};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::seconds(ttl.as_secs() as i64),
        }
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Create a session for `file_id` expiring `ttl` after `now`.
    pub async fn issue(&self, file_id: &str, now: DateTime<Utc>) -> Session {
        let session = Session::issue(file_id, self.ttl, now);
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());

        tracing::debug!(file_id = %file_id, expires_at = %session.expires_at, "Session issued");
        session
    }

    /// Unknown token or wrong file gives `Invalid`; a matching but stale token gives `Expired`.
    pub async fn validate(
        &self,
        token: &str,
        file_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), CredentialFailure> {
        let sessions = self.sessions.read().await;
        match sessions.get(token) {
            Some(session) => session.check(file_id, now),
            None => Err(CredentialFailure::Invalid),
        }
    }

    /// Drop every session with `expires_at <= now`. Returns how many were removed.
    pub async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Start the periodic sweep. Returns a JoinHandle for shutdown.
    pub fn start_sweeper(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut sweep_interval = interval(every);
            sweep_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::info!(interval_secs = every.as_secs(), "Session sweeper started");

            loop {
                sweep_interval.tick().await;

                let removed = self.sweep(Utc::now()).await;
                if removed > 0 {
                    tracing::debug!(removed, "Swept expired sessions");
                }
            }
        })
    }
}

#[async_trait]
impl SessionLookup for SessionStore {
    async fn check(
        &self,
        token: &str,
        file_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), CredentialFailure> {
        self.validate(token, file_id, now).await
    }
}
