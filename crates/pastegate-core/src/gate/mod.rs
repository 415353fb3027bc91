//! Access gate
//!
//! Every raw fetch goes through exactly one [`AccessPolicy`], chosen at startup.
//! A policy inspects the stored record and the presented [`Credentials`] and returns
//! a [`Decision`]. Policies may also request a lock-state change as a side effect
//! of being evaluated, and decide how a denial is rendered.
//!
//! The checks are plain string comparisons. They are not meant to be secure.

mod policies;

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CredentialFailure;
use crate::models::FileRecord;

pub use policies::{
    DecoyLockPolicy, HeaderPasswordPolicy, LockPolicy, RotatingPasswordPolicy, SessionPolicy,
    UserAgentPolicy, BLOCKED_PAGE, UA_ALLOW_MARKERS, UA_DENIAL_TEXT,
};

/// What the caller presented alongside a raw fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// `User-Agent` header, empty when absent
    pub user_agent: String,
    /// Sentinel client header
    pub client_key: Option<String>,
    /// Per-file password header
    pub password: Option<String>,
    /// `Authorization: Bearer` value or `?token=` query parameter
    pub bearer_token: Option<String>,
}

impl Credentials {
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// User agent did not look like a game client
    UserAgent,
    /// Header or session credential was missing or wrong
    Credential(CredentialFailure),
    /// Raw fetch is disabled outright
    Blocked,
    /// Resource is locked
    Locked,
    /// Denial status with the real content in the body
    Decoy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny { reason: DenyReason },
}

impl Decision {
    pub fn deny(reason: DenyReason) -> Self {
        Decision::Deny { reason }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Body sent with a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialBody {
    /// `text/plain` body
    Text(&'static str),
    /// `text/html` body
    Html(&'static str),
    /// JSON `{"error": tag}`
    Error(&'static str),
    /// The stored bytes, with the record's content type
    RealContent,
}

/// How a denied raw fetch is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denial {
    pub status: u16,
    pub body: DenialBody,
}

/// Resolves bearer tokens for the session policy.
#[async_trait]
pub trait SessionLookup: Send + Sync {
    async fn check(
        &self,
        token: &str,
        file_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), CredentialFailure>;
}

#[async_trait]
pub trait AccessPolicy: Send + Sync {
    /// Name used in `ACCESS_POLICY` and in logs
    fn name(&self) -> &'static str;

    async fn evaluate(
        &self,
        record: &FileRecord,
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> Decision;

    /// Lock state to persist as a consequence of an evaluation, if any.
    fn lock_effect(&self, _record: &FileRecord, _decision: &Decision) -> Option<bool> {
        None
    }

    fn denial(&self, reason: DenyReason) -> Denial;
}

/// Policy selector, parsed from `ACCESS_POLICY`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolicyKind {
    #[default]
    UserAgent,
    HeaderPassword,
    RotatingPassword,
    Session,
    Lock,
    DecoyLock,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::UserAgent => "user_agent",
            PolicyKind::HeaderPassword => "header_password",
            PolicyKind::RotatingPassword => "rotating_password",
            PolicyKind::Session => "session",
            PolicyKind::Lock => "lock",
            PolicyKind::DecoyLock => "decoy_lock",
        }
    }
}

impl Display for PolicyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user_agent" => Ok(PolicyKind::UserAgent),
            "header_password" => Ok(PolicyKind::HeaderPassword),
            "rotating_password" => Ok(PolicyKind::RotatingPassword),
            "session" => Ok(PolicyKind::Session),
            "lock" => Ok(PolicyKind::Lock),
            "decoy_lock" => Ok(PolicyKind::DecoyLock),
            other => Err(anyhow::anyhow!(
                "Unknown ACCESS_POLICY '{}'. Expected one of: user_agent, header_password, rotating_password, session, lock, decoy_lock",
                other
            )),
        }
    }
}

/// Build the configured policy.
pub fn build_policy(
    kind: PolicyKind,
    client_key: &str,
    sessions: Arc<dyn SessionLookup>,
) -> Arc<dyn AccessPolicy> {
    match kind {
        PolicyKind::UserAgent => Arc::new(UserAgentPolicy),
        PolicyKind::HeaderPassword => Arc::new(HeaderPasswordPolicy::new(client_key)),
        PolicyKind::RotatingPassword => Arc::new(RotatingPasswordPolicy),
        PolicyKind::Session => Arc::new(SessionPolicy::new(sessions)),
        PolicyKind::Lock => Arc::new(LockPolicy),
        PolicyKind::DecoyLock => Arc::new(DecoyLockPolicy),
    }
}
