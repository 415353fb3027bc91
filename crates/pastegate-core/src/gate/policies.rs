use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{AccessPolicy, Credentials, Decision, Denial, DenialBody, DenyReason, SessionLookup};
use crate::error::CredentialFailure;
use crate::models::FileRecord;

/// Any of these in the user agent lets a raw fetch through.
pub const UA_ALLOW_MARKERS: [&str; 3] = ["Roblox", "HttpService", "Game"];

/// Body returned to browsers by the user-agent gate.
pub const UA_DENIAL_TEXT: &str = "ANO SKID PA?";

/// Served when raw fetch is disabled.
pub const BLOCKED_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Access denied</title></head>
<body>
<h1>Access denied</h1>
<p>Raw access is disabled for this paste.</p>
</body>
</html>
"#;

fn credential_denial(failure: CredentialFailure, status: u16) -> Denial {
    Denial {
        status,
        body: DenialBody::Error(failure.as_str()),
    }
}

/// Allows game clients and requests without a user agent.
#[derive(Debug, Default)]
pub struct UserAgentPolicy;

impl UserAgentPolicy {
    pub fn allows(user_agent: &str) -> bool {
        user_agent.is_empty() || UA_ALLOW_MARKERS.iter().any(|m| user_agent.contains(m))
    }
}

#[async_trait]
impl AccessPolicy for UserAgentPolicy {
    fn name(&self) -> &'static str {
        "user_agent"
    }

    async fn evaluate(&self, _: &FileRecord, credentials: &Credentials, _: DateTime<Utc>) -> Decision {
        if Self::allows(&credentials.user_agent) {
            Decision::Allow
        } else {
            Decision::deny(DenyReason::UserAgent)
        }
    }

    // Browsers get a 200 with a taunt instead of the content.
    fn denial(&self, _reason: DenyReason) -> Denial {
        Denial {
            status: 200,
            body: DenialBody::Text(UA_DENIAL_TEXT),
        }
    }
}

/// Sentinel client header plus the per-file password header.
#[derive(Debug)]
pub struct HeaderPasswordPolicy {
    client_key: String,
}

impl HeaderPasswordPolicy {
    pub fn new(client_key: impl Into<String>) -> Self {
        Self {
            client_key: client_key.into(),
        }
    }
}

#[async_trait]
impl AccessPolicy for HeaderPasswordPolicy {
    fn name(&self) -> &'static str {
        "header_password"
    }

    async fn evaluate(
        &self,
        record: &FileRecord,
        credentials: &Credentials,
        _: DateTime<Utc>,
    ) -> Decision {
        let client_ok = credentials.client_key.as_deref() == Some(self.client_key.as_str());
        let password_ok = credentials
            .password
            .as_deref()
            .is_some_and(|p| record.access_password_matches(p));

        if client_ok && password_ok {
            Decision::Allow
        } else {
            Decision::deny(DenyReason::Credential(CredentialFailure::Invalid))
        }
    }

    fn denial(&self, reason: DenyReason) -> Denial {
        match reason {
            DenyReason::Credential(failure) => credential_denial(failure, 403),
            _ => credential_denial(CredentialFailure::Invalid, 403),
        }
    }
}

/// Raw fetch is always blocked; the rotating password is only checked by its own endpoint.
#[derive(Debug, Default)]
pub struct RotatingPasswordPolicy;

#[async_trait]
impl AccessPolicy for RotatingPasswordPolicy {
    fn name(&self) -> &'static str {
        "rotating_password"
    }

    async fn evaluate(&self, _: &FileRecord, _: &Credentials, _: DateTime<Utc>) -> Decision {
        Decision::deny(DenyReason::Blocked)
    }

    fn denial(&self, _reason: DenyReason) -> Denial {
        Denial {
            status: 403,
            body: DenialBody::Html(BLOCKED_PAGE),
        }
    }
}

/// Bearer token must map to a live session for this file.
pub struct SessionPolicy {
    sessions: Arc<dyn SessionLookup>,
}

impl SessionPolicy {
    pub fn new(sessions: Arc<dyn SessionLookup>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl AccessPolicy for SessionPolicy {
    fn name(&self) -> &'static str {
        "session"
    }

    async fn evaluate(
        &self,
        record: &FileRecord,
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> Decision {
        let Some(token) = credentials.bearer_token.as_deref() else {
            return Decision::deny(DenyReason::Credential(CredentialFailure::Invalid));
        };

        match self.sessions.check(token, &record.id, now).await {
            Ok(()) => Decision::Allow,
            Err(failure) => Decision::deny(DenyReason::Credential(failure)),
        }
    }

    fn denial(&self, reason: DenyReason) -> Denial {
        match reason {
            DenyReason::Credential(failure) => credential_denial(failure, 401),
            _ => credential_denial(CredentialFailure::Invalid, 401),
        }
    }
}

/// Denies locked files, serves unlocked ones.
#[derive(Debug, Default)]
pub struct LockPolicy;

#[async_trait]
impl AccessPolicy for LockPolicy {
    fn name(&self) -> &'static str {
        "lock"
    }

    async fn evaluate(&self, record: &FileRecord, _: &Credentials, _: DateTime<Utc>) -> Decision {
        if record.locked {
            Decision::deny(DenyReason::Locked)
        } else {
            Decision::Allow
        }
    }

    fn denial(&self, _reason: DenyReason) -> Denial {
        Denial {
            status: 403,
            body: DenialBody::Error("locked"),
        }
    }
}

/// Locks the file on the first raw fetch, then answers every fetch with a
/// denial status whose body is still the real content.
#[derive(Debug, Default)]
pub struct DecoyLockPolicy;

#[async_trait]
impl AccessPolicy for DecoyLockPolicy {
    fn name(&self) -> &'static str {
        "decoy_lock"
    }

    async fn evaluate(&self, _: &FileRecord, _: &Credentials, _: DateTime<Utc>) -> Decision {
        Decision::deny(DenyReason::Decoy)
    }

    fn lock_effect(&self, _record: &FileRecord, _decision: &Decision) -> Option<bool> {
        Some(true)
    }

    fn denial(&self, _reason: DenyReason) -> Denial {
        Denial {
            status: 403,
            body: DenialBody::RealContent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileKind;
    use chrono::Duration;
    use std::collections::HashMap;

    fn record(locked: bool) -> FileRecord {
        let mut record = FileRecord::new(
            "0011223344556677".to_string(),
            "main.lua".to_string(),
            "abc.lua".to_string(),
            "text/plain".to_string(),
            5,
            FileKind::Code,
            "pw123".to_string(),
        );
        record.locked = locked;
        record
    }

    /// token -> (file_id, expires_at)
    struct FakeSessions(HashMap<String, (String, DateTime<Utc>)>);

    #[async_trait]
    impl SessionLookup for FakeSessions {
        async fn check(
            &self,
            token: &str,
            file_id: &str,
            now: DateTime<Utc>,
        ) -> Result<(), CredentialFailure> {
            match self.0.get(token) {
                Some((id, _)) if id != file_id => Err(CredentialFailure::Invalid),
                Some((_, expires_at)) if *expires_at <= now => Err(CredentialFailure::Expired),
                Some(_) => Ok(()),
                None => Err(CredentialFailure::Invalid),
            }
        }
    }

    #[tokio::test]
    async fn test_user_agent_table() {
        let policy = UserAgentPolicy;
        let now = Utc::now();
        let cases = [
            ("", true),
            ("Mozilla/5.0", false),
            ("Roblox/WinInet", true),
            ("RobloxStudio HttpService", true),
            ("SomeGameClient/1.0", true),
            ("curl/8.4.0", false),
            ("roblox", false),
        ];
        for (ua, allowed) in cases {
            let decision = policy
                .evaluate(&record(false), &Credentials::with_user_agent(ua), now)
                .await;
            assert_eq!(decision.is_allowed(), allowed, "user agent {:?}", ua);
        }
    }

    #[test]
    fn test_user_agent_denial_is_plain_200() {
        let denial = UserAgentPolicy.denial(DenyReason::UserAgent);
        assert_eq!(denial.status, 200);
        assert_eq!(denial.body, DenialBody::Text("ANO SKID PA?"));
    }

    #[tokio::test]
    async fn test_header_password_requires_both_headers() {
        let policy = HeaderPasswordPolicy::new("pastegate");
        let now = Utc::now();
        let full = Credentials {
            client_key: Some("pastegate".to_string()),
            password: Some("pw123".to_string()),
            ..Default::default()
        };
        assert!(policy.evaluate(&record(false), &full, now).await.is_allowed());

        let wrong_client = Credentials {
            client_key: Some("other".to_string()),
            ..full.clone()
        };
        assert!(!policy.evaluate(&record(false), &wrong_client, now).await.is_allowed());

        let no_password = Credentials {
            password: None,
            ..full.clone()
        };
        let decision = policy.evaluate(&record(false), &no_password, now).await;
        assert_eq!(
            decision,
            Decision::deny(DenyReason::Credential(CredentialFailure::Invalid))
        );
        assert_eq!(
            policy.denial(DenyReason::Credential(CredentialFailure::Invalid)),
            Denial {
                status: 403,
                body: DenialBody::Error("invalid")
            }
        );
    }

    #[tokio::test]
    async fn test_rotating_password_always_blocks() {
        let policy = RotatingPasswordPolicy;
        let creds = Credentials {
            password: Some("anything".to_string()),
            ..Default::default()
        };
        let decision = policy.evaluate(&record(false), &creds, Utc::now()).await;
        assert_eq!(decision, Decision::deny(DenyReason::Blocked));
        assert_eq!(policy.denial(DenyReason::Blocked).body, DenialBody::Html(BLOCKED_PAGE));
    }

    #[tokio::test]
    async fn test_session_scope_and_expiry() {
        let now = Utc::now();
        let mut map = HashMap::new();
        map.insert(
            "tok".to_string(),
            ("0011223344556677".to_string(), now + Duration::seconds(60)),
        );
        map.insert(
            "other".to_string(),
            ("ffffffffffffffff".to_string(), now + Duration::seconds(60)),
        );
        let policy = SessionPolicy::new(Arc::new(FakeSessions(map)));

        let with_token = |t: &str| Credentials {
            bearer_token: Some(t.to_string()),
            ..Default::default()
        };

        assert!(policy.evaluate(&record(false), &with_token("tok"), now).await.is_allowed());
        assert_eq!(
            policy
                .evaluate(&record(false), &with_token("other"), now)
                .await,
            Decision::deny(DenyReason::Credential(CredentialFailure::Invalid))
        );
        assert_eq!(
            policy
                .evaluate(&record(false), &with_token("tok"), now + Duration::seconds(60))
                .await,
            Decision::deny(DenyReason::Credential(CredentialFailure::Expired))
        );
        assert!(!policy
            .evaluate(&record(false), &Credentials::default(), now)
            .await
            .is_allowed());
        assert_eq!(
            policy
                .denial(DenyReason::Credential(CredentialFailure::Expired))
                .status,
            401
        );
    }

    #[tokio::test]
    async fn test_lock_policy_follows_flag() {
        let policy = LockPolicy;
        let now = Utc::now();
        let creds = Credentials::default();
        assert!(policy.evaluate(&record(false), &creds, now).await.is_allowed());
        let decision = policy.evaluate(&record(true), &creds, now).await;
        assert_eq!(decision, Decision::deny(DenyReason::Locked));
        assert_eq!(policy.lock_effect(&record(true), &decision), None);
        assert_eq!(policy.denial(DenyReason::Locked).body, DenialBody::Error("locked"));
    }

    #[tokio::test]
    async fn test_decoy_locks_and_serves_real_content() {
        let policy = DecoyLockPolicy;
        let fresh = record(false);
        let decision = policy
            .evaluate(&fresh, &Credentials::with_user_agent("Roblox"), Utc::now())
            .await;
        assert_eq!(decision, Decision::deny(DenyReason::Decoy));
        assert_eq!(policy.lock_effect(&fresh, &decision), Some(true));

        let denial = policy.denial(DenyReason::Decoy);
        assert_eq!(denial.status, 403);
        assert_eq!(denial.body, DenialBody::RealContent);
    }
}
