//! Pull gate credentials out of a request.

use axum::http::{header, HeaderMap};
use pastegate_core::Credentials;
use serde::Deserialize;

use crate::constants::{CLIENT_HEADER, PASSWORD_HEADER};

/// `?token=` fallback for clients that cannot set headers
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

fn header_str(headers: &HeaderMap, name: impl header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Token from `Authorization: Bearer <token>`, else from the query string.
pub fn bearer_token(headers: &HeaderMap, query: &TokenQuery) -> Option<String> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            let (scheme, token) = v.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim().to_string())
        })
        .filter(|t| !t.is_empty());

    from_header.or_else(|| query.token.clone().filter(|t| !t.is_empty()))
}

pub fn extract_credentials(headers: &HeaderMap, query: &TokenQuery) -> Credentials {
    Credentials {
        user_agent: header_str(headers, header::USER_AGENT).unwrap_or_default(),
        client_key: header_str(headers, CLIENT_HEADER),
        password: header_str(headers, PASSWORD_HEADER),
        bearer_token: bearer_token(headers, query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_header_token_wins_over_query() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        let query = TokenQuery {
            token: Some("xyz".to_string()),
        };
        assert_eq!(bearer_token(&headers, &query).as_deref(), Some("abc"));
    }

    #[test]
    fn test_query_fallback_and_non_bearer_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));
        let query = TokenQuery {
            token: Some("xyz".to_string()),
        };
        assert_eq!(bearer_token(&headers, &query).as_deref(), Some("xyz"));
        assert_eq!(bearer_token(&HeaderMap::new(), &TokenQuery::default()), None);
    }

    #[test]
    fn test_missing_user_agent_is_empty() {
        let creds = extract_credentials(&HeaderMap::new(), &TokenQuery::default());
        assert_eq!(creds.user_agent, "");
        assert!(creds.client_key.is_none());
    }

    #[test]
    fn test_gate_headers_are_read() {
        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_HEADER, HeaderValue::from_static("pastegate"));
        headers.insert(PASSWORD_HEADER, HeaderValue::from_static("pw"));
        headers.insert(header::USER_AGENT, HeaderValue::from_static("Roblox/WinInet"));
        let creds = extract_credentials(&headers, &TokenQuery::default());
        assert_eq!(creds.client_key.as_deref(), Some("pastegate"));
        assert_eq!(creds.password.as_deref(), Some("pw"));
        assert_eq!(creds.user_agent, "Roblox/WinInet");
    }
}
