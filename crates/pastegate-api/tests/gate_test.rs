//! Gated raw fetch under each access policy.
//!
//! Run with: `cargo test -p pastegate-api --test gate_test`

mod helpers;

use helpers::uploads::create_code;
use helpers::{setup_test_app, BROWSER_USER_AGENT, GAME_USER_AGENT, TEST_CLIENT_KEY};
use pastegate_core::PolicyKind;
use serde_json::Value;

#[tokio::test]
async fn test_unknown_raw_id() {
    let app = setup_test_app(PolicyKind::UserAgent).await;

    for path in ["/raw/0123456789abcdef", "/api/raw/0123456789abcdef"] {
        let response = app.client().get(path).await;
        assert_eq!(response.status_code(), 404);
        assert_eq!(response.text(), "Invalid raw id.");
        assert!(response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
    }
}

#[tokio::test]
async fn test_user_agent_table() {
    let app = setup_test_app(PolicyKind::UserAgent).await;
    let client = app.client();
    let created = create_code(client, "local x = 1").await;
    let path = format!("/raw/{}", created.id);

    let allowed = [
        GAME_USER_AGENT,
        "Roblox/Linux",
        "HttpService",
        "SomeGameClient/1.0",
    ];
    for ua in allowed {
        let response = client.get(&path).add_header("User-Agent", ua).await;
        assert_eq!(response.status_code(), 200, "ua {:?}", ua);
        assert_eq!(response.text(), "local x = 1", "ua {:?}", ua);
    }

    let denied = [BROWSER_USER_AGENT, "curl/8.4.0", "roblox-lowercase"];
    for ua in denied {
        let response = client.get(&path).add_header("User-Agent", ua).await;
        assert_eq!(response.status_code(), 200, "ua {:?}", ua);
        assert_eq!(response.text(), "ANO SKID PA?", "ua {:?}", ua);
    }
}

#[tokio::test]
async fn test_api_raw_alias_uses_same_gate() {
    let app = setup_test_app(PolicyKind::UserAgent).await;
    let client = app.client();
    let created = create_code(client, "aliased").await;

    let response = client
        .get(&format!("/api/raw/{}", created.id))
        .add_header("User-Agent", BROWSER_USER_AGENT)
        .await;
    assert_eq!(response.text(), "ANO SKID PA?");
}

#[tokio::test]
async fn test_header_password_policy() {
    let app = setup_test_app(PolicyKind::HeaderPassword).await;
    let client = app.client();
    let created = create_code(client, "secret stuff").await;
    let path = format!("/raw/{}", created.id);

    let response = client
        .get(&path)
        .add_header("X-Pastegate-Client", TEST_CLIENT_KEY)
        .add_header("X-Pastegate-Password", created.password.as_str())
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "secret stuff");

    let wrong_password = client
        .get(&path)
        .add_header("X-Pastegate-Client", TEST_CLIENT_KEY)
        .add_header("X-Pastegate-Password", "nope")
        .await;
    let wrong_client = client
        .get(&path)
        .add_header("X-Pastegate-Client", "someone-else")
        .add_header("X-Pastegate-Password", created.password.as_str())
        .await;
    let bare = client.get(&path).await;

    for response in [wrong_password, wrong_client, bare] {
        assert_eq!(response.status_code(), 403);
        let body: Value = response.json();
        assert_eq!(body["error"], "invalid");
    }
}

#[tokio::test]
async fn test_rotating_password_policy_blocks_raw() {
    let app = setup_test_app(PolicyKind::RotatingPassword).await;
    let client = app.client();
    let created = create_code(client, "never served raw").await;

    let response = client
        .get(&format!("/raw/{}", created.id))
        .add_header("User-Agent", GAME_USER_AGENT)
        .await;
    assert_eq!(response.status_code(), 403);
    assert!(response
        .header("content-type")
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(!response.text().contains("never served raw"));
}

#[tokio::test]
async fn test_lock_policy() {
    let app = setup_test_app(PolicyKind::Lock).await;
    let client = app.client();
    let created = create_code(client, "lockable").await;
    let path = format!("/raw/{}", created.id);

    assert_eq!(client.get(&path).await.text(), "lockable");

    client.post(&format!("/api/toggle-lock/{}", created.id)).await;
    let response = client.get(&path).await;
    assert_eq!(response.status_code(), 403);
    let body: Value = response.json();
    assert_eq!(body["error"], "locked");

    client.post(&format!("/api/toggle-lock/{}", created.id)).await;
    let response = client.get(&path).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "lockable");
}

#[tokio::test]
async fn test_decoy_lock_serves_content_with_denial_status() {
    let app = setup_test_app(PolicyKind::DecoyLock).await;
    let client = app.client();
    let created = create_code(client, "decoy body").await;
    let path = format!("/raw/{}", created.id);

    assert!(!app.state.files.metadata.get(&created.id).await.unwrap().locked);

    for _ in 0..2 {
        let response = client.get(&path).await;
        assert_eq!(response.status_code(), 403);
        assert_eq!(response.text(), "decoy body");
    }

    let record = app.state.files.metadata.get(&created.id).await.unwrap();
    assert!(record.locked);

    let files: Vec<Value> = client.get("/api/files").await.json();
    assert_eq!(files[0]["locked"], true);
}

#[tokio::test]
async fn test_session_policy_on_raw() {
    let app = setup_test_app(PolicyKind::Session).await;
    let client = app.client();
    let created = create_code(client, "session gated").await;
    let path = format!("/raw/{}", created.id);

    let response = client.get(&path).await;
    assert_eq!(response.status_code(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid");

    let session: Value = client
        .post(&format!("/auth/{}", created.id))
        .json(&serde_json::json!({ "password": created.password }))
        .await
        .json();
    let token = session["token"].as_str().unwrap();

    let response = client
        .get(&path)
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "session gated");

    let response = client.get(&format!("{}?token={}", path, token)).await;
    assert_eq!(response.status_code(), 200);
}
