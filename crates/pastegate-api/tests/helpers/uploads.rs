//! Upload shortcuts shared by the integration tests.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use bytes::Bytes;
use serde_json::{json, Value};

/// What the upload endpoints hand back.
pub struct Uploaded {
    pub id: String,
    pub password: String,
    pub body: Value,
}

/// Upload `data` as a multipart `file` field through `path`.
pub async fn upload_bytes_to(
    client: &TestServer,
    path: &str,
    file_name: &str,
    mime_type: &str,
    data: &[u8],
) -> Uploaded {
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(Bytes::copy_from_slice(data))
            .file_name(file_name)
            .mime_type(mime_type),
    );

    let response = client.post(path).multipart(form).await;
    assert_eq!(response.status_code(), 200, "upload failed: {}", response.text());

    let body: Value = response.json();
    Uploaded {
        id: body["id"].as_str().expect("id").to_string(),
        password: body["password"].as_str().expect("password").to_string(),
        body,
    }
}

pub async fn upload_bytes(client: &TestServer, file_name: &str, data: &[u8]) -> Uploaded {
    upload_bytes_to(client, "/api/upload", file_name, "application/octet-stream", data).await
}

/// Store a snippet through `/api/create`.
pub async fn create_code(client: &TestServer, code: &str) -> Uploaded {
    let response = client.post("/api/create").json(&json!({ "code": code })).await;
    assert_eq!(response.status_code(), 200, "create failed: {}", response.text());

    let body: Value = response.json();
    Uploaded {
        id: body["id"].as_str().expect("id").to_string(),
        password: body["password"].as_str().expect("password").to_string(),
        body,
    }
}
