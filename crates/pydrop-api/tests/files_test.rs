//! File API integration tests.
//!
//! Run with: `cargo test -p pydrop-api --test files_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use helpers::{
    api_path, build_server, make_expired_token, make_token, setup_test_app, FailingRepository,
    FailingStorage,
};
use pydrop_db::{FileRepository, InMemoryFileRepository};
use pydrop_storage::{MemoryStorage, Storage};
use std::sync::Arc;

fn py_form(file_name: &str, data: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(data)
            .file_name(file_name)
            .mime_type("text/x-python"),
    )
}

async fn upload(
    server: &TestServer,
    token: &str,
    file_name: &str,
    data: Vec<u8>,
) -> axum_test::TestResponse {
    server
        .post(&api_path("/files"))
        .authorization_bearer(token)
        .multipart(py_form(file_name, data))
        .await
}

#[tokio::test]
async fn upload_valid_file_returns_descriptor() {
    let app = setup_test_app();
    let token = app.token_for("user-123");

    let data = vec![b'x'; 42];
    let response = upload(&app.server, &token, "main.py", data).await;

    assert_eq!(response.status_code(), 201);
    let body: serde_json::Value = response.json();
    assert_eq!(body["fileName"], "main.py");
    assert_eq!(body["sizeBytes"], 42);
    assert!(body["id"].as_str().is_some());
    assert!(body["uploadedAt"].as_str().is_some());

    // Blob landed under the owner-scoped key and a record references it.
    let files = app.repo.list_by_owner("user-123").await.unwrap();
    assert_eq!(files.len(), 1);
    let key = &files[0].storage_key;
    assert!(key.starts_with("user-123/"));
    assert!(key.ends_with("_main.py"));
    assert!(app.storage.exists(key).await.unwrap());
}

#[tokio::test]
async fn upload_rejects_non_python_extension() {
    let app = setup_test_app();
    let token = app.token_for("user-123");

    let response = upload(&app.server, &token, "data.txt", b"hello".to_vec()).await;

    assert_eq!(response.status_code(), 422);
    let body: serde_json::Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Only .py files are allowed"));
    assert!(app.storage.is_empty().await);
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn upload_extension_check_is_case_insensitive() {
    let app = setup_test_app();
    let token = app.token_for("user-123");

    let response = upload(&app.server, &token, "Main.PY", b"print('hi')".to_vec()).await;
    assert_eq!(response.status_code(), 201);
}

#[tokio::test]
async fn upload_rejects_empty_file() {
    let app = setup_test_app();
    let token = app.token_for("user-123");

    let response = upload(&app.server, &token, "empty.py", Vec::new()).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "File is empty");
}

#[tokio::test]
async fn upload_accepts_file_at_size_limit() {
    let app = setup_test_app();
    let token = app.token_for("user-123");

    let data = vec![b'x'; 5 * 1024 * 1024];
    let response = upload(&app.server, &token, "big.py", data).await;
    assert_eq!(response.status_code(), 201);
}

#[tokio::test]
async fn upload_rejects_file_over_size_limit() {
    let app = setup_test_app();
    let token = app.token_for("user-123");

    let data = vec![b'x'; 5 * 1024 * 1024 + 1];
    let response = upload(&app.server, &token, "big.py", data).await;

    assert_eq!(response.status_code(), 413);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("5 MB"));
    assert!(app.storage.is_empty().await);
}

#[tokio::test]
async fn upload_without_token_is_unauthorized() {
    let app = setup_test_app();

    let response = app
        .server
        .post(&api_path("/files"))
        .multipart(py_form("main.py", b"print('hi')".to_vec()))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn upload_with_garbage_token_is_unauthorized() {
    let app = setup_test_app();

    let response = upload(&app.server, "not-a-token", "main.py", b"print('hi')".to_vec()).await;

    assert_eq!(response.status_code(), 401);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn upload_with_expired_token_is_unauthorized() {
    let app = setup_test_app();
    let token = make_expired_token("user-123");

    let response = upload(&app.server, &token, "main.py", b"print('hi')".to_vec()).await;

    assert_eq!(response.status_code(), 401);
    let body: serde_json::Value = response.json();
    // Expired and malformed tokens are indistinguishable to the caller.
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn metadata_failure_rolls_back_blob() {
    let storage = Arc::new(MemoryStorage::new());
    let server = build_server(storage.clone(), Arc::new(FailingRepository));
    let token = make_token("user-123");

    let response = upload(&server, &token, "main.py", b"print('hi')".to_vec()).await;

    assert_eq!(response.status_code(), 500);
    assert!(storage.is_empty().await);
}

#[tokio::test]
async fn storage_failure_writes_no_record() {
    let repo = Arc::new(InMemoryFileRepository::new());
    let server = build_server(Arc::new(FailingStorage), repo.clone());
    let token = make_token("user-123");

    let response = upload(&server, &token, "main.py", b"print('hi')".to_vec()).await;

    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    // Backend detail never reaches the client.
    assert_eq!(body["error"], "Failed to access storage");
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn duplicate_uploads_are_both_stored() {
    let app = setup_test_app();
    let token = app.token_for("user-123");

    let first = upload(&app.server, &token, "main.py", b"print('hi')".to_vec()).await;
    let second = upload(&app.server, &token, "main.py", b"print('hi')".to_vec()).await;

    assert_eq!(first.status_code(), 201);
    assert_eq!(second.status_code(), 201);

    let files = app.repo.list_by_owner("user-123").await.unwrap();
    assert_eq!(files.len(), 2);
    assert_ne!(files[0].storage_key, files[1].storage_key);
    assert_eq!(app.storage.len().await, 2);
}

#[tokio::test]
async fn list_returns_only_owners_files() {
    let app = setup_test_app();
    let alice = app.token_for("alice");
    let bob = app.token_for("bob");

    upload(&app.server, &alice, "a.py", b"a = 1".to_vec()).await;
    upload(&app.server, &bob, "b.py", b"b = 2".to_vec()).await;

    let response = app
        .server
        .get(&api_path("/files"))
        .authorization_bearer(&alice)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let files = body.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["fileName"], "a.py");
}

#[tokio::test]
async fn get_file_is_scoped_to_owner() {
    let app = setup_test_app();
    let alice = app.token_for("alice");
    let bob = app.token_for("bob");

    let uploaded = upload(&app.server, &alice, "a.py", b"a = 1".to_vec()).await;
    let id = uploaded.json::<serde_json::Value>()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let own = app
        .server
        .get(&api_path(&format!("/files/{}", id)))
        .authorization_bearer(&alice)
        .await;
    assert_eq!(own.status_code(), 200);

    let other = app
        .server
        .get(&api_path(&format!("/files/{}", id)))
        .authorization_bearer(&bob)
        .await;
    assert_eq!(other.status_code(), 404);
}

#[tokio::test]
async fn get_unknown_file_is_not_found() {
    let app = setup_test_app();
    let token = app.token_for("user-123");

    let response = app
        .server
        .get(&api_path(&format!("/files/{}", uuid::Uuid::new_v4())))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn download_round_trips_content() {
    let app = setup_test_app();
    let token = app.token_for("user-123");

    let uploaded = upload(&app.server, &token, "main.py", b"print('hi')".to_vec()).await;
    let id = uploaded.json::<serde_json::Value>()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .server
        .get(&api_path(&format!("/files/{}/content", id)))
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "text/x-python");
    assert_eq!(response.as_bytes().as_ref(), b"print('hi')");
}

#[tokio::test]
async fn health_check_is_public() {
    let app = setup_test_app();

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}
