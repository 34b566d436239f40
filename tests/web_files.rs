//! Web File Tests
//!
//! Integration tests for upload, dashboard listing, delete, preview,
//! download and the public file listing.

mod common;

use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION};
use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use common::{
    create_test_app, get_with_session, owned_files, post_with_session, register_and_login,
    session_header, upload, MAX_UPLOAD_BYTES,
};
use serde_json::Value;

#[tokio::test]
async fn test_upload_requires_session() {
    let app = create_test_app();
    let form = MultipartForm::new().add_part(
        "devfile",
        Part::bytes(b"hello".to_vec()).file_name("notes.txt"),
    );

    let response = app.server.post("/upload").multipart(form).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(LOCATION), "/login.html");
    assert!(app.state.registry.lock().await.list().is_empty());
}

#[tokio::test]
async fn test_upload_records_owner_and_content() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;

    let response = upload(&app.server, &token, "notes.txt", b"hello").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(LOCATION), "/dashboard");

    let files = owned_files(&app, "dev1").await;
    assert_eq!(files.len(), 1);
    assert!(files[0].contains("dev1"));
    assert!(files[0].ends_with("notes.txt"));

    let stored = std::fs::read(app.dir.path().join("uploads").join(&files[0])).unwrap();
    assert_eq!(stored, b"hello");
}

#[tokio::test]
async fn test_upload_same_name_twice_keeps_both() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;

    upload(&app.server, &token, "notes.txt", b"one").await;
    upload(&app.server, &token, "notes.txt", b"two").await;

    let files = owned_files(&app, "dev1").await;
    assert_eq!(files.len(), 2);
    assert_ne!(files[0], files[1]);
}

#[tokio::test]
async fn test_upload_strips_client_path() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;

    upload(&app.server, &token, "../../etc/passwd", b"x").await;

    let files = owned_files(&app, "dev1").await;
    assert_eq!(files.len(), 1);
    assert!(!files[0].contains('/'));
    assert!(files[0].ends_with("passwd"));
    assert!(app.dir.path().join("uploads").join(&files[0]).exists());
}

#[tokio::test]
async fn test_upload_without_devfile_is_bad_request() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;
    let form = MultipartForm::new().add_text("comment", "no file here");

    let response = app
        .server
        .post("/upload")
        .add_header(COOKIE, session_header(&token))
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("No file provided"));
    assert!(app.state.registry.lock().await.list().is_empty());
}

#[tokio::test]
async fn test_upload_over_limit_is_rejected() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;
    let big = vec![b'a'; MAX_UPLOAD_BYTES + 1024];

    let response = upload(&app.server, &token, "big.txt", &big).await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.state.registry.lock().await.list().is_empty());
}

#[tokio::test]
async fn test_dashboard_lists_only_own_files() {
    let app = create_test_app();
    let alice = register_and_login(&app.server, "alice", "pw1").await;
    let bob = register_and_login(&app.server, "bob", "pw2").await;

    upload(&app.server, &alice, "alice.txt", b"a").await;
    upload(&app.server, &bob, "bob.txt", b"b").await;

    let body = get_with_session(&app.server, "/dashboard", &alice)
        .await
        .text();
    assert!(body.contains("alice.txt"));
    assert!(!body.contains("bob.txt"));
    assert!(body.contains("/preview/"));
}

#[tokio::test]
async fn test_dashboard_omits_preview_link_for_binary() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;

    upload(&app.server, &token, "image.png", &[0x89, b'P', b'N', b'G']).await;

    let body = get_with_session(&app.server, "/dashboard", &token)
        .await
        .text();
    assert!(body.contains("image.png"));
    assert!(!body.contains("/preview/"));
    assert!(body.contains("/delete/"));
}

#[tokio::test]
async fn test_delete_own_file() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;
    upload(&app.server, &token, "notes.txt", b"hello").await;
    let stored = owned_files(&app, "dev1").await.remove(0);

    let response = post_with_session(&app.server, &format!("/delete/{stored}"), &token).await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(LOCATION), "/dashboard");
    assert!(owned_files(&app, "dev1").await.is_empty());
    assert!(!app.dir.path().join("uploads").join(&stored).exists());
}

#[tokio::test]
async fn test_delete_foreign_file_is_forbidden() {
    let app = create_test_app();
    let alice = register_and_login(&app.server, "alice", "pw1").await;
    let bob = register_and_login(&app.server, "bob", "pw2").await;
    upload(&app.server, &alice, "secret.txt", b"mine").await;
    let stored = owned_files(&app, "alice").await.remove(0);

    let response = post_with_session(&app.server, &format!("/delete/{stored}"), &bob).await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(response.text().contains("Unauthorized or file not found."));
    assert_eq!(owned_files(&app, "alice").await, vec![stored.clone()]);
    assert!(app.dir.path().join("uploads").join(&stored).exists());
}

#[tokio::test]
async fn test_delete_missing_file_is_forbidden() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;

    let response = post_with_session(&app.server, "/delete/nope.txt", &token).await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(response.text().contains("Unauthorized or file not found."));
}

#[tokio::test]
async fn test_delete_requires_session() {
    let app = create_test_app();

    let response = app.server.post("/delete/anything.txt").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(LOCATION), "/login.html");
}

#[tokio::test]
async fn test_preview_text_file() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;
    upload(&app.server, &token, "script.js", b"console.log('<hi>');").await;
    let stored = owned_files(&app, "dev1").await.remove(0);

    let response = get_with_session(&app.server, &format!("/preview/{stored}"), &token).await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("console.log(&#39;&lt;hi&gt;&#39;);"));
    assert!(!body.contains("<hi>"));
}

#[tokio::test]
async fn test_preview_unsupported_type() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;
    upload(&app.server, &token, "image.png", &[0x89, b'P', b'N', b'G']).await;
    let stored = owned_files(&app, "dev1").await.remove(0);

    let response = get_with_session(&app.server, &format!("/preview/{stored}"), &token).await;

    response.assert_status_ok();
    assert!(response
        .text()
        .contains("Preview not available for this file type."));
}

#[tokio::test]
async fn test_preview_missing_file_is_not_found() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;

    let response = get_with_session(&app.server, "/preview/missing.txt", &token).await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.text().contains("File not found."));
}

#[tokio::test]
async fn test_preview_requires_session() {
    let app = create_test_app();

    let response = app.server.get("/preview/anything.txt").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(LOCATION), "/login.html");
}

#[tokio::test]
async fn test_download_returns_bytes() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;
    upload(&app.server, &token, "data.json", b"{\"a\":1}").await;
    let stored = owned_files(&app, "dev1").await.remove(0);

    let response = get_with_session(&app.server, &format!("/uploads/{stored}"), &token).await;

    response.assert_status_ok();
    assert_eq!(response.header(CONTENT_TYPE), "application/json");
    assert_eq!(response.as_bytes().as_ref(), b"{\"a\":1}");
}

#[tokio::test]
async fn test_download_requires_session() {
    let app = create_test_app();

    let response = app.server.get("/uploads/anything.txt").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(LOCATION), "/login.html");
}

#[tokio::test]
async fn test_files_lists_every_record() {
    let app = create_test_app();
    let alice = register_and_login(&app.server, "alice", "pw1").await;
    let bob = register_and_login(&app.server, "bob", "pw2").await;
    upload(&app.server, &alice, "a.txt", b"a").await;
    upload(&app.server, &bob, "b.txt", b"b").await;

    let response = app.server.get("/files").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["owner"], "alice");
    assert_eq!(records[1]["owner"], "bob");
    assert!(records[0]["filename"].as_str().unwrap().ends_with("a.txt"));
}

#[tokio::test]
async fn test_files_empty_registry() {
    let app = create_test_app();

    let response = app.server.get("/files").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), serde_json::json!([]));
}

#[tokio::test]
async fn test_registry_file_written_as_json_array() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;
    upload(&app.server, &token, "notes.txt", b"hello").await;

    let raw = std::fs::read_to_string(app.dir.path().join("files.json")).unwrap();
    let json: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["owner"], "dev1");
}

#[tokio::test]
async fn test_upload_registry_write_failure_is_internal_error() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;
    // a directory in place of files.json makes every registry save fail
    std::fs::create_dir(app.dir.path().join("files.json")).unwrap();

    let response = upload(&app.server, &token, "notes.txt", b"hello").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.text().contains("files.json"));
    assert!(app.state.registry.lock().await.list().is_empty());
    let leftovers = std::fs::read_dir(app.dir.path().join("uploads"))
        .unwrap()
        .count();
    assert_eq!(leftovers, 0);

    // the server keeps answering
    get_with_session(&app.server, "/dashboard", &token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_upload_long_multibyte_name() {
    let app = create_test_app();
    let token = register_and_login(&app.server, "dev1", "pw1").await;
    let original = format!("{}.txt", "資料".repeat(40));

    let response = upload(&app.server, &token, &original, b"hello").await;

    response.assert_status(StatusCode::SEE_OTHER);
    let files = owned_files(&app, "dev1").await;
    assert_eq!(files.len(), 1);
    assert!(files[0].len() <= 255);
    assert!(files[0].ends_with("資料.txt"));
}
