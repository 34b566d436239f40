//! Test helpers for the HTTP integration tests.
//!
//! Builds a router over a temporary directory and wraps the form and
//! multipart requests the tests repeat.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::COOKIE;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use tempfile::TempDir;

use devdrop::{
    create_router, AppState, ContentStore, CredentialStore, FileRegistry, SessionManager,
    UploadReceiver,
};

/// Session cookie name used by the default state.
pub const COOKIE_NAME: &str = "devdrop_session";

/// Upload cap used by test routers.
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// A router under test with its backing directory.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub dir: TempDir,
}

/// Create a test app with default one-hour sessions.
pub fn create_test_app() -> TestApp {
    create_test_app_with_sessions(SessionManager::default())
}

/// Create a test app around a custom session manager.
pub fn create_test_app_with_sessions(sessions: SessionManager) -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let credentials = CredentialStore::open(dir.path().join("users.json")).unwrap();
    let registry = FileRegistry::open(dir.path().join("files.json")).unwrap();
    let content = ContentStore::new(dir.path().join("uploads")).unwrap();

    let state = Arc::new(AppState::new(
        credentials,
        registry,
        sessions,
        UploadReceiver::new(content),
    ));
    let router = create_router(state.clone(), MAX_UPLOAD_BYTES);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, state, dir }
}

/// Cookie header value for a session token.
pub fn session_header(token: &str) -> String {
    format!("{COOKIE_NAME}={token}")
}

/// POST /register.
pub async fn register(server: &TestServer, username: &str, password: &str) -> TestResponse {
    server
        .post("/register")
        .form(&[("username", username), ("password", password)])
        .await
}

/// POST /login.
pub async fn login(server: &TestServer, username: &str, password: &str) -> TestResponse {
    server
        .post("/login")
        .form(&[("username", username), ("password", password)])
        .await
}

/// Register and log in, returning the session token.
pub async fn register_and_login(server: &TestServer, username: &str, password: &str) -> String {
    register(server, username, password).await;
    let response = login(server, username, password).await;
    response.cookie(COOKIE_NAME).value().to_string()
}

/// POST /upload with a `devfile` part.
pub async fn upload(
    server: &TestServer,
    token: &str,
    filename: &str,
    content: &[u8],
) -> TestResponse {
    let form = MultipartForm::new().add_part(
        "devfile",
        Part::bytes(content.to_vec()).file_name(filename.to_string()),
    );

    server
        .post("/upload")
        .add_header(COOKIE, session_header(token))
        .multipart(form)
        .await
}

/// GET a path with the session cookie.
pub async fn get_with_session(server: &TestServer, path: &str, token: &str) -> TestResponse {
    server
        .get(path)
        .add_header(COOKIE, session_header(token))
        .await
}

/// POST a path with the session cookie and no body.
pub async fn post_with_session(server: &TestServer, path: &str, token: &str) -> TestResponse {
    server
        .post(path)
        .add_header(COOKIE, session_header(token))
        .await
}

/// Stored filenames owned by `owner` according to the registry.
pub async fn owned_files(app: &TestApp, owner: &str) -> Vec<String> {
    app.state
        .registry
        .lock()
        .await
        .list_by_owner(owner)
        .into_iter()
        .map(|r| r.filename)
        .collect()
}
