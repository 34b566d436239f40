//! Router configuration.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    dashboard, delete_file, download, health_check, index, list_all_files, login, login_page,
    logout, preview, register, register_page, upload,
};
use super::middleware::security_headers;
use super::state::AppState;

/// Create the application router.
///
/// `max_upload_bytes` caps the multipart body accepted by `/upload`.
pub fn create_router(app_state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    let page_routes = Router::new()
        .route("/", get(index))
        .route("/login.html", get(login_page))
        .route("/register.html", get(register_page))
        .route("/health", get(health_check));

    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout));

    let file_routes = Router::new()
        .route(
            "/upload",
            post(upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/dashboard", get(dashboard))
        .route("/delete/:filename", post(delete_file))
        .route("/files", get(list_all_files))
        .route("/preview/:filename", get(preview))
        .route("/uploads/:filename", get(download));

    Router::new()
        .merge(page_routes)
        .merge(auth_routes)
        .merge(file_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}
