//! File handlers: upload, dashboard, delete, listing, preview and download.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use std::sync::Arc;

use crate::file::{FileRecord, Preview};
use crate::web::error::WebError;
use crate::web::middleware::SessionUser;
use crate::web::render;
use crate::web::state::AppState;
use crate::web::DASHBOARD_PAGE;
use crate::DevDropError;

/// Multipart field carrying the upload.
pub const UPLOAD_FIELD: &str = "devfile";

/// POST /upload - store the `devfile` part for the session user.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
    mut multipart: Multipart,
) -> Result<Redirect, WebError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content = field.bytes().await?.to_vec();
        upload = Some((filename, content));
    }

    let (filename, content) = match upload {
        Some((filename, content)) if !filename.is_empty() => (filename, content),
        _ => return Err(WebError::bad_request("No file provided")),
    };

    let mut registry = state.registry.lock().await;
    state
        .uploads
        .receive(&mut registry, &user.username, &filename, &content)?;

    Ok(Redirect::to(DASHBOARD_PAGE))
}

/// GET /dashboard - the session user's files.
pub async fn dashboard(State(state): State<Arc<AppState>>, user: SessionUser) -> Html<String> {
    let files = state.registry.lock().await.list_by_owner(&user.username);
    Html(render::dashboard(&user.username, &files))
}

/// POST /delete/:filename - delete a file owned by the session user.
///
/// Missing and foreign files answer the same 403 so the response does not
/// reveal which files exist.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    user: SessionUser,
    Path(filename): Path<String>,
) -> Result<Redirect, WebError> {
    let mut registry = state.registry.lock().await;

    match state.uploads.remove(&mut registry, &filename, &user.username) {
        Ok(_) => Ok(Redirect::to(DASHBOARD_PAGE)),
        Err(DevDropError::Forbidden(_)) | Err(DevDropError::NotFound(_)) => {
            Err(WebError::forbidden("Unauthorized or file not found."))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /files - every record from every user.
///
/// Unauthenticated on purpose, matching the published API; note that it
/// exposes all filenames and owners.
pub async fn list_all_files(State(state): State<Arc<AppState>>) -> Json<Vec<FileRecord>> {
    let registry = state.registry.lock().await;
    Json(registry.list().to_vec())
}

/// GET /preview/:filename - render a text file.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    _user: SessionUser,
    Path(filename): Path<String>,
) -> Result<Response, WebError> {
    match state.uploads.preview(&filename)? {
        Preview::Text(content) => Ok(Html(render::preview(&filename, &content)).into_response()),
        Preview::Unavailable => Ok(Html(render::message_page(
            "Preview not available for this file type.",
        ))
        .into_response()),
    }
}

/// GET /uploads/:filename - raw file bytes.
pub async fn download(
    State(state): State<Arc<AppState>>,
    _user: SessionUser,
    Path(filename): Path<String>,
) -> Result<Response, WebError> {
    let content = state.uploads.content().load(&filename)?;
    let mime = mime_guess::from_path(&filename).first_or_octet_stream();

    Ok(([(header::CONTENT_TYPE, mime.to_string())], content).into_response())
}
