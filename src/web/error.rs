//! Error responses for the web layer.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use super::render;
use super::LOGIN_PAGE;
use crate::DevDropError;

/// Error categories and how they are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Rejected form submission shown inline with 200, as the login and
    /// registration pages expect.
    Rejected,
    /// No valid session; answered with a redirect to the login page.
    Unauthenticated,
    /// Bad request (400).
    BadRequest,
    /// Forbidden (403).
    Forbidden,
    /// Not found (404).
    NotFound,
    /// Payload too large (413).
    PayloadTooLarge,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::Rejected => StatusCode::OK,
            ErrorCode::Unauthenticated => StatusCode::SEE_OTHER,
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Web error type.
#[derive(Debug)]
pub struct WebError {
    code: ErrorCode,
    message: String,
}

impl WebError {
    /// Create a new web error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Inline rejection message (200).
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Rejected, message)
    }

    /// Redirect to login.
    pub fn unauthenticated() -> Self {
        Self::new(ErrorCode::Unauthenticated, "Login required")
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a payload too large error.
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PayloadTooLarge, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Error category.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if self.code == ErrorCode::Unauthenticated {
            return Redirect::to(LOGIN_PAGE).into_response();
        }
        (
            self.code.status_code(),
            Html(render::message_page(&self.message)),
        )
            .into_response()
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for WebError {}

impl From<DevDropError> for WebError {
    fn from(err: DevDropError) -> Self {
        match &err {
            DevDropError::DuplicateUser(_) => WebError::rejected("User already exists."),
            DevDropError::InvalidCredentials => WebError::rejected("Invalid credentials"),
            DevDropError::Validation(msg) => WebError::rejected(msg.clone()),
            DevDropError::Unauthenticated => WebError::unauthenticated(),
            DevDropError::Forbidden(_) => WebError::forbidden("Unauthorized or file not found."),
            DevDropError::NotFound(_) => WebError::not_found("File not found."),
            _ => {
                tracing::error!("Internal error: {}", err);
                WebError::internal("An internal error occurred")
            }
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for WebError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            WebError::payload_too_large("File too large")
        } else {
            tracing::debug!("Invalid multipart data: {}", err);
            WebError::bad_request("Invalid multipart data")
        }
    }
}
