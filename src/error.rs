//! Error types for DevDrop.

use thiserror::Error;

/// Common error type for DevDrop.
#[derive(Error, Debug)]
pub enum DevDropError {
    /// A user with this name is already registered.
    #[error("user already exists: {0}")]
    DuplicateUser(String),

    /// Unknown username or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No valid session for the presented token.
    #[error("not authenticated")]
    Unauthenticated,

    /// The requester does not own the resource.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// A file record with this stored name already exists.
    #[error("duplicate filename: {0}")]
    DuplicateFilename(String),

    /// The upload was written but could not be registered.
    #[error("registration of uploaded file failed: {0}")]
    RegistrationFailed(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Password(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON store could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<crate::auth::ValidationError> for DevDropError {
    fn from(err: crate::auth::ValidationError) -> Self {
        DevDropError::Validation(err.to_string())
    }
}

/// Result type alias for DevDrop operations.
pub type Result<T> = std::result::Result<T, DevDropError>;
