//! DevDrop - a small multi-user file sharing web application.
//!
//! Users register, log in, upload files, see their own files on a
//! dashboard, delete what they own and preview text files. Users and file
//! ownership live in two JSON files next to a directory of uploads.

pub mod auth;
pub mod config;
pub mod error;
pub mod file;
pub mod logging;
pub mod store;
pub mod web;

pub use auth::{
    hash_password, verify_password, AuthSession, CredentialStore, PasswordError, SessionManager,
    User, ValidationError, DEFAULT_SESSION_DURATION_SECS,
};
pub use config::Config;
pub use error::{DevDropError, Result};
pub use file::{ContentStore, FileRecord, FileRegistry, Preview, UploadReceiver};
pub use web::{create_router, AppState, WebServer};
