//! Authentication module for DevDrop.
//!
//! Password hashing, the JSON-backed credential store, registration input
//! validation and server-side sessions.

mod credentials;
mod password;
mod session;
pub mod validation;

pub use credentials::{CredentialStore, User};
pub use password::{hash_password, verify_password, PasswordError};
pub use session::{AuthSession, SessionManager, DEFAULT_SESSION_DURATION_SECS};
pub use validation::ValidationError;
