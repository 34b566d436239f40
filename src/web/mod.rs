//! Web interface for DevDrop.
//!
//! Form-based login and registration, a per-user dashboard, uploads,
//! owner-checked deletion, text preview and a JSON listing of all files.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod router;
pub mod server;
pub mod state;

pub use error::WebError;
pub use router::create_router;
pub use server::WebServer;
pub use state::AppState;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PAGE: &str = "/login.html";

/// Where successful logins and file operations land.
pub const DASHBOARD_PAGE: &str = "/dashboard";
