//! HTTP handlers.

pub mod auth;
pub mod file;
pub mod pages;

pub use auth::*;
pub use file::*;
pub use pages::*;
