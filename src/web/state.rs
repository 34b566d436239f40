//! Shared application state for the web handlers.

use axum_extra::extract::cookie::{Cookie, SameSite};
use tokio::sync::Mutex;
use tracing::info;

use crate::auth::{CredentialStore, SessionManager};
use crate::config::Config;
use crate::file::{ContentStore, FileRegistry, UploadReceiver};
use crate::Result;

/// Application state shared across handlers.
///
/// Each store sits behind its own mutex so read-modify-write cycles on the
/// JSON files are serialized within the process.
pub struct AppState {
    /// Username to password-hash store.
    pub credentials: Mutex<CredentialStore>,
    /// Stored filename to owner registry.
    pub registry: Mutex<FileRegistry>,
    /// Live sessions.
    pub sessions: Mutex<SessionManager>,
    /// Upload, delete and preview over the content directory.
    pub uploads: UploadReceiver,
    /// Session cookie name.
    pub cookie_name: String,
    /// Whether session cookies are marked `Secure`.
    pub secure_cookie: bool,
}

impl AppState {
    /// Assemble state from already opened stores.
    pub fn new(
        credentials: CredentialStore,
        registry: FileRegistry,
        sessions: SessionManager,
        uploads: UploadReceiver,
    ) -> Self {
        Self {
            credentials: Mutex::new(credentials),
            registry: Mutex::new(registry),
            sessions: Mutex::new(sessions),
            uploads,
            cookie_name: crate::config::SessionConfig::default().cookie_name,
            secure_cookie: false,
        }
    }

    /// Open every store named in `config` and check the registry against
    /// the content directory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = CredentialStore::open(&config.storage.users_path)?;
        let registry = FileRegistry::open(&config.storage.files_path)?;
        let content = ContentStore::new(&config.storage.upload_dir)?;

        let report = registry.reconcile(&content)?;
        if report.is_consistent() {
            info!("File registry matches content directory");
        } else {
            info!(
                missing = report.missing_files.len(),
                untracked = report.untracked_files.len(),
                "File registry and content directory disagree"
            );
        }

        let sessions = SessionManager::new(config.session.duration_secs);
        let mut state = Self::new(credentials, registry, sessions, UploadReceiver::new(content))
            .with_cookie_name(config.session.cookie_name.clone());
        state.secure_cookie = config.session.secure_cookie;
        Ok(state)
    }

    /// Set the session cookie name.
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Build the cookie carrying a session token.
    pub fn session_cookie(&self, token: String, max_age_secs: i64) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookie)
            .max_age(cookie::time::Duration::seconds(max_age_secs))
            .build()
    }

    /// Cookie used to clear the session cookie.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), "")).path("/").build()
    }
}
