//! Server-side session management.
//!
//! Sessions live only in memory and are keyed by an opaque UUID token that
//! the browser holds in a cookie. Expiry is absolute: a lookup never extends
//! a session.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{DevDropError, Result};

/// Default session duration (1 hour).
pub const DEFAULT_SESSION_DURATION_SECS: u64 = 60 * 60;

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Opaque session token (UUID v4).
    pub token: String,
    /// Username bound to this session.
    pub username: String,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    fn new(username: &str, now: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            username: username.to_string(),
            created_at: now,
            expires_at: now
                .checked_add_signed(duration)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Whether the session is expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the session is expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Session store keyed by token.
#[derive(Debug)]
pub struct SessionManager {
    sessions: HashMap<String, AuthSession>,
    duration: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_DURATION_SECS)
    }
}

impl SessionManager {
    /// Create a session manager issuing sessions of `duration_secs`.
    pub fn new(duration_secs: u64) -> Self {
        let secs = i64::try_from(duration_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        Self {
            sessions: HashMap::new(),
            duration: Duration::seconds(secs),
        }
    }

    /// Session lifetime.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Start a session for an already verified user.
    pub fn login(&mut self, username: &str) -> AuthSession {
        self.login_at(username, Utc::now())
    }

    /// Start a session as of `now`.
    pub fn login_at(&mut self, username: &str, now: DateTime<Utc>) -> AuthSession {
        let purged = self.purge_expired(now);
        if purged > 0 {
            debug!(count = purged, "Purged expired sessions");
        }

        let session = AuthSession::new(username, now, self.duration);
        self.sessions
            .insert(session.token.clone(), session.clone());

        info!(
            username = %username,
            expires_at = %session.expires_at,
            "Session created"
        );
        session
    }

    /// Resolve a token to its username.
    ///
    /// Fails with [`DevDropError::Unauthenticated`] when the token is unknown
    /// or expired. Expired sessions are dropped on sight.
    pub fn require_session(&mut self, token: &str) -> Result<String> {
        self.require_session_at(token, Utc::now())
    }

    /// Resolve a token as of `now`.
    pub fn require_session_at(&mut self, token: &str, now: DateTime<Utc>) -> Result<String> {
        let expired = match self.sessions.get(token) {
            None => return Err(DevDropError::Unauthenticated),
            Some(session) => session.is_expired_at(now),
        };

        if expired {
            if let Some(session) = self.sessions.remove(token) {
                debug!(username = %session.username, "Session expired");
            }
            return Err(DevDropError::Unauthenticated);
        }

        self.sessions
            .get(token)
            .map(|s| s.username.clone())
            .ok_or(DevDropError::Unauthenticated)
    }

    /// Destroy a session. Returns whether one existed.
    pub fn logout(&mut self, token: &str) -> bool {
        match self.sessions.remove(token) {
            Some(session) => {
                info!(username = %session.username, "Session logged out");
                true
            }
            None => {
                debug!("Logout: session not found");
                false
            }
        }
    }

    /// Drop every session expired at `now`.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_expired_at(now));
        before - self.sessions.len()
    }

    /// Number of live (possibly expired, not yet purged) sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether there are no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
