//! Credential store backed by `users.json`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::store::JsonFile;
use crate::{DevDropError, Result};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique username (case-sensitive).
    pub username: String,
    /// Argon2 PHC string.
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
}

impl User {
    /// Check `raw_password` against this user's hash.
    pub fn verify(&self, raw_password: &str) -> Result<()> {
        match verify_password(raw_password, &self.password_hash) {
            Ok(()) => Ok(()),
            Err(PasswordError::InvalidHash) => {
                warn!(username = %self.username, "Stored password hash is malformed");
                Err(DevDropError::InvalidCredentials)
            }
            Err(_) => {
                warn!(username = %self.username, "Login failed: wrong password");
                Err(DevDropError::InvalidCredentials)
            }
        }
    }
}

/// Username to password-hash mapping, persisted after every registration.
#[derive(Debug)]
pub struct CredentialStore {
    file: JsonFile,
    users: Vec<User>,
}

impl CredentialStore {
    /// Open the store, loading existing users from `path` if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file = JsonFile::new(path);
        let users: Vec<User> = file.load()?;
        info!(
            path = %file.path().display(),
            count = users.len(),
            "Loaded credential store"
        );
        Ok(Self { file, users })
    }

    /// Register a new user.
    ///
    /// Fails with [`DevDropError::DuplicateUser`] on an exact username match.
    /// The password is hashed before anything is stored; the user is not
    /// logged in.
    pub fn register(&mut self, username: &str, raw_password: &str) -> Result<User> {
        let password_hash =
            hash_password(raw_password).map_err(|e| DevDropError::Password(e.to_string()))?;
        self.register_hashed(username, password_hash)
    }

    /// Register a user whose password was already hashed with
    /// [`hash_password`].
    ///
    /// The in-memory store is left unchanged if persisting fails.
    pub fn register_hashed(&mut self, username: &str, password_hash: String) -> Result<User> {
        if self.find(username).is_some() {
            debug!(username = %username, "Registration rejected: duplicate user");
            return Err(DevDropError::DuplicateUser(username.to_string()));
        }

        let user = User {
            username: username.to_string(),
            password_hash,
        };

        self.users.push(user.clone());
        if let Err(e) = self.file.save(&self.users) {
            self.users.pop();
            return Err(e);
        }

        info!(username = %username, "User registered");
        Ok(user)
    }

    /// Fetch a user for login, failing with
    /// [`DevDropError::InvalidCredentials`] if the name is unknown.
    pub fn lookup(&self, username: &str) -> Result<User> {
        match self.find(username) {
            Some(user) => Ok(user.clone()),
            None => {
                warn!(username = %username, "Login failed: user not found");
                Err(DevDropError::InvalidCredentials)
            }
        }
    }

    /// Check a username/password pair.
    pub fn verify(&self, username: &str, raw_password: &str) -> Result<User> {
        let user = self.lookup(username)?;
        user.verify(raw_password)?;
        Ok(user)
    }

    /// Look up a user by exact name.
    pub fn find(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
