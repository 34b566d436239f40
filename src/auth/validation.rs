//! Input validation for registration.

use thiserror::Error;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username is empty.
    #[error("username cannot be empty")]
    UsernameEmpty,

    /// Username is too long.
    #[error("username must be at most {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,

    /// Username contains characters that cannot appear in a stored filename.
    #[error("username can only contain letters, digits, '_', '-' and '.'")]
    UsernameInvalidChars,

    /// Password is empty.
    #[error("password cannot be empty")]
    PasswordEmpty,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    PasswordTooLong,
}

/// Validate a username.
///
/// Usernames become part of stored filenames, so they are limited to
/// ASCII letters, digits, `_`, `-` and `.` and may not be `.` or `..`.
///
/// # Examples
///
/// ```
/// use devdrop::auth::validation::validate_username;
///
/// assert!(validate_username("dev1").is_ok());
/// assert!(validate_username("a/b").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::UsernameEmpty);
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }
    if username == "." || username == ".." {
        return Err(ValidationError::UsernameInvalidChars);
    }
    let valid = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if !valid {
        return Err(ValidationError::UsernameInvalidChars);
    }
    Ok(())
}

/// Validate a raw password.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordEmpty);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooLong);
    }
    Ok(())
}

/// Validate a registration form.
pub fn validate_registration(username: &str, password: &str) -> Result<(), ValidationError> {
    validate_username(username)?;
    validate_password(password)
}
