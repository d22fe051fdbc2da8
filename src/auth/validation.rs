//! Input validation for Quill account registration.
//!
//! This module provides validation functions for usernames and
//! registration passwords.

use thiserror::Error;

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: usize = 4;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 16;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username is too short.
    #[error("username must be at least {MIN_USERNAME_LENGTH} characters")]
    UsernameTooShort,

    /// Username is too long.
    #[error("username must be at most {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,

    /// Username contains invalid characters.
    #[error("username can only contain alphanumeric characters and underscores")]
    UsernameInvalidChars,

    /// Username is reserved.
    #[error("this username is reserved")]
    UsernameReserved,

    /// Password is too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    PasswordTooLong,

    /// Password is the same as username.
    #[error("password cannot be the same as username")]
    PasswordSameAsUsername,
}

/// Reserved usernames that cannot be registered.
const RESERVED_USERNAMES: &[&str] = &[
    "guest",
    "admin",
    "root",
    "system",
    "anonymous",
    "administrator",
    "moderator",
    "support",
    "help",
    "info",
    "test",
    "demo",
    "null",
    "undefined",
    "quill",
];

/// Check if a username is reserved.
pub fn is_reserved_username(username: &str) -> bool {
    let lower = username.to_lowercase();
    RESERVED_USERNAMES.iter().any(|&r| r == lower)
}

/// Validate a username.
///
/// Requirements:
/// - Length: 4-16 characters
/// - Characters: alphanumeric (a-z, A-Z, 0-9) and underscore (_)
/// - Not a reserved username
///
/// # Examples
///
/// ```
/// use quill::auth::validation::validate_username;
///
/// assert!(validate_username("john_doe").is_ok());
/// assert!(validate_username("ab").is_err()); // too short
/// assert!(validate_username("guest").is_err()); // reserved
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.len() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooShort);
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ValidationError::UsernameInvalidChars);
    }

    if is_reserved_username(username) {
        return Err(ValidationError::UsernameReserved);
    }

    Ok(())
}

/// Validate a password for registration.
///
/// Requirements:
/// - Length: 6-128 characters
/// - Must not be the same as the username (if provided)
///
/// # Examples
///
/// ```
/// use quill::auth::validation::validate_registration_password;
///
/// assert!(validate_registration_password("secure_pass123", Some("john")).is_ok());
/// assert!(validate_registration_password("short", None).is_err()); // too short
/// assert!(validate_registration_password("john_doe", Some("john_doe")).is_err());
/// ```
pub fn validate_registration_password(
    password: &str,
    username: Option<&str>,
) -> Result<(), ValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooLong);
    }

    if let Some(user) = username {
        if password.eq_ignore_ascii_case(user) {
            return Err(ValidationError::PasswordSameAsUsername);
        }
    }

    Ok(())
}

/// Validate all registration fields at once.
///
/// Returns the first validation error encountered, or Ok if all fields are valid.
pub fn validate_registration(username: &str, password: &str) -> Result<(), ValidationError> {
    validate_username(username)?;
    validate_registration_password(password, Some(username))?;
    Ok(())
}
