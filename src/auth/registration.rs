//! User registration for Quill.
//!
//! This module provides the account registration flow.

use thiserror::Error;
use tracing::info;

use crate::auth::validation::{validate_registration, ValidationError};
use crate::auth::{hash_password, PasswordError};
use crate::db::{NewUser, User, UserRepository};

/// Registration-specific errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Validation failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Username already exists.
    #[error("username already exists")]
    UsernameExists,

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username (4-16 alphanumeric + underscore).
    pub username: String,
    /// Password (6-128 characters).
    pub password: String,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Register a new user account.
///
/// Validates the request, checks username availability, hashes the
/// password and stores the new user. The username check is
/// case-insensitive, so "John" cannot be registered when "john" exists.
pub async fn register(
    repo: &UserRepository<'_>,
    request: &RegistrationRequest,
) -> Result<User, RegistrationError> {
    validate_registration(&request.username, &request.password)?;

    let exists = repo
        .username_exists(&request.username)
        .await
        .map_err(|e| RegistrationError::Database(e.to_string()))?;
    if exists {
        return Err(RegistrationError::UsernameExists);
    }

    let password_hash = hash_password(&request.password)?;

    let user = repo
        .create(&NewUser::new(&request.username, password_hash))
        .await
        .map_err(|e| RegistrationError::Database(e.to_string()))?;

    info!(user_id = user.id, username = %user.username, "user registered");

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_register_success() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let request = RegistrationRequest::new("john_doe", "secure_pass123");
        let user = register(&repo, &request).await.unwrap();

        assert_eq!(user.username, "john_doe");
        assert!(user.is_active);
        // Stored password is a hash, never the plaintext
        assert!(user.password.starts_with("$argon2id$"));
        assert_ne!(user.password, "secure_pass123");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let request = RegistrationRequest::new("john_doe", "secure_pass123");
        register(&repo, &request).await.unwrap();

        let result = register(&repo, &request).await;
        assert!(matches!(result, Err(RegistrationError::UsernameExists)));
    }

    #[tokio::test]
    async fn test_register_duplicate_username_different_case() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        register(&repo, &RegistrationRequest::new("john_doe", "secure_pass123"))
            .await
            .unwrap();

        let result = register(&repo, &RegistrationRequest::new("John_Doe", "other_pass456")).await;
        assert!(matches!(result, Err(RegistrationError::UsernameExists)));
    }

    #[tokio::test]
    async fn test_register_invalid_username() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let result = register(&repo, &RegistrationRequest::new("ab", "secure_pass123")).await;
        assert!(matches!(
            result,
            Err(RegistrationError::Validation(
                ValidationError::UsernameTooShort
            ))
        ));
    }

    #[tokio::test]
    async fn test_register_reserved_username() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let result = register(&repo, &RegistrationRequest::new("admin", "secure_pass123")).await;
        assert!(matches!(
            result,
            Err(RegistrationError::Validation(
                ValidationError::UsernameReserved
            ))
        ));
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let result = register(&repo, &RegistrationRequest::new("john_doe", "short")).await;
        assert!(matches!(
            result,
            Err(RegistrationError::Validation(
                ValidationError::PasswordTooShort
            ))
        ));
    }

    #[tokio::test]
    async fn test_register_password_same_as_username() {
        let db = setup_db().await;
        let repo = UserRepository::new(db.pool());

        let result = register(&repo, &RegistrationRequest::new("john_doe", "john_doe")).await;
        assert!(matches!(
            result,
            Err(RegistrationError::Validation(
                ValidationError::PasswordSameAsUsername
            ))
        ));
    }
}
