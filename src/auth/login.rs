//! Login and logout for Quill.
//!
//! Credentials are checked against the stored Argon2id hash and a
//! database-backed session token is issued on success.

use thiserror::Error;
use tracing::info;

use crate::auth::verify_password;
use crate::db::{NewSession, Session, SessionRepository, User, UserRepository};

/// Login-specific errors.
#[derive(Error, Debug)]
pub enum LoginError {
    /// Unknown username or wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The account exists but has been deactivated.
    #[error("this account is disabled")]
    AccountDisabled,

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

/// Log a user in.
///
/// Verifies the password, rejects inactive accounts, records the
/// login time and creates a fresh session. Unknown usernames and
/// wrong passwords produce the same error so callers cannot probe
/// for registered names.
pub async fn login(
    user_repo: &UserRepository<'_>,
    session_repo: &SessionRepository<'_>,
    username: &str,
    password: &str,
    session_lifetime_days: u64,
) -> Result<(User, Session), LoginError> {
    let user = user_repo
        .get_by_username(username)
        .await
        .map_err(|e| LoginError::Database(e.to_string()))?
        .ok_or(LoginError::InvalidCredentials)?;

    verify_password(password, &user.password).map_err(|_| LoginError::InvalidCredentials)?;

    if !user.is_active {
        return Err(LoginError::AccountDisabled);
    }

    user_repo
        .update_last_login(user.id)
        .await
        .map_err(|e| LoginError::Database(e.to_string()))?;

    let session = session_repo
        .create(&NewSession::generate(user.id, session_lifetime_days))
        .await
        .map_err(|e| LoginError::Database(e.to_string()))?;

    info!(user_id = user.id, username = %user.username, "user logged in");

    Ok((user, session))
}

/// Log a user out by deleting the session for the given token.
///
/// Returns true if a session was deleted. An unknown token is not an
/// error, logout is idempotent.
pub async fn logout(session_repo: &SessionRepository<'_>, token: &str) -> Result<bool, LoginError> {
    let deleted = session_repo
        .delete(token)
        .await
        .map_err(|e| LoginError::Database(e.to_string()))?;

    if deleted {
        info!("user logged out");
    }

    Ok(deleted)
}
