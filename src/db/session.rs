//! Session repository for cookie authentication.

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{QuillError, Result};

/// Session entity, one row per logged-in browser.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    /// Session ID.
    pub id: i64,
    /// User ID.
    pub user_id: i64,
    /// Opaque session token stored in the browser cookie.
    pub token: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Expiration timestamp.
    pub expires_at: String,
}

/// New session for creation.
pub struct NewSession {
    /// User ID.
    pub user_id: i64,
    /// Session token.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: String,
}

impl NewSession {
    /// Generate a session for a user with a fresh random token.
    pub fn generate(user_id: i64, lifetime_days: u64) -> Self {
        let expires_at = Utc::now() + Duration::days(lifetime_days as i64);
        Self {
            user_id,
            token: Uuid::new_v4().to_string(),
            expires_at: expires_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Repository for session operations.
pub struct SessionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new session.
    pub async fn create(&self, new_session: &NewSession) -> Result<Session> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO sessions (user_id, token, expires_at) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(new_session.user_id)
        .bind(&new_session.token)
        .bind(&new_session.expires_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        let session = sqlx::query_as::<_, Session>(
            "SELECT id, user_id, token, created_at, expires_at FROM sessions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        session.ok_or_else(|| QuillError::NotFound("session".to_string()))
    }

    /// Get a valid (not expired) session by token.
    pub async fn get_valid(&self, token: &str) -> Result<Option<Session>> {
        let result = sqlx::query_as::<_, Session>(
            "SELECT id, user_id, token, created_at, expires_at
             FROM sessions
             WHERE token = ?
               AND expires_at > datetime('now')",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Delete a session by token (logout).
    ///
    /// Returns true if a session was deleted.
    pub async fn delete(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete expired sessions (cleanup).
    pub async fn delete_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < datetime('now')")
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
