//! User repository for Quill.
//!
//! This module provides CRUD operations for users in the database.

use sqlx::SqlitePool;

use super::user::{NewUser, User};
use crate::{QuillError, Result};

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(&new_user.username)
            .bind(&new_user.password)
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| QuillError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at, last_login, is_active
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a user by username (case-insensitive).
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at, last_login, is_active
             FROM users WHERE username = ? COLLATE NOCASE",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Update the last login timestamp for a user.
    pub async fn update_last_login(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE users SET last_login = datetime('now') WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(())
    }

    /// Check if a username is already taken (case-insensitive).
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = ? COLLATE NOCASE)")
                .bind(username)
                .fetch_one(self.pool)
                .await
                .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(exists.0)
    }
}
