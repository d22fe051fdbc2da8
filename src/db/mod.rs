//! Database module for Quill.
//!
//! This module provides SQLite database connectivity and migration management.

mod schema;
mod session;
mod user;
mod user_repository;

pub use schema::MIGRATIONS;
pub use session::{NewSession, Session, SessionRepository};
pub use user::{NewUser, User};
pub use user_repository::UserRepository;

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::Result;

/// Database wrapper for managing the SQLite pool and migrations.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a database at the specified path.
    ///
    /// If the database file doesn't exist, it will be created.
    /// Migrations are automatically applied.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening database at {:?}", path);

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Open an in-memory database for testing.
    pub async fn open_in_memory() -> Result<Self> {
        debug!("Opening in-memory database");

        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        // A single long-lived connection: every connection to an in-memory
        // SQLite database is a separate, empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the current schema version.
    pub async fn schema_version(&self) -> Result<i64> {
        if !self.table_exists("schema_version").await? {
            return Ok(0);
        }

        let version: (i64,) =
            sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM schema_version")
                .fetch_one(&self.pool)
                .await?;

        Ok(version.0)
    }

    /// Apply pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        let current_version = self.schema_version().await?;
        let migrations = MIGRATIONS;

        if current_version as usize >= migrations.len() {
            debug!("Database is up to date (version {})", current_version);
            return Ok(());
        }

        info!(
            "Migrating database from version {} to {}",
            current_version,
            migrations.len()
        );

        // Ensure schema_version table exists
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version     INTEGER PRIMARY KEY,
                applied_at  TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )
        .execute(&self.pool)
        .await?;

        // Apply each pending migration in a transaction
        for (i, migration) in migrations.iter().enumerate().skip(current_version as usize) {
            let version = (i + 1) as i64;
            info!("Applying migration v{}", version);

            let mut tx = self.pool.begin().await?;

            sqlx::raw_sql(migration).execute(&mut *tx).await?;

            sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
                .bind(version)
                .execute(&mut *tx)
                .await?;

            tx.commit().await?;
            debug!("Migration v{} applied successfully", version);
        }

        info!(
            "Database migration complete (now at version {})",
            migrations.len()
        );
        Ok(())
    }

    /// Check if a table exists.
    pub async fn table_exists(&self, table_name: &str) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?)",
        )
        .bind(table_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists.0)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(db.schema_version().await.unwrap() > 0);
    }

    #[tokio::test]
    async fn test_migrations_applied() {
        let db = Database::open_in_memory().await.unwrap();

        let version = db.schema_version().await.unwrap();
        assert_eq!(version as usize, MIGRATIONS.len());
    }

    #[tokio::test]
    async fn test_tables_exist() {
        let db = Database::open_in_memory().await.unwrap();

        assert!(db.table_exists("users").await.unwrap());
        assert!(db.table_exists("posts").await.unwrap());
        assert!(db.table_exists("comments").await.unwrap());
        assert!(db.table_exists("sessions").await.unwrap());
        assert!(db.table_exists("schema_version").await.unwrap());
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let db = Database::open_in_memory().await.unwrap();

        let fk_enabled: (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(fk_enabled.0, 1);
    }

    #[tokio::test]
    async fn test_insert_and_query_user() {
        let db = Database::open_in_memory().await.unwrap();

        sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind("testuser")
            .bind("hashedpassword")
            .execute(db.pool())
            .await
            .unwrap();

        let (id, username): (i64, String) =
            sqlx::query_as("SELECT id, username FROM users WHERE username = ?")
                .bind("testuser")
                .fetch_one(db.pool())
                .await
                .unwrap();

        assert_eq!(id, 1);
        assert_eq!(username, "testuser");
    }

    #[tokio::test]
    async fn test_comment_cascade_on_post_delete() {
        let db = Database::open_in_memory().await.unwrap();

        sqlx::query("INSERT INTO users (username, password) VALUES ('author', 'hash')")
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query("INSERT INTO posts (title, content, author_id) VALUES ('T', 'C', 1)")
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query("INSERT INTO comments (post_id, author_id, content) VALUES (1, 1, 'hi')")
            .execute(db.pool())
            .await
            .unwrap();

        sqlx::query("DELETE FROM posts WHERE id = 1")
            .execute(db.pool())
            .await
            .unwrap();

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_open_file_database() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");

        // Open and close database
        {
            let db = Database::open(&db_path).await.unwrap();
            assert!(db.table_exists("users").await.unwrap());
        }

        // Reopen database
        {
            let db = Database::open(&db_path).await.unwrap();
            assert!(db.table_exists("users").await.unwrap());
            // Migrations should not be reapplied
            assert_eq!(db.schema_version().await.unwrap() as usize, MIGRATIONS.len());
        }
    }

    #[tokio::test]
    async fn test_username_unique_nocase() {
        let db = Database::open_in_memory().await.unwrap();

        sqlx::query("INSERT INTO users (username, password) VALUES ('Alice', 'hash')")
            .execute(db.pool())
            .await
            .unwrap();

        let result = sqlx::query("INSERT INTO users (username, password) VALUES ('alice', 'hash')")
            .execute(db.pool())
            .await;
        assert!(result.is_err());
    }
}
