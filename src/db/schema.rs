//! Database schema and migrations for Quill.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
-- Users table for authentication and account management
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- Argon2 hash
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    last_login  TEXT,
    is_active   INTEGER NOT NULL DEFAULT 1
);

CREATE UNIQUE INDEX idx_users_username_nocase ON users(username COLLATE NOCASE);
"#,
    // v2: Posts table
    r#"
-- Posts table for blog entries
CREATE TABLE posts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,
    author_id   INTEGER NOT NULL REFERENCES users(id),
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_posts_author_id ON posts(author_id);
CREATE INDEX idx_posts_created_at ON posts(created_at);
"#,
    // v3: Comments table
    r#"
-- Comments table, one row per comment on a post
CREATE TABLE comments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id     INTEGER NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    author_id   INTEGER NOT NULL REFERENCES users(id),
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_comments_post_id ON comments(post_id);
CREATE INDEX idx_comments_author_id ON comments(author_id);
"#,
    // v4: Sessions table for cookie authentication
    r#"
-- Sessions table, one row per logged-in browser
CREATE TABLE sessions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    token       TEXT NOT NULL UNIQUE,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    expires_at  TEXT NOT NULL
);

CREATE INDEX idx_sessions_token ON sessions(token);
CREATE INDEX idx_sessions_user_id ON sessions(user_id);
"#,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_not_empty() {
        assert!(!MIGRATIONS.is_empty());
    }

    #[test]
    fn test_first_migration_contains_users_table() {
        let first = MIGRATIONS[0];
        assert!(first.contains("CREATE TABLE users"));
        assert!(first.contains("username"));
        assert!(first.contains("password"));
        assert!(first.contains("is_active"));
    }

    #[test]
    fn test_migrations_are_valid_sql() {
        // Each migration should be non-empty and contain SQL keywords
        for migration in MIGRATIONS {
            assert!(!migration.trim().is_empty());
            assert!(
                migration.contains("CREATE TABLE")
                    || migration.contains("ALTER TABLE")
                    || migration.contains("CREATE INDEX")
            );
        }
    }

    #[test]
    fn test_posts_migration_contains_posts_table() {
        let posts_migration = MIGRATIONS[1];
        assert!(posts_migration.contains("CREATE TABLE posts"));
        assert!(posts_migration.contains("title"));
        assert!(posts_migration.contains("content"));
        assert!(posts_migration.contains("author_id"));
        assert!(posts_migration.contains("updated_at"));
    }

    #[test]
    fn test_comments_migration_cascades_on_post_delete() {
        let comments_migration = MIGRATIONS[2];
        assert!(comments_migration.contains("CREATE TABLE comments"));
        assert!(comments_migration.contains("post_id"));
        assert!(comments_migration.contains("ON DELETE CASCADE"));
    }

    #[test]
    fn test_sessions_migration_contains_sessions_table() {
        let sessions_migration = MIGRATIONS[3];
        assert!(sessions_migration.contains("CREATE TABLE sessions"));
        assert!(sessions_migration.contains("user_id"));
        assert!(sessions_migration.contains("token"));
        assert!(sessions_migration.contains("expires_at"));
    }
}
