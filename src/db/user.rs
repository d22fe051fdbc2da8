//! User model for Quill.

/// User entity representing a registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique, case-insensitive).
    pub username: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last login timestamp (None until first login).
    pub last_login: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password: String,
}

impl NewUser {
    /// Create a new user record.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
