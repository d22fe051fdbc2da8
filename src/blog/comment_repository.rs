//! Comment repository for Quill.

use sqlx::SqlitePool;

use super::comment::{Comment, NewComment};
use crate::{QuillError, Result};

/// Repository for comment operations.
///
/// Comments are created and listed, never edited or deleted directly;
/// they disappear with their post.
pub struct CommentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new CommentRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new comment.
    ///
    /// Returns the created comment with the assigned ID.
    pub async fn create(&self, new_comment: &NewComment) -> Result<Comment> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO comments (post_id, author_id, content) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(new_comment.post_id)
        .bind(new_comment.author_id)
        .bind(&new_comment.content)
        .fetch_one(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, post_id, author_id, content, created_at FROM comments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        comment.ok_or_else(|| QuillError::NotFound("comment".to_string()))
    }

    /// List comments for a post, oldest first.
    pub async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, post_id, author_id, content, created_at
             FROM comments WHERE post_id = ? ORDER BY created_at ASC, id ASC",
        )
        .bind(post_id)
        .fetch_all(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(comments)
    }

    /// Count comments for a post.
    pub async fn count_by_post(&self, post_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        sqlx::query("INSERT INTO users (username, password) VALUES ('author', 'hash')")
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query("INSERT INTO posts (title, content, author_id) VALUES ('Post', 'Body', 1)")
            .execute(db.pool())
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_create_comment() {
        let db = setup_db().await;
        let repo = CommentRepository::new(db.pool());

        let comment = repo.create(&NewComment::new(1, 1, "First!")).await.unwrap();

        assert_eq!(comment.post_id, 1);
        assert_eq!(comment.author_id, 1);
        assert_eq!(comment.content, "First!");
    }

    #[tokio::test]
    async fn test_create_comment_for_missing_post_fails() {
        let db = setup_db().await;
        let repo = CommentRepository::new(db.pool());

        let result = repo.create(&NewComment::new(999, 1, "orphan")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_list_by_post_oldest_first() {
        let db = setup_db().await;
        let repo = CommentRepository::new(db.pool());

        repo.create(&NewComment::new(1, 1, "first")).await.unwrap();
        repo.create(&NewComment::new(1, 1, "second")).await.unwrap();
        repo.create(&NewComment::new(1, 1, "third")).await.unwrap();

        let comments = repo.list_by_post(1).await.unwrap();
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[0].content, "first");
        assert_eq!(comments[2].content, "third");
    }

    #[tokio::test]
    async fn test_list_by_post_empty() {
        let db = setup_db().await;
        let repo = CommentRepository::new(db.pool());

        let comments = repo.list_by_post(1).await.unwrap();
        assert!(comments.is_empty());
    }

    #[tokio::test]
    async fn test_count_by_post() {
        let db = setup_db().await;
        let repo = CommentRepository::new(db.pool());

        assert_eq!(repo.count_by_post(1).await.unwrap(), 0);

        repo.create(&NewComment::new(1, 1, "one")).await.unwrap();
        repo.create(&NewComment::new(1, 1, "two")).await.unwrap();

        assert_eq!(repo.count_by_post(1).await.unwrap(), 2);
    }
}
