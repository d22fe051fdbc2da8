//! Post repository for Quill.
//!
//! This module provides CRUD and search operations for posts.

use sqlx::SqlitePool;

use super::post::{NewPost, Post, PostUpdate};
use crate::{QuillError, Result};

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new post.
    ///
    /// Returns the created post with the assigned ID.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let result = sqlx::query("INSERT INTO posts (title, content, author_id) VALUES (?, ?, ?)")
            .bind(&new_post.title)
            .bind(&new_post.content)
            .bind(new_post.author_id)
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| QuillError::NotFound("post".to_string()))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let result = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, author_id, created_at, updated_at
             FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Update a post's title and content.
    ///
    /// The author is never changed. Returns the updated post,
    /// or None if not found.
    pub async fn update(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>> {
        let result = sqlx::query(
            "UPDATE posts SET title = ?, content = ?, updated_at = datetime('now') WHERE id = ?",
        )
        .bind(&update.title)
        .bind(&update.content)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a post by ID.
    ///
    /// Comments on the post are removed by the schema's cascade rule.
    /// Returns true if a post was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    /// List all posts, newest first.
    pub async fn list(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, author_id, created_at, updated_at
             FROM posts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(posts)
    }

    /// Search posts by a case-insensitive title substring, newest first.
    ///
    /// An empty query matches every post.
    pub async fn search_by_title(&self, query: &str) -> Result<Vec<Post>> {
        if query.is_empty() {
            return self.list().await;
        }

        // instr() avoids LIKE wildcard interpretation of % and _
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, author_id, created_at, updated_at
             FROM posts
             WHERE instr(lower(title), lower(?)) > 0
             ORDER BY created_at DESC, id DESC",
        )
        .bind(query)
        .fetch_all(self.pool)
        .await
        .map_err(|e| QuillError::Database(e.to_string()))?;

        Ok(posts)
    }

    /// Count all posts.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await
            .map_err(|e| QuillError::Database(e.to_string()))?;
        Ok(count.0)
    }
}
