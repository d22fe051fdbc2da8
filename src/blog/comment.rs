//! Comment model for Quill.

/// Comment entity attached to a post.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID.
    pub id: i64,
    /// ID of the post this comment belongs to. Set once, never changed.
    pub post_id: i64,
    /// ID of the user who wrote the comment. Set once, never changed.
    pub author_id: i64,
    /// Comment body content.
    pub content: String,
    /// Comment creation timestamp.
    pub created_at: String,
}

/// Data for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// ID of the post to comment on.
    pub post_id: i64,
    /// ID of the user writing the comment.
    pub author_id: i64,
    /// Comment body content.
    pub content: String,
}

impl NewComment {
    /// Create a new comment with required fields.
    pub fn new(post_id: i64, author_id: i64, content: impl Into<String>) -> Self {
        Self {
            post_id,
            author_id,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_comment() {
        let comment = NewComment::new(1, 2, "Nice post");
        assert_eq!(comment.post_id, 1);
        assert_eq!(comment.author_id, 2);
        assert_eq!(comment.content, "Nice post");
    }
}
