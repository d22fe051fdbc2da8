//! Post model for Quill.

/// Post entity representing a blog entry.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// Post body content.
    pub content: String,
    /// ID of the user who created the post. Set once, never changed.
    pub author_id: i64,
    /// Post creation timestamp.
    pub created_at: String,
    /// Last edit timestamp.
    pub updated_at: String,
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Post body content.
    pub content: String,
    /// ID of the user creating the post.
    pub author_id: i64,
}

impl NewPost {
    /// Create a new post with required fields.
    pub fn new(title: impl Into<String>, content: impl Into<String>, author_id: i64) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author_id,
        }
    }
}

/// Data for updating an existing post.
///
/// The author is never part of an update.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    /// New title.
    pub title: String,
    /// New body content.
    pub content: String,
}

impl PostUpdate {
    /// Create an update replacing title and content.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post() {
        let post = NewPost::new("Hello", "World", 3);
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "World");
        assert_eq!(post.author_id, 3);
    }

    #[test]
    fn test_post_update() {
        let update = PostUpdate::new("New Title", "New Body");
        assert_eq!(update.title, "New Title");
        assert_eq!(update.content, "New Body");
    }
}
