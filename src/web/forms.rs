//! Form definitions for the Quill web interface.
//!
//! Forms are deserialized from urlencoded request bodies and
//! validated with the `validator` crate. Validation failures are
//! collected into a field to messages map that the page renderer
//! uses to re-render the form.

use std::collections::HashMap;

use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

/// Field-level validation messages keyed by field name.
pub type FieldErrors = HashMap<String, Vec<String>>;

/// Maximum post title length.
pub const MAX_TITLE_LENGTH: u64 = 200;

/// Login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Registration form.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// Desired username.
    pub username: String,
    /// Password.
    pub password: String,
    /// Password confirmation, must match `password`.
    pub password_confirm: String,
}

/// Post creation and edit form.
#[derive(Debug, Deserialize, Validate)]
pub struct PostForm {
    /// Post title.
    #[validate(
        custom(function = "not_empty_trimmed"),
        length(max = 200, message = "Title must be at most 200 characters")
    )]
    pub title: String,
    /// Post body content.
    #[validate(custom(function = "body_text"))]
    pub content: String,
}

/// Comment form.
#[derive(Debug, Deserialize, Validate)]
pub struct CommentForm {
    /// Comment body content.
    #[validate(custom(function = "body_text"))]
    pub content: String,
}

/// Search form submitted as a query string on the post list.
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    /// Free-text title filter; absent or blank means no filter.
    #[serde(default)]
    pub query: Option<String>,
}

/// Validate that a string is not empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_empty_trimmed")
            .with_message("Must not be empty".into()));
    }
    Ok(())
}

/// Validate that a string does not contain control characters or NULL
/// bytes, apart from line breaks and tabs.
pub fn no_control_chars(value: &str) -> Result<(), ValidationError> {
    if value
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(ValidationError::new("no_control_chars")
            .with_message("Must not contain control characters".into()));
    }
    Ok(())
}

/// Validate body text: non-empty after trimming and free of control
/// characters apart from line breaks.
pub fn body_text(value: &str) -> Result<(), ValidationError> {
    not_empty_trimmed(value)?;
    no_control_chars(value)?;
    Ok(())
}

/// Collect `validator` errors into a field to messages map.
pub fn field_errors(errors: ValidationErrors) -> FieldErrors {
    let mut details: FieldErrors = HashMap::new();

    for (field, errs) in errors.field_errors() {
        let messages: Vec<String> = errs
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field))
            })
            .collect();
        details.insert(field.to_string(), messages);
    }

    details
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty_trimmed() {
        assert!(not_empty_trimmed("Hello").is_ok());
        assert!(not_empty_trimmed("  Hello  ").is_ok());
        assert!(not_empty_trimmed("").is_err());
        assert!(not_empty_trimmed("   ").is_err());
        assert!(not_empty_trimmed("\t\n").is_err());
    }

    #[test]
    fn test_no_control_chars() {
        assert!(no_control_chars("Hello, world!").is_ok());
        assert!(no_control_chars("Line 1\nLine 2").is_ok());
        assert!(no_control_chars("Tab\there").is_ok());
        assert!(no_control_chars("Hello\x00World").is_err()); // NULL byte
        assert!(no_control_chars("Hello\x07World").is_err()); // Bell
        assert!(no_control_chars("Hello\x1bWorld").is_err()); // Escape
    }

    #[test]
    fn test_post_form_valid() {
        let form = PostForm {
            title: "Hello".to_string(),
            content: "World".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_post_form_blank_title() {
        let form = PostForm {
            title: "   ".to_string(),
            content: "World".to_string(),
        };
        let errors = field_errors(form.validate().unwrap_err());
        assert!(errors.contains_key("title"));
        assert!(!errors.contains_key("content"));
    }

    #[test]
    fn test_post_form_title_too_long() {
        let form = PostForm {
            title: "a".repeat(201),
            content: "World".to_string(),
        };
        let errors = field_errors(form.validate().unwrap_err());
        assert_eq!(
            errors.get("title").unwrap(),
            &vec!["Title must be at most 200 characters".to_string()]
        );
    }

    #[test]
    fn test_post_form_title_max_length_ok() {
        let form = PostForm {
            title: "a".repeat(200),
            content: "World".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_post_form_control_chars_in_content() {
        let form = PostForm {
            title: "Hello".to_string(),
            content: "bad\x00content".to_string(),
        };
        let errors = field_errors(form.validate().unwrap_err());
        assert!(errors.contains_key("content"));
    }

    #[test]
    fn test_post_form_multiline_content_ok() {
        let form = PostForm {
            title: "Hello".to_string(),
            content: "Line 1\nLine 2\r\n\tIndented".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_comment_form() {
        let form = CommentForm {
            content: "Nice post".to_string(),
        };
        assert!(form.validate().is_ok());

        let form = CommentForm {
            content: "  ".to_string(),
        };
        let errors = field_errors(form.validate().unwrap_err());
        assert!(errors.contains_key("content"));
    }

    #[test]
    fn test_search_form_default() {
        let form = SearchForm::default();
        assert!(form.query.is_none());
    }
}
