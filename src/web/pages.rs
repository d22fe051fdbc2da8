//! HTML page rendering for Quill.
//!
//! Pages are plain strings assembled around a shared layout; every
//! user-provided value passes through `escape` on the way in.

use crate::blog::{Comment, Post};
use crate::db::User;
use crate::web::forms::FieldErrors;

/// A post paired with its author's display name.
pub struct PostView {
    /// The post record.
    pub post: Post,
    /// Display name of the post author.
    pub author: String,
}

/// A comment paired with its author's display name.
pub struct CommentView {
    /// The comment record.
    pub comment: Comment,
    /// Display name of the comment author.
    pub author: String,
}

/// Escape a string for safe insertion into HTML text and attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape body text and turn line breaks into `<br>` tags.
fn escape_multiline(s: &str) -> String {
    escape(s).replace("\r\n", "\n").replace('\n', "<br>\n")
}

/// Render the validation messages for one form field.
fn errors_for(errors: &FieldErrors, field: &str) -> String {
    match errors.get(field) {
        Some(messages) => messages
            .iter()
            .map(|m| format!("<p class=\"error\">{}</p>\n", escape(m)))
            .collect(),
        None => String::new(),
    }
}

/// Shared page layout with header navigation.
fn layout(site_name: &str, title: &str, user: Option<&User>, body: &str) -> String {
    let account = match user {
        Some(u) => format!(
            concat!(
                "<span class=\"account\">Signed in as {}</span>\n",
                "<form class=\"inline\" method=\"post\" action=\"/logout/\">",
                "<button type=\"submit\">Log out</button></form>"
            ),
            escape(&u.username)
        ),
        None => concat!(
            "<a href=\"/login/\">Log in</a>\n",
            "<a href=\"/register/\">Register</a>"
        )
        .to_string(),
    };

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>{title} - {site}</title>\n",
            "<style>\n",
            "body {{ font-family: sans-serif; max-width: 46rem; margin: 0 auto; padding: 0 1rem; }}\n",
            "nav {{ display: flex; gap: 1rem; align-items: baseline; border-bottom: 1px solid #ccc; padding: 0.5rem 0; }}\n",
            "nav .spacer {{ flex: 1; }}\n",
            "form.inline {{ display: inline; }}\n",
            ".meta {{ color: #666; font-size: 0.85rem; }}\n",
            ".error {{ color: #b00; }}\n",
            "label {{ display: block; margin-top: 0.5rem; }}\n",
            "input[type=text], input[type=password], textarea {{ width: 100%; }}\n",
            "</style>\n",
            "</head>\n",
            "<body>\n",
            "<nav>\n",
            "<a href=\"/\"><strong>{site}</strong></a>\n",
            "<a href=\"/post/new/\">New post</a>\n",
            "<span class=\"spacer\"></span>\n",
            "{account}\n",
            "</nav>\n",
            "<main>\n",
            "{body}\n",
            "</main>\n",
            "</body>\n",
            "</html>\n"
        ),
        title = escape(title),
        site = escape(site_name),
        account = account,
        body = body
    )
}

/// Render the post list page with the search form.
pub fn post_list(
    site_name: &str,
    site_description: &str,
    user: Option<&User>,
    posts: &[PostView],
    query: &str,
) -> String {
    let mut body = format!(
        concat!(
            "<p class=\"meta\">{}</p>\n",
            "<form method=\"get\" action=\"/\">\n",
            "<input type=\"text\" name=\"query\" value=\"{}\" placeholder=\"Search titles\">\n",
            "<button type=\"submit\">Search</button>\n",
            "</form>\n"
        ),
        escape(site_description),
        escape(query)
    );

    if posts.is_empty() {
        body.push_str("<p>No posts yet.</p>\n");
    }

    for view in posts {
        body.push_str(&format!(
            concat!(
                "<article>\n",
                "<h2><a href=\"/post/{id}/\">{title}</a></h2>\n",
                "<p class=\"meta\">by {author} on {created}</p>\n",
                "</article>\n"
            ),
            id = view.post.id,
            title = escape(&view.post.title),
            author = escape(&view.author),
            created = escape(&view.post.created_at)
        ));
    }

    layout(site_name, "Posts", user, &body)
}

/// Render the post detail page with comments and the comment form.
pub fn post_detail(
    site_name: &str,
    user: Option<&User>,
    post: &PostView,
    comments: &[CommentView],
    comment_value: &str,
    errors: &FieldErrors,
) -> String {
    let mut body = format!(
        concat!(
            "<article>\n",
            "<h1>{title}</h1>\n",
            "<p class=\"meta\">by {author} on {created}</p>\n",
            "<div class=\"content\"><p>{content}</p></div>\n",
            "</article>\n"
        ),
        title = escape(&post.post.title),
        author = escape(&post.author),
        created = escape(&post.post.created_at),
        content = escape_multiline(&post.post.content)
    );

    if user.is_some() {
        body.push_str(&format!(
            concat!(
                "<p>\n",
                "<a href=\"/post/{id}/edit/\">Edit</a>\n",
                "<a href=\"/post/{id}/delete/\">Delete</a>\n",
                "</p>\n"
            ),
            id = post.post.id
        ));
    }

    body.push_str(&format!("<h2>Comments ({})</h2>\n", comments.len()));
    if comments.is_empty() {
        body.push_str("<p>No comments yet.</p>\n");
    } else {
        body.push_str("<ul class=\"comments\">\n");
        for view in comments {
            body.push_str(&format!(
                concat!(
                    "<li>\n",
                    "<p class=\"meta\">{author} on {created}</p>\n",
                    "<p>{content}</p>\n",
                    "</li>\n"
                ),
                author = escape(&view.author),
                created = escape(&view.comment.created_at),
                content = escape_multiline(&view.comment.content)
            ));
        }
        body.push_str("</ul>\n");
    }

    if user.is_some() {
        body.push_str(&format!(
            concat!(
                "<form method=\"post\" action=\"/post/{id}/\">\n",
                "{errors}",
                "<label for=\"content\">Add a comment</label>\n",
                "<textarea id=\"content\" name=\"content\" rows=\"4\">{value}</textarea>\n",
                "<button type=\"submit\">Comment</button>\n",
                "</form>\n"
            ),
            id = post.post.id,
            errors = errors_for(errors, "content"),
            value = escape(comment_value)
        ));
    } else {
        body.push_str("<p><a href=\"/login/\">Log in</a> to comment.</p>\n");
    }

    layout(site_name, &post.post.title, user, &body)
}

/// Render the post create/edit form page.
pub fn post_form(
    site_name: &str,
    user: Option<&User>,
    heading: &str,
    action: &str,
    title_value: &str,
    content_value: &str,
    errors: &FieldErrors,
) -> String {
    let body = format!(
        concat!(
            "<h1>{heading}</h1>\n",
            "<form method=\"post\" action=\"{action}\">\n",
            "{title_errors}",
            "<label for=\"title\">Title</label>\n",
            "<input type=\"text\" id=\"title\" name=\"title\" value=\"{title}\">\n",
            "{content_errors}",
            "<label for=\"content\">Content</label>\n",
            "<textarea id=\"content\" name=\"content\" rows=\"12\">{content}</textarea>\n",
            "<button type=\"submit\">Save</button>\n",
            "</form>\n"
        ),
        heading = escape(heading),
        action = escape(action),
        title_errors = errors_for(errors, "title"),
        title = escape(title_value),
        content_errors = errors_for(errors, "content"),
        content = escape(content_value)
    );

    layout(site_name, heading, user, &body)
}

/// Render the delete confirmation page.
pub fn delete_confirm(site_name: &str, user: Option<&User>, post: &Post) -> String {
    let body = format!(
        concat!(
            "<h1>Delete post</h1>\n",
            "<p>Delete \"{title}\"? Its comments will be removed as well.</p>\n",
            "<form method=\"post\" action=\"/post/{id}/delete/\">\n",
            "<button type=\"submit\">Delete</button>\n",
            "<a href=\"/post/{id}/\">Cancel</a>\n",
            "</form>\n"
        ),
        title = escape(&post.title),
        id = post.id
    );

    layout(site_name, "Delete post", user, &body)
}

/// Render the login page.
///
/// The error message is always the same generic one so the page never
/// reveals whether the username exists.
pub fn login(site_name: &str, username_value: &str, error: Option<&str>) -> String {
    let error_html = match error {
        Some(msg) => format!("<p class=\"error\">{}</p>\n", escape(msg)),
        None => String::new(),
    };

    let body = format!(
        concat!(
            "<h1>Log in</h1>\n",
            "{error}",
            "<form method=\"post\" action=\"/login/\">\n",
            "<label for=\"username\">Username</label>\n",
            "<input type=\"text\" id=\"username\" name=\"username\" value=\"{username}\">\n",
            "<label for=\"password\">Password</label>\n",
            "<input type=\"password\" id=\"password\" name=\"password\">\n",
            "<button type=\"submit\">Log in</button>\n",
            "</form>\n",
            "<p>No account? <a href=\"/register/\">Register</a>.</p>\n"
        ),
        error = error_html,
        username = escape(username_value)
    );

    layout(site_name, "Log in", None, &body)
}

/// Render the registration page.
pub fn register(site_name: &str, username_value: &str, errors: &FieldErrors) -> String {
    let body = format!(
        concat!(
            "<h1>Register</h1>\n",
            "<form method=\"post\" action=\"/register/\">\n",
            "{username_errors}",
            "<label for=\"username\">Username</label>\n",
            "<input type=\"text\" id=\"username\" name=\"username\" value=\"{username}\">\n",
            "{password_errors}",
            "<label for=\"password\">Password</label>\n",
            "<input type=\"password\" id=\"password\" name=\"password\">\n",
            "{confirm_errors}",
            "<label for=\"password_confirm\">Confirm password</label>\n",
            "<input type=\"password\" id=\"password_confirm\" name=\"password_confirm\">\n",
            "<button type=\"submit\">Register</button>\n",
            "</form>\n",
            "<p>Already registered? <a href=\"/login/\">Log in</a>.</p>\n"
        ),
        username_errors = errors_for(errors, "username"),
        username = escape(username_value),
        password_errors = errors_for(errors, "password"),
        confirm_errors = errors_for(errors, "password_confirm")
    );

    layout(site_name, "Register", None, &body)
}

/// Render a bare error page for the given status code.
pub fn error_page(status: u16, message: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head><meta charset=\"utf-8\"><title>{status}</title></head>\n",
            "<body>\n",
            "<h1>{status}</h1>\n",
            "<p>{message}</p>\n",
            "<p><a href=\"/\">Back to posts</a></p>\n",
            "</body>\n",
            "</html>\n"
        ),
        status = status,
        message = escape(message)
    )
}
