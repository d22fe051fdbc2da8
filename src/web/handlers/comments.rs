//! Comment handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use validator::Validate;

use super::posts::render_detail;
use super::AppState;
use crate::blog::{CommentRepository, NewComment, PostRepository};
use crate::web::error::WebError;
use crate::web::extract::CurrentUser;
use crate::web::forms::{field_errors, CommentForm};

/// POST /post/:post_id/comment/
///
/// Standalone comment endpoint. On success the browser is sent back
/// to the page it came from, falling back to the post detail page
/// when no Referer header is present.
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<i64>,
    headers: HeaderMap,
    Form(form): Form<CommentForm>,
) -> Result<Response, WebError> {
    let post_repo = PostRepository::new(state.db.pool());
    let post = post_repo
        .get_by_id(post_id)
        .await?
        .ok_or_else(|| WebError::not_found("Post not found"))?;

    if let Err(e) = form.validate() {
        let errors = field_errors(e);
        let body = render_detail(&state, Some(&user), post, &form.content, &errors).await?;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
    }

    let comment_repo = CommentRepository::new(state.db.pool());
    let new_comment = NewComment::new(post.id, user.id, form.content.trim());
    comment_repo.create(&new_comment).await?;
    tracing::info!(post_id = post.id, user_id = user.id, "comment created");

    let target = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("/post/{}/", post.id));

    Ok(Redirect::to(&target).into_response())
}
