//! Post handlers: listing, detail, create, edit and delete.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use validator::Validate;

use super::AppState;
use crate::blog::{CommentRepository, NewComment, NewPost, Post, PostRepository, PostUpdate};
use crate::db::{User, UserRepository};
use crate::web::error::WebError;
use crate::web::extract::{CurrentUser, MaybeUser};
use crate::web::forms::{field_errors, CommentForm, FieldErrors, PostForm, SearchForm};
use crate::web::pages::{self, CommentView, PostView};

/// Resolve an author id to a display name, falling back to "unknown"
/// for rows whose author no longer resolves.
async fn author_name(repo: &UserRepository<'_>, author_id: i64) -> String {
    repo.get_by_id(author_id)
        .await
        .ok()
        .flatten()
        .map(|u| u.username)
        .unwrap_or_else(|| "unknown".to_string())
}

/// Attach author names to a list of posts.
async fn post_views(state: &AppState, posts: Vec<Post>) -> Vec<PostView> {
    let user_repo = UserRepository::new(state.db.pool());
    let mut views = Vec::with_capacity(posts.len());
    for post in posts {
        let author = author_name(&user_repo, post.author_id).await;
        views.push(PostView { post, author });
    }
    views
}

/// Render the detail page for a post, loading its comments.
///
/// Used by the detail handler and by comment submission failures that
/// re-render the page with validation messages.
pub(super) async fn render_detail(
    state: &AppState,
    user: Option<&User>,
    post: Post,
    comment_value: &str,
    errors: &FieldErrors,
) -> Result<String, WebError> {
    let user_repo = UserRepository::new(state.db.pool());
    let comment_repo = CommentRepository::new(state.db.pool());

    let comments = comment_repo.list_by_post(post.id).await?;
    let mut comment_views = Vec::with_capacity(comments.len());
    for comment in comments {
        let author = author_name(&user_repo, comment.author_id).await;
        comment_views.push(CommentView { comment, author });
    }

    let author = author_name(&user_repo, post.author_id).await;
    let view = PostView { post, author };

    Ok(pages::post_detail(
        &state.site_name,
        user,
        &view,
        &comment_views,
        comment_value,
        errors,
    ))
}

/// GET /
///
/// Lists all posts, newest first. A `query` parameter filters by
/// title substring.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Query(form): Query<SearchForm>,
) -> Result<Html<String>, WebError> {
    let post_repo = PostRepository::new(state.db.pool());

    let query = form.query.as_deref().unwrap_or("").trim().to_string();
    let posts = if query.is_empty() {
        post_repo.list().await?
    } else {
        post_repo.search_by_title(&query).await?
    };

    let views = post_views(&state, posts).await;
    Ok(Html(pages::post_list(
        &state.site_name,
        &state.site_description,
        user.as_ref(),
        &views,
        &query,
    )))
}

/// GET /post/:id/
pub async fn post_detail_page(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<i64>,
) -> Result<Html<String>, WebError> {
    let post_repo = PostRepository::new(state.db.pool());
    let post = post_repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| WebError::not_found("Post not found"))?;

    let body = render_detail(&state, user.as_ref(), post, "", &FieldErrors::new()).await?;
    Ok(Html(body))
}

/// POST /post/:id/
///
/// Comment submission on the detail page. The page is re-rendered in
/// place rather than redirecting.
pub async fn post_detail_comment(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<CommentForm>,
) -> Result<Response, WebError> {
    let post_repo = PostRepository::new(state.db.pool());
    let post = post_repo
        .get_by_id(id)
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

    let body = render_detail(&state, Some(&user), post, "", &FieldErrors::new()).await?;
    Ok(Html(body).into_response())
}

/// GET /post/new/
pub async fn new_post_page(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Html<String> {
    Html(pages::post_form(
        &state.site_name,
        Some(&user),
        "New post",
        "/post/new/",
        "",
        "",
        &FieldErrors::new(),
    ))
}

/// POST /post/new/
pub async fn new_post_submit(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<PostForm>,
) -> Result<Response, WebError> {
    if let Err(e) = form.validate() {
        let body = pages::post_form(
            &state.site_name,
            Some(&user),
            "New post",
            "/post/new/",
            &form.title,
            &form.content,
            &field_errors(e),
        );
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
    }

    let post_repo = PostRepository::new(state.db.pool());
    let new_post = NewPost::new(form.title.trim(), form.content.trim(), user.id);
    let post = post_repo.create(&new_post).await?;
    tracing::info!(post_id = post.id, user_id = user.id, "post created");

    Ok(Redirect::to("/").into_response())
}

/// GET /post/:id/edit/
pub async fn edit_post_page(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Html<String>, WebError> {
    let post_repo = PostRepository::new(state.db.pool());
    let post = post_repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| WebError::not_found("Post not found"))?;

    Ok(Html(pages::post_form(
        &state.site_name,
        Some(&user),
        "Edit post",
        &format!("/post/{}/edit/", post.id),
        &post.title,
        &post.content,
        &FieldErrors::new(),
    )))
}

/// POST /post/:id/edit/
///
/// Updates title and content. The author and creation time are left
/// untouched.
pub async fn edit_post_submit(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
    Form(form): Form<PostForm>,
) -> Result<Response, WebError> {
    let post_repo = PostRepository::new(state.db.pool());
    let post = post_repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| WebError::not_found("Post not found"))?;

    if let Err(e) = form.validate() {
        let body = pages::post_form(
            &state.site_name,
            Some(&user),
            "Edit post",
            &format!("/post/{}/edit/", post.id),
            &form.title,
            &form.content,
            &field_errors(e),
        );
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
    }

    let update = PostUpdate::new(form.title.trim(), form.content.trim());
    post_repo
        .update(post.id, &update)
        .await?
        .ok_or_else(|| WebError::not_found("Post not found"))?;
    tracing::info!(post_id = post.id, user_id = user.id, "post updated");

    Ok(Redirect::to("/").into_response())
}

/// GET /post/:id/delete/
pub async fn delete_post_page(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Html<String>, WebError> {
    let post_repo = PostRepository::new(state.db.pool());
    let post = post_repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| WebError::not_found("Post not found"))?;

    Ok(Html(pages::delete_confirm(
        &state.site_name,
        Some(&user),
        &post,
    )))
}

/// POST /post/:id/delete/
pub async fn delete_post_submit(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Redirect, WebError> {
    let post_repo = PostRepository::new(state.db.pool());
    let deleted = post_repo.delete(id).await?;
    if !deleted {
        return Err(WebError::not_found("Post not found"));
    }
    tracing::info!(post_id = id, user_id = user.id, "post deleted");

    Ok(Redirect::to("/"))
}
