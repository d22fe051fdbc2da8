//! Router configuration for the Quill web interface.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::web::handlers::{self, AppState};

/// Create the application router with all page routes.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_posts))
        .route(
            "/post/new/",
            get(handlers::new_post_page).post(handlers::new_post_submit),
        )
        .route(
            "/post/:id/",
            get(handlers::post_detail_page).post(handlers::post_detail_comment),
        )
        .route(
            "/post/:id/edit/",
            get(handlers::edit_post_page).post(handlers::edit_post_submit),
        )
        .route(
            "/post/:id/delete/",
            get(handlers::delete_post_page).post(handlers::delete_post_submit),
        )
        .route("/post/:post_id/comment/", post(handlers::create_comment))
        .route(
            "/register/",
            get(handlers::register_page).post(handlers::register_submit),
        )
        .route(
            "/login/",
            get(handlers::login_page).post(handlers::login_submit),
        )
        .route("/logout/", get(handlers::logout).post(handlers::logout))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(|| async { "OK" }))
}
