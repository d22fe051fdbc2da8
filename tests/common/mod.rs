//! Test helpers for web integration tests.
//!
//! Builds an in-process test server around the application router
//! with an in-memory database and cookie persistence, so a test can
//! register, log in and browse like a real client.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::{TestServer, TestServerConfig};

use quill::config::{AuthConfig, SiteConfig};
use quill::web::handlers::AppState;
use quill::{create_router, Database};

/// Create a test server with an in-memory database.
///
/// Cookies are saved between requests so the session survives the
/// login redirect.
pub async fn create_test_server() -> (TestServer, Arc<Database>) {
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );

    let app_state = Arc::new(AppState::new(
        db.clone(),
        &SiteConfig::default(),
        &AuthConfig::default(),
    ));

    let config = TestServerConfig {
        save_cookies: true,
        ..TestServerConfig::default()
    };

    let server = TestServer::new_with_config(create_router(app_state), config)
        .expect("Failed to create test server");

    (server, db)
}

/// Register a user through the form endpoint.
///
/// Leaves the new session cookie in the server's cookie store.
pub async fn register_user(server: &TestServer, username: &str, password: &str) {
    let response = server
        .post("/register/")
        .form(&[
            ("username", username),
            ("password", password),
            ("password_confirm", password),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
}

/// Log in through the form endpoint.
pub async fn login_user(server: &TestServer, username: &str, password: &str) {
    let response = server
        .post("/login/")
        .form(&[("username", username), ("password", password)])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
}

/// Create a post through the form endpoint and return its id.
///
/// Assumes the server has a logged-in session and that ids are
/// assigned sequentially from 1 in a fresh database.
pub async fn create_post(server: &TestServer, title: &str, content: &str) {
    let response = server
        .post("/post/new/")
        .form(&[("title", title), ("content", content)])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
}
