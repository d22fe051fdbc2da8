//! Request extractors for the Quill web interface.
//!
//! Session-cookie authentication is implemented as axum extractors:
//! [`CurrentUser`] rejects unauthenticated requests with a redirect
//! to the login page, while [`MaybeUser`] never rejects and yields
//! `None` for anonymous visitors.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::db::{SessionRepository, User, UserRepository};
use crate::web::handlers::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "quill_session";

/// Rejection that redirects the browser to the login page.
#[derive(Debug)]
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login/").into_response()
    }
}

/// Build the session cookie for a freshly created session token.
pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Build an expired session cookie used to clear the browser state.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}

/// Resolve the user for the session cookie in the request, if any.
///
/// Returns `None` when the cookie is missing, the session is expired
/// or unknown, or the account has been deactivated.
async fn user_from_cookie(parts: &Parts, state: &Arc<AppState>) -> Option<User> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar.get(SESSION_COOKIE)?.value().to_owned();

    let session_repo = SessionRepository::new(state.db.pool());
    let session = match session_repo.get_valid(&token).await {
        Ok(Some(session)) => session,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("session lookup failed: {}", e);
            return None;
        }
    };

    let user_repo = UserRepository::new(state.db.pool());
    match user_repo.get_by_id(session.user_id).await {
        Ok(Some(user)) if user.is_active => Some(user),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("user lookup failed: {}", e);
            None
        }
    }
}

/// Extractor for handlers that require a logged-in user.
///
/// Rejects with a redirect to `/login/` when no valid session is
/// attached to the request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = Arc::<AppState>::from_ref(state);
        user_from_cookie(parts, &state)
            .await
            .map(CurrentUser)
            .ok_or(LoginRedirect)
    }
}

/// Extractor that yields the logged-in user when present.
///
/// Never rejects; anonymous requests yield `MaybeUser(None)`.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    Arc<AppState>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = Arc::<AppState>::from_ref(state);
        Ok(MaybeUser(user_from_cookie(parts, &state).await))
    }
}
