//! Account handlers: registration, login and logout.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;

use super::AppState;
use crate::auth::{self, LoginError, RegistrationError, RegistrationRequest, ValidationError};
use crate::db::{NewSession, SessionRepository, UserRepository};
use crate::web::error::WebError;
use crate::web::extract::{removal_cookie, session_cookie, MaybeUser, SESSION_COOKIE};
use crate::web::forms::{FieldErrors, LoginForm, RegisterForm};
use crate::web::pages;

/// GET /register/
pub async fn register_page(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    Html(pages::register(&state.site_name, "", &FieldErrors::new())).into_response()
}

/// POST /register/
///
/// On success the new user is logged in immediately and redirected to
/// the post list. Validation failures re-render the form with
/// field-level messages.
pub async fn register_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let mut errors = FieldErrors::new();

    if form.password != form.password_confirm {
        errors.insert(
            "password_confirm".to_string(),
            vec!["Passwords do not match".to_string()],
        );
        return register_failure(&state, &form.username, errors);
    }

    let user_repo = UserRepository::new(state.db.pool());
    let request = RegistrationRequest::new(&form.username, &form.password);

    let user = match auth::register(&user_repo, &request).await {
        Ok(user) => user,
        Err(RegistrationError::Validation(e)) => {
            let field = match e {
                ValidationError::UsernameTooShort
                | ValidationError::UsernameTooLong
                | ValidationError::UsernameInvalidChars
                | ValidationError::UsernameReserved => "username",
                ValidationError::PasswordTooShort
                | ValidationError::PasswordTooLong
                | ValidationError::PasswordSameAsUsername => "password",
            };
            errors.insert(field.to_string(), vec![e.to_string()]);
            return register_failure(&state, &form.username, errors);
        }
        Err(RegistrationError::UsernameExists) => {
            errors.insert(
                "username".to_string(),
                vec!["Username is already taken".to_string()],
            );
            return register_failure(&state, &form.username, errors);
        }
        Err(RegistrationError::Password(e)) => {
            errors.insert("password".to_string(), vec![e.to_string()]);
            return register_failure(&state, &form.username, errors);
        }
        Err(RegistrationError::Database(e)) => {
            tracing::error!("registration failed: {}", e);
            return WebError::internal("An internal error occurred").into_response();
        }
    };

    let session_repo = SessionRepository::new(state.db.pool());
    let new_session = NewSession::generate(user.id, state.session_expiry_days);
    match session_repo.create(&new_session).await {
        Ok(session) => {
            let jar = jar.add(session_cookie(&session.token));
            (jar, Redirect::to("/")).into_response()
        }
        Err(e) => {
            tracing::error!("session creation failed: {}", e);
            WebError::internal("An internal error occurred").into_response()
        }
    }
}

fn register_failure(state: &AppState, username: &str, errors: FieldErrors) -> Response {
    let body = pages::register(&state.site_name, username, &errors);
    (StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response()
}

/// GET /login/
pub async fn login_page(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    Html(pages::login(&state.site_name, "", None)).into_response()
}

/// POST /login/
///
/// Failed and disabled-account logins both render the same generic
/// message so the form does not leak which usernames exist.
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let user_repo = UserRepository::new(state.db.pool());
    let session_repo = SessionRepository::new(state.db.pool());

    match auth::login(
        &user_repo,
        &session_repo,
        &form.username,
        &form.password,
        state.session_expiry_days,
    )
    .await
    {
        Ok((_user, session)) => {
            let jar = jar.add(session_cookie(&session.token));
            (jar, Redirect::to("/")).into_response()
        }
        Err(LoginError::InvalidCredentials) | Err(LoginError::AccountDisabled) => {
            let body = pages::login(
                &state.site_name,
                &form.username,
                Some("Invalid username or password"),
            );
            (StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response()
        }
        Err(LoginError::Database(e)) => {
            tracing::error!("login failed: {}", e);
            WebError::internal("An internal error occurred").into_response()
        }
    }
}

/// GET and POST /logout/
///
/// Deletes the session row and clears the cookie. Logging out without
/// a session is a no-op redirect.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let session_repo = SessionRepository::new(state.db.pool());
        if let Err(e) = auth::logout(&session_repo, cookie.value()).await {
            tracing::warn!("logout failed: {}", e);
        }
    }
    let jar = jar.remove(removal_cookie());
    (jar, Redirect::to("/")).into_response()
}
