pub mod health;
pub use self::health::health;

pub mod home;
pub use self::home::home;

pub mod signup;
pub use self::signup::{signup_form, signup_submit};

pub mod login;
pub use self::login::{login_form, login_submit};

pub mod members;
pub use self::members::members;

pub mod logout;
pub use self::logout::logout;

// common functions for the handlers
use crate::cli::globals::GlobalArgs;
use crate::gatehouse::{pages, session, storage};
use axum::{
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{Html, IntoResponse, Response},
};
use sqlx::PgPool;
use tracing::error;

/// 404 fallback for unmatched routes, plain text body.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, pages::NOT_FOUND)
}

/// 302 Found redirect.
pub(crate) fn redirect(to: &'static str) -> Response {
    redirect_with(HeaderMap::new(), to)
}

/// 302 Found redirect carrying extra headers (Set-Cookie, mostly).
pub(crate) fn redirect_with(mut headers: HeaderMap, to: &'static str) -> Response {
    headers.insert(LOCATION, HeaderValue::from_static(to));
    (StatusCode::FOUND, headers).into_response()
}

/// Generic 500 page for database and store failures.
pub(crate) fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::server_error())).into_response()
}

/// Mint a fresh session for `username` and return the Set-Cookie header.
///
/// Any store or header failure collapses into the generic 500 response.
pub(crate) async fn establish_session(
    pool: &PgPool,
    globals: &GlobalArgs,
    username: &str,
) -> Result<HeaderMap, Response> {
    let token = session::generate_session_token();
    let token_hash = session::hash_session_token(&globals.session_secret, &token);

    if let Err(err) = storage::create_session(pool, &token_hash, username).await {
        error!("Failed to create session: {err}");
        return Err(server_error());
    }

    let cookie = match session::session_cookie(&token) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return Err(server_error());
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    Ok(headers)
}
