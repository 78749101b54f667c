use crate::cli::globals::GlobalArgs;
use crate::gatehouse::{session, storage};
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap},
    response::Response,
};
use sqlx::PgPool;
use tracing::{error, instrument};

use super::redirect_with;

/// Destroy the session and send the visitor back to the landing page.
#[instrument(skip_all)]
pub async fn logout(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    globals: Extension<GlobalArgs>,
) -> Response {
    if let Some(token) = session::extract_session_token(&headers) {
        let token_hash = session::hash_session_token(&globals.session_secret, &token);
        if let Err(err) = storage::delete_session(&pool, &token_hash).await {
            error!("Failed to delete session: {err}");
        }
    }

    // Always clear the cookie, even if the session record was missing.
    let mut response_headers = HeaderMap::new();
    response_headers.insert(SET_COOKIE, session::clear_session_cookie());
    redirect_with(response_headers, "/")
}
