use crate::cli::globals::GlobalArgs;
use crate::gatehouse::{pages, session};
use axum::{
    extract::Extension,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use sqlx::PgPool;
use tracing::instrument;

use super::server_error;

/// Landing page: signup/login buttons for visitors, a members-area link for
/// anyone with a live session.
#[instrument(skip_all)]
pub async fn home(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    globals: Extension<GlobalArgs>,
) -> Response {
    match session::authenticate(&headers, &pool, &globals.session_secret).await {
        Ok(Some(record)) => Html(pages::landing_member(&record.username)).into_response(),
        Ok(None) => Html(pages::landing_anonymous()).into_response(),
        Err(_) => server_error(),
    }
}
