use crate::cli::globals::GlobalArgs;
use crate::gatehouse::{pages, session};
use axum::{
    extract::Extension,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use rand::Rng;
use sqlx::PgPool;
use tracing::instrument;

use super::{redirect, server_error};

/// Members area, gated behind a live session.
///
/// Anonymous and expired sessions are redirected to `/`; members get a
/// greeting and one of three cat pictures.
#[instrument(skip_all)]
pub async fn members(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    globals: Extension<GlobalArgs>,
) -> Response {
    let record = match session::authenticate(&headers, &pool, &globals.session_secret).await {
        Ok(Some(record)) => record,
        Ok(None) => return redirect("/"),
        Err(_) => return server_error(),
    };

    let cat = rand::thread_rng().gen_range(1..=3u8);

    Html(pages::members(&record.username, cat)).into_response()
}
