use crate::cli::globals::GlobalArgs;
use crate::gatehouse::{pages, password, storage, validate};
use axum::{
    extract::Extension,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{debug, error, instrument};

use super::{establish_session, redirect_with, server_error};

#[derive(Debug, Default, Deserialize)]
pub struct LoginSubmit {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// Login form, static markup.
pub async fn login_form() -> impl IntoResponse {
    Html(pages::login_form())
}

/// Handle a login submission.
///
/// Validation failure, unknown email, and wrong password all produce the
/// identical generic page, so a response never reveals whether an account
/// exists. Validation failures never reach the database.
#[instrument(skip_all)]
pub async fn login_submit(
    pool: Extension<PgPool>,
    globals: Extension<GlobalArgs>,
    payload: Option<Form<LoginSubmit>>,
) -> Response {
    let form = payload.map_or_else(LoginSubmit::default, |Form(form)| form);

    if let Err(err) = validate::login(&form.email, &form.password) {
        debug!("login validation failed: {err:?}");
        return Html(pages::login_retry()).into_response();
    }

    let record = match storage::find_by_email(&pool, &form.email).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            debug!("user not found");
            return Html(pages::login_retry()).into_response();
        }
        Err(err) => {
            error!("Failed to lookup user: {err}");
            return server_error();
        }
    };

    if !password::verify(&form.password, &record.password) {
        debug!("incorrect password");
        return Html(pages::login_retry()).into_response();
    }

    debug!("correct password");

    match establish_session(&pool, &globals, &record.name).await {
        Ok(headers) => redirect_with(headers, "/members"),
        Err(response) => response,
    }
}
