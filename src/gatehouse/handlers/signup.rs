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
pub struct SignupSubmit {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// Signup form, static markup.
pub async fn signup_form() -> impl IntoResponse {
    Html(pages::signup_form())
}

/// Handle a signup submission.
///
/// Validation collects every field error so the retry page shows one hint
/// per field. On success the password is hashed, the record stored, and a
/// fresh authenticated session established before redirecting to `/members`.
#[instrument(skip_all)]
pub async fn signup_submit(
    pool: Extension<PgPool>,
    globals: Extension<GlobalArgs>,
    payload: Option<Form<SignupSubmit>>,
) -> Response {
    // A missing body validates the same as empty fields
    let form = payload.map_or_else(SignupSubmit::default, |Form(form)| form);

    if let Err(errors) = validate::signup(&form.name, &form.email, &form.password) {
        debug!("signup validation failed: {errors:?}");
        return Html(pages::signup_retry(&errors)).into_response();
    }

    let hashed = match password::hash(&form.password) {
        Ok(hashed) => hashed,
        Err(err) => {
            error!("Failed to hash password: {err}");
            return server_error();
        }
    };

    if let Err(err) = storage::insert_user(&pool, &form.name, &form.email, &hashed).await {
        error!("Failed to insert user: {err}");
        return server_error();
    }

    debug!("inserted user");

    match establish_session(&pool, &globals, &form.name).await {
        Ok(headers) => redirect_with(headers, "/members"),
        Err(response) => response,
    }
}
