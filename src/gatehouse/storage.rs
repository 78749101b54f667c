//! Database helpers for credentials and session state.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::session::SESSION_TTL_SECONDS;

/// A stored user credential record.
#[derive(Debug)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Minimal data returned for a valid session cookie.
#[derive(Debug)]
pub struct SessionRecord {
    pub username: String,
}

/// Idempotent schema bootstrap, run once at startup.
///
/// `email` carries no unique constraint: duplicate signups create distinct
/// rows, and lookup treats an ambiguous email as not found.
///
/// # Errors
/// Returns an error when a DDL statement fails.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    let statements = [
        r"
        CREATE TABLE IF NOT EXISTS users (
            id          UUID PRIMARY KEY,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL,
            password    TEXT NOT NULL
        )",
        r"
        CREATE TABLE IF NOT EXISTS sessions (
            token_hash     BYTEA PRIMARY KEY,
            username       TEXT NOT NULL,
            authenticated  BOOLEAN NOT NULL DEFAULT TRUE,
            expires_at     TIMESTAMPTZ NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_users_email ON users (email)",
        "CREATE INDEX IF NOT EXISTS idx_sessions_expires ON sessions (expires_at)",
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("failed to run schema statement")?;
    }

    Ok(())
}

/// Append a user record. No uniqueness check on email.
///
/// # Errors
/// Returns an error when the insert fails.
pub async fn insert_user(pool: &PgPool, name: &str, email: &str, password_hash: &str) -> Result<()> {
    let query = "INSERT INTO users (id, name, email, password) VALUES ($1, $2, $3, $4)";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    sqlx::query(query)
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to insert user")?;

    Ok(())
}

/// Look up a credential record by email.
///
/// Returns the record iff exactly one row matches. Since email is not
/// unique, more than one match is indistinguishable from no match.
///
/// # Errors
/// Returns an error when the query fails.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
    let query = "SELECT name, email, password FROM users WHERE email = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let mut rows = sqlx::query(query)
        .bind(email)
        .fetch_all(pool)
        .instrument(span)
        .await
        .context("failed to lookup user by email")?;

    if rows.len() != 1 {
        return Ok(None);
    }

    let row = rows.remove(0);
    Ok(Some(UserRecord {
        name: row.get("name"),
        email: row.get("email"),
        password: row.get("password"),
    }))
}

/// Establish an authenticated session expiring one hour from now.
///
/// # Errors
/// Returns an error when the insert fails.
pub async fn create_session(pool: &PgPool, token_hash: &[u8], username: &str) -> Result<()> {
    let query = r"
        INSERT INTO sessions (token_hash, username, authenticated, expires_at)
        VALUES ($1, $2, TRUE, NOW() + ($3 * INTERVAL '1 second'))
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    sqlx::query(query)
        .bind(token_hash)
        .bind(username)
        .bind(SESSION_TTL_SECONDS)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to create session")?;

    Ok(())
}

/// Resolve a token hash to a live session.
///
/// Expiry is enforced here, in the store: an expired row is never returned,
/// which is the only authenticated/anonymous boundary the system has.
///
/// # Errors
/// Returns an error when the query fails.
pub async fn lookup_session(pool: &PgPool, token_hash: &[u8]) -> Result<Option<SessionRecord>> {
    let query = r"
        SELECT username FROM sessions
        WHERE token_hash = $1 AND authenticated AND expires_at > NOW()
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(token_hash)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup session")?;

    Ok(row.map(|row| SessionRecord {
        username: row.get("username"),
    }))
}

/// Destroy a session immediately.
///
/// # Errors
/// Returns an error when the delete fails.
pub async fn delete_session(pool: &PgPool, token_hash: &[u8]) -> Result<()> {
    let query = "DELETE FROM sessions WHERE token_hash = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(token_hash)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to delete session")?;

    Ok(())
}
