//! Session tokens, cookies, and authentication state.
//!
//! The raw token only ever lives in the client's cookie; the database stores
//! a keyed SHA-256 hash, so a leaked sessions table cannot be replayed.

use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue, StatusCode,
};
use base64ct::{Base64UrlUnpadded, Encoding};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tracing::error;

use super::storage::{self, SessionRecord};

pub const SESSION_COOKIE_NAME: &str = "gatehouse_session";

/// Sessions expire one hour after creation; each new login or signup mints a
/// fresh token, which is how expiry gets refreshed.
pub const SESSION_TTL_SECONDS: i64 = 60 * 60;

/// Create a new session token for the auth cookie.
/// The raw value is only returned to set the cookie; the database stores a hash.
pub fn generate_session_token() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    Base64UrlUnpadded::encode_string(&bytes)
}

/// Hash a session token, keyed with the configured secret, so raw values
/// never touch the database.
#[must_use]
pub fn hash_session_token(secret: &SecretString, token: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(secret.expose_secret().as_bytes());
    hasher.update(token.as_bytes());
    hasher.finalize().to_vec()
}

/// Build the `HttpOnly` cookie carrying the session token.
///
/// # Errors
/// Returns an error if the token contains bytes invalid in a header value.
pub fn session_cookie(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TTL_SECONDS}"
    ))
}

#[must_use]
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("gatehouse_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Pull the session token out of the request's `Cookie` header, if present.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        // A segment without '=' is not ours to reject; keep scanning
        let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
            continue;
        };
        if key.trim() == SESSION_COOKIE_NAME {
            let val = val.trim();
            if !val.is_empty() {
                return Some(val.to_string());
            }
        }
    }
    None
}

/// Resolve a session cookie into a session record, if present.
///
/// Returns `Ok(None)` when the cookie is missing, unknown, or expired; the
/// store filters expiry, so an expired session looks identical to none.
///
/// # Errors
/// Returns 500 when the session store cannot be reached.
pub async fn authenticate(
    headers: &HeaderMap,
    pool: &PgPool,
    secret: &SecretString,
) -> Result<Option<SessionRecord>, StatusCode> {
    let Some(token) = extract_session_token(headers) else {
        return Ok(None);
    };
    let token_hash = hash_session_token(secret, &token);
    match storage::lookup_session(pool, &token_hash).await {
        Ok(record) => Ok(record),
        Err(err) => {
            error!("Failed to lookup session: {err}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("super-secret")
    }

    #[test]
    fn test_generate_session_token_is_random() {
        let first = generate_session_token();
        let second = generate_session_token();
        assert_ne!(first, second);
        // 32 bytes, base64url without padding
        assert_eq!(first.len(), 43);
    }

    #[test]
    fn test_hash_session_token_is_keyed() {
        let token = generate_session_token();
        let hash = hash_session_token(&secret(), &token);
        assert_eq!(hash.len(), 32);
        assert_eq!(hash, hash_session_token(&secret(), &token));
        assert_ne!(hash, hash_session_token(&SecretString::from("other"), &token));
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc123").unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("gatehouse_session=abc123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_clear_session_cookie_expires_immediately() {
        let cookie = clear_session_cookie();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("gatehouse_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_extract_session_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; gatehouse_session=tok123; lang=en"),
        );
        assert_eq!(extract_session_token(&headers), Some("tok123".to_string()));
    }

    #[test]
    fn test_extract_session_token_missing() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(extract_session_token(&headers), None);
    }

    #[test]
    fn test_extract_session_token_skips_malformed_segments() {
        // A flag-style segment without '=' must not end the scan early
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("junk; gatehouse_session=tok123"),
        );
        assert_eq!(extract_session_token(&headers), Some("tok123".to_string()));

        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("Secure; theme=dark; gatehouse_session=tok456; HttpOnly"),
        );
        assert_eq!(extract_session_token(&headers), Some("tok456".to_string()));
    }

    #[test]
    fn test_extract_session_token_empty_value() {
        // A cleared cookie round-tripping back should not count as a session
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("gatehouse_session="));
        assert_eq!(extract_session_token(&headers), None);
    }
}
