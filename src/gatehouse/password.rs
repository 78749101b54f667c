//! Password hashing with Argon2 and per-record random salts.

use argon2::password_hash::SaltString;
use argon2::Argon2;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;

fn salt() -> Result<SaltString, argon2::password_hash::Error> {
    use rand::RngCore;
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    SaltString::encode_b64(&bytes)
}

/// Hash a plaintext password into a PHC string for storage.
///
/// # Errors
/// Returns an error if salt encoding or hashing fails.
pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    Argon2::default()
        .hash_password(password.as_bytes(), &salt()?)
        .map(|h| h.to_string())
}

/// Verify a plaintext password against a stored PHC string.
/// Malformed stored hashes verify as false rather than erroring.
#[must_use]
pub fn verify(password: &str, hashword: &str) -> bool {
    PasswordHash::new(hashword)
        .ok()
        .as_ref()
        .map(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), hash)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_round_trip() {
        let hashed = hash("pw123").unwrap();
        assert!(verify("pw123", &hashed));
        assert!(!verify("pw124", &hashed));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hashed = hash("pw123").unwrap();
        assert!(!hashed.contains("pw123"));
        assert!(hashed.starts_with("$argon2"));
    }

    #[test]
    fn test_hashes_are_salted() {
        // Same password, different salts, different PHC strings
        let first = hash("pw123").unwrap();
        let second = hash("pw123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_malformed_hash() {
        assert!(!verify("pw123", "not-a-phc-string"));
        assert!(!verify("pw123", ""));
    }
}
