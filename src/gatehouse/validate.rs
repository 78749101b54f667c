//! Form validation with structured, per-field error codes.

use regex::Regex;

pub const MAX_NAME_LEN: usize = 20;
pub const MAX_PASSWORD_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
}

impl Field {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Password => "Password",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Required,
    TooLong,
    NotAlphanumeric,
    InvalidEmail,
}

/// One validation failure, tied to the field that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: ErrorKind,
}

impl FieldError {
    #[must_use]
    pub const fn new(field: Field, kind: ErrorKind) -> Self {
        Self { field, kind }
    }

    /// User-facing message rendered on the signup retry page.
    #[must_use]
    pub fn message(&self) -> String {
        match self.kind {
            ErrorKind::Required => format!("{} is required.", self.field.label()),
            ErrorKind::TooLong => format!("{} is too long.", self.field.label()),
            ErrorKind::NotAlphanumeric => {
                format!("{} must be alphanumeric.", self.field.label())
            }
            ErrorKind::InvalidEmail => format!("{} is not a valid email.", self.field.label()),
        }
    }
}

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

fn check_name(name: &str) -> Option<FieldError> {
    if name.is_empty() {
        return Some(FieldError::new(Field::Name, ErrorKind::Required));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Some(FieldError::new(Field::Name, ErrorKind::TooLong));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some(FieldError::new(Field::Name, ErrorKind::NotAlphanumeric));
    }
    None
}

fn check_email(email: &str) -> Option<FieldError> {
    if email.is_empty() {
        return Some(FieldError::new(Field::Email, ErrorKind::Required));
    }
    if !valid_email(email) {
        return Some(FieldError::new(Field::Email, ErrorKind::InvalidEmail));
    }
    None
}

fn check_password(password: &str) -> Option<FieldError> {
    if password.is_empty() {
        return Some(FieldError::new(Field::Password, ErrorKind::Required));
    }
    // Limits count characters, not bytes, so multibyte input is not penalized
    if password.chars().count() > MAX_PASSWORD_LEN {
        return Some(FieldError::new(Field::Password, ErrorKind::TooLong));
    }
    None
}

/// Validate a signup submission, collecting every failure so the retry page
/// can show one hint per field.
///
/// # Errors
/// Returns all field errors found, in field order.
pub fn signup(name: &str, email: &str, password: &str) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = [
        check_name(name),
        check_email(email),
        check_password(password),
    ]
    .into_iter()
    .flatten()
    .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a login submission, stopping at the first failure.
///
/// The caller shows one generic message no matter which field failed, so
/// collecting more than the first error would leak nothing but effort.
///
/// # Errors
/// Returns the first field error found.
pub fn login(email: &str, password: &str) -> Result<(), FieldError> {
    if let Some(err) = check_email(email) {
        return Err(err);
    }
    if let Some(err) = check_password(password) {
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_signup() {
        assert!(signup("alice", "a@example.com", "pw123").is_ok());
    }

    #[test]
    fn test_signup_collects_all_missing_fields() {
        let errors = signup("", "", "").unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], FieldError::new(Field::Name, ErrorKind::Required));
        assert_eq!(
            errors[1],
            FieldError::new(Field::Email, ErrorKind::Required)
        );
        assert_eq!(
            errors[2],
            FieldError::new(Field::Password, ErrorKind::Required)
        );
    }

    #[test]
    fn test_signup_name_too_long() {
        let name = "a".repeat(21);
        let errors = signup(&name, "a@example.com", "pw123").unwrap_err();
        assert_eq!(errors, vec![FieldError::new(Field::Name, ErrorKind::TooLong)]);
    }

    #[test]
    fn test_signup_name_at_limit_is_ok() {
        let name = "a".repeat(20);
        assert!(signup(&name, "a@example.com", "pw123").is_ok());
    }

    #[test]
    fn test_signup_name_not_alphanumeric() {
        let errors = signup("alice smith", "a@example.com", "pw123").unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new(Field::Name, ErrorKind::NotAlphanumeric)]
        );
    }

    #[test]
    fn test_signup_bad_email() {
        let errors = signup("alice", "not-an-email", "pw123").unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new(Field::Email, ErrorKind::InvalidEmail)]
        );
    }

    #[test]
    fn test_signup_password_too_long() {
        let password = "p".repeat(21);
        let errors = signup("alice", "a@example.com", &password).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new(Field::Password, ErrorKind::TooLong)]
        );
    }

    #[test]
    fn test_signup_multibyte_password_within_limit() {
        // 15 characters, 30 bytes: length is counted in characters
        let password = "é".repeat(15);
        assert!(signup("alice", "a@example.com", &password).is_ok());

        let password = "é".repeat(21);
        let errors = signup("alice", "a@example.com", &password).unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new(Field::Password, ErrorKind::TooLong)]
        );
    }

    #[test]
    fn test_signup_short_multibyte_name_is_not_alphanumeric() {
        // 12 characters but 24 bytes: must fail the alphanumeric rule,
        // not the length rule
        let name = "é".repeat(12);
        let errors = signup(&name, "a@example.com", "pw123").unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError::new(Field::Name, ErrorKind::NotAlphanumeric)]
        );
    }

    #[test]
    fn test_login_stops_at_first_error() {
        // Both fields are empty but only the email error is reported
        let err = login("", "").unwrap_err();
        assert_eq!(err, FieldError::new(Field::Email, ErrorKind::Required));
    }

    #[test]
    fn test_login_valid() {
        assert!(login("a@example.com", "pw123").is_ok());
    }

    #[test]
    fn test_login_rejects_long_password() {
        let password = "p".repeat(21);
        let err = login("a@example.com", &password).unwrap_err();
        assert_eq!(err, FieldError::new(Field::Password, ErrorKind::TooLong));
    }

    #[test]
    fn test_valid_email_samples() {
        assert!(valid_email("a@example.com"));
        assert!(valid_email("a.b+c@sub.example.org"));
        assert!(!valid_email("a@example"));
        assert!(!valid_email("a b@example.com"));
        assert!(!valid_email("@example.com"));
    }

    #[test]
    fn test_error_messages_name_the_field() {
        assert_eq!(
            FieldError::new(Field::Name, ErrorKind::Required).message(),
            "Name is required."
        );
        assert_eq!(
            FieldError::new(Field::Email, ErrorKind::InvalidEmail).message(),
            "Email is not a valid email."
        );
        assert_eq!(
            FieldError::new(Field::Password, ErrorKind::TooLong).message(),
            "Password is too long."
        );
    }
}
