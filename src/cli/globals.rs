use secrecy::SecretString;

#[derive(Clone)]
pub struct GlobalArgs {
    pub session_secret: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(session_secret: SecretString) -> Self {
        Self { session_secret }
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("session_secret", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(SecretString::from("super-secret"));
        assert_eq!(args.session_secret.expose_secret(), "super-secret");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let args = GlobalArgs::new(SecretString::from("super-secret"));
        let rendered = format!("{args:?}");
        assert!(rendered.contains("***"));
        assert!(!rendered.contains("super-secret"));
    }
}
