//! Access credentials for the target ingestion API.

use std::fmt;

/// Decrypted credentials. Created once per process on first need and held
/// for the remainder of the process's life; never rotated.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret_key() {
        let credentials = Credentials {
            access_key: "AKIAEXAMPLE".to_string(),
            secret_key: "super-secret".to_string(),
        };

        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("AKIAEXAMPLE"));
        assert!(!rendered.contains("super-secret"));
    }
}
