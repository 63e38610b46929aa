//! The bearer token credential.

use std::fmt;
use std::sync::Arc;

use reqwest::header::HeaderValue;

use crate::Error;

/// An opaque Kaiten API token.
///
/// Validated once at construction. The rendered `Authorization` header value
/// is computed up front and flagged sensitive, so retries reuse it without
/// reformatting and HTTP debug output hides it.
#[derive(Clone)]
pub struct Credential {
    token: Arc<str>,
    header: HeaderValue,
}

impl Credential {
    /// Creates a credential from a raw API token.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfiguration`] with key `"token"` when the
    /// token is empty or contains characters that cannot appear in an HTTP
    /// header.
    pub fn new(token: impl AsRef<str>) -> Result<Self, Error> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            return Err(Error::missing_configuration("token"));
        }
        let mut header = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::missing_configuration("token"))?;
        header.set_sensitive(true);
        Ok(Self { token: Arc::from(token), header })
    }

    /// Returns the raw token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the `Authorization` header value, `Bearer <token>`.
    pub(crate) fn header_value(&self) -> &HeaderValue {
        &self.header
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&format_args!("[REDACTED]")).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_header_value() {
        let credential = Credential::new("abc123").unwrap();
        assert_eq!(credential.token(), "abc123");
        assert_eq!(credential.header_value().to_str().unwrap(), "Bearer abc123");
        assert!(credential.header_value().is_sensitive());
    }

    #[test]
    fn test_trims_whitespace() {
        let credential = Credential::new("  abc123\n").unwrap();
        assert_eq!(credential.token(), "abc123");
    }

    #[test]
    fn test_empty_token_is_missing_configuration() {
        for raw in ["", "   "] {
            let err = Credential::new(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MissingConfiguration);
            assert!(matches!(err, Error::MissingConfiguration { ref key } if key == "token"));
        }
    }

    #[test]
    fn test_control_characters_rejected() {
        let err = Credential::new("abc\u{7f}def").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingConfiguration);
    }

    #[test]
    fn test_debug_redacts_token() {
        let credential = Credential::new("super-secret").unwrap();
        let debug = format!("{credential:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
