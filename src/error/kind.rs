//! Error kind enumeration for categorizing SDK errors.

/// Categorization of SDK errors.
///
/// This enum mirrors the variants of [`Error`](crate::Error) without their
/// payloads, giving a stable `Copy` value to match on.
///
/// ## Retriable vs Non-Retriable
///
/// | ErrorKind              | Retriable | Action                         |
/// |------------------------|-----------|--------------------------------|
/// | `RateLimited`          | Yes       | Wait for `retry_after()`       |
/// | `ServerError`          | Yes       | Retry later with backoff       |
/// | `NetworkError`         | Yes       | Retry once connectivity is back|
/// | `Unauthorized`         | No        | Fix the API token              |
/// | `NotFound`             | No        | Resource doesn't exist         |
/// | `DecodingError`        | No        | SDK/API schema mismatch        |
/// | `UnexpectedResponse`   | No        | Inspect status and body        |
/// | `MissingConfiguration` | No        | Provide the named setting      |
/// | `InvalidUrl`           | No        | Fix the base URL               |
///
/// "Retriable" here describes the caller's perspective after the SDK has
/// already spent its own retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The API rejected the credential.
    ///
    /// HTTP: 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// The requested resource was not found.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// The API rate limit was exceeded.
    ///
    /// HTTP: 429 Too Many Requests
    #[error("rate limited")]
    RateLimited,

    /// The server failed to process the request.
    ///
    /// HTTP: 5xx
    #[error("server error")]
    ServerError,

    /// The request never produced an HTTP response.
    #[error("network error")]
    NetworkError,

    /// A response body did not match the expected shape.
    #[error("decoding error")]
    DecodingError,

    /// The API answered with a status the operation does not model.
    #[error("unexpected response")]
    UnexpectedResponse,

    /// A required configuration value was absent.
    #[error("missing configuration")]
    MissingConfiguration,

    /// The configured base URL could not be used.
    #[error("invalid URL")]
    InvalidUrl,
}

impl ErrorKind {
    /// Returns `true` if this error kind is generally safe to retry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kaiten::ErrorKind;
    ///
    /// assert!(ErrorKind::RateLimited.is_retriable());
    /// assert!(!ErrorKind::Unauthorized.is_retriable());
    /// ```
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ErrorKind::RateLimited | ErrorKind::ServerError | ErrorKind::NetworkError
        )
    }

    /// Returns the representative HTTP status code for this error kind.
    ///
    /// Kinds that never come from an HTTP response map to a gateway-style
    /// code so they can still be surfaced through an HTTP boundary.
    #[inline]
    pub fn http_status_code(&self) -> u16 {
        match self {
            ErrorKind::Unauthorized => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::RateLimited => 429,
            ErrorKind::ServerError => 500,
            ErrorKind::NetworkError => 502,
            ErrorKind::DecodingError | ErrorKind::UnexpectedResponse => 502,
            ErrorKind::MissingConfiguration | ErrorKind::InvalidUrl => 500,
        }
    }
}
