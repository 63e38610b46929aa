//! The classified error returned by every SDK operation.

use std::time::Duration;

use super::{ErrorKind, TransportError};

/// Longest response body kept inside an error.
const MAX_ERROR_BODY_CHARS: usize = 1024;

/// The error type for Kaiten SDK operations.
///
/// Exactly one variant is produced per failed call. Retries happen inside
/// the SDK and are invisible here except through the variant finally
/// reported once the retry budget is spent.
///
/// ## Example
///
/// ```rust
/// use kaiten::{Error, ErrorKind};
/// use std::time::Duration;
///
/// fn describe(err: &Error) -> String {
///     match err {
///         Error::RateLimited { retry_after: Some(delay) } => format!("wait {delay:?}"),
///         Error::NotFound { resource, id } => format!("{resource} {id} is gone"),
///         other if other.is_retriable() => "transient, try again".to_string(),
///         other => other.to_string(),
///     }
/// }
///
/// let err = Error::RateLimited { retry_after: Some(Duration::from_secs(3)) };
/// assert_eq!(err.kind(), ErrorKind::RateLimited);
/// assert_eq!(describe(&err), "wait 3s");
/// ```
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A required configuration value is missing.
    #[error("missing required configuration: {key}")]
    MissingConfiguration {
        /// The configuration key (e.g. `KAITEN_URL`).
        key: String,
    },

    /// The configured base URL is not usable.
    #[error("invalid URL: {value}")]
    InvalidUrl {
        /// The rejected value.
        value: String,
    },

    /// The API returned 401 Unauthorized.
    #[error("unauthorized: check your API token")]
    Unauthorized,

    /// The requested resource was not found.
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// Resource name, e.g. `"card"`.
        resource: &'static str,
        /// The identifier that was looked up.
        id: i64,
    },

    /// The API rate limit was exceeded and retries were exhausted.
    #[error("rate limited{}", fmt_retry_after(.retry_after))]
    RateLimited {
        /// The delay the server asked for, if known.
        retry_after: Option<Duration>,
    },

    /// The server returned a 5xx status and retries were exhausted.
    #[error("server error {status_code}{}", fmt_body(.body))]
    ServerError {
        /// The HTTP status code.
        status_code: u16,
        /// The response body, if captured.
        body: Option<String>,
    },

    /// The request failed below the HTTP layer.
    #[error("network error: {cause}")]
    NetworkError {
        /// The transport failure.
        #[source]
        cause: TransportError,
    },

    /// A response body did not match the expected schema.
    #[error("decoding error: {cause}")]
    DecodingError {
        /// The JSON error.
        #[source]
        cause: serde_json::Error,
    },

    /// The API returned a status the operation does not model.
    #[error("unexpected HTTP response: {status_code}{}", fmt_body(.body))]
    UnexpectedResponse {
        /// The HTTP status code.
        status_code: u16,
        /// The response body, if any.
        body: Option<String>,
    },
}

impl Error {
    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingConfiguration { .. } => ErrorKind::MissingConfiguration,
            Error::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            Error::Unauthorized => ErrorKind::Unauthorized,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::RateLimited { .. } => ErrorKind::RateLimited,
            Error::ServerError { .. } => ErrorKind::ServerError,
            Error::NetworkError { .. } => ErrorKind::NetworkError,
            Error::DecodingError { .. } => ErrorKind::DecodingError,
            Error::UnexpectedResponse { .. } => ErrorKind::UnexpectedResponse,
        }
    }

    /// Returns `true` if this error is generally safe to retry.
    ///
    /// Equivalent to `self.kind().is_retriable()`.
    #[inline]
    pub fn is_retriable(&self) -> bool {
        self.kind().is_retriable()
    }

    /// Returns the server-requested delay for rate limit errors.
    #[inline]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Error::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// Returns the HTTP status code that produced this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Unauthorized => Some(401),
            Error::NotFound { .. } => Some(404),
            Error::RateLimited { .. } => Some(429),
            Error::ServerError { status_code, .. }
            | Error::UnexpectedResponse { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    // Convenience constructors

    /// Creates a missing configuration error.
    pub fn missing_configuration(key: impl Into<String>) -> Self {
        Error::MissingConfiguration { key: key.into() }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(value: impl Into<String>) -> Self {
        Error::InvalidUrl { value: value.into() }
    }

    /// Creates an unexpected response error, keeping at most 1024
    /// characters of a non-empty body.
    pub fn unexpected_response(status_code: u16, body: &[u8]) -> Self {
        Error::UnexpectedResponse { status_code, body: body_text(body) }
    }
}

impl From<TransportError> for Error {
    fn from(cause: TransportError) -> Self {
        Error::NetworkError { cause }
    }
}

impl From<serde_json::Error> for Error {
    fn from(cause: serde_json::Error) -> Self {
        Error::DecodingError { cause }
    }
}

fn fmt_retry_after(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(delay) => format!(": retry after {}s", delay.as_secs()),
        None => ": retry later".to_string(),
    }
}

fn fmt_body(body: &Option<String>) -> String {
    body.as_deref().map(|b| format!(": {b}")).unwrap_or_default()
}

/// Lossy UTF-8 text of a body, `None` when blank.
pub(crate) fn body_text(body: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if text.chars().count() <= MAX_ERROR_BODY_CHARS {
        return Some(text.to_string());
    }
    let truncated: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
    Some(format!("{truncated}...(truncated)"))
}
