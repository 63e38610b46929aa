//! Transport-level failures: the request never produced an HTTP response.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Why a request failed below the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TransportErrorKind {
    /// The request or connection timed out.
    Timeout,
    /// No connection could be established (DNS failure, refused, unreachable).
    Connect,
    /// An established connection was reset, aborted or closed mid-exchange.
    ConnectionLost,
    /// The request could not be built or sent as specified.
    Request,
    /// The response body could not be read.
    Body,
    /// Any other transport failure.
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportErrorKind::Timeout => "timed out",
            TransportErrorKind::Connect => "connection failed",
            TransportErrorKind::ConnectionLost => "connection lost",
            TransportErrorKind::Request => "invalid request",
            TransportErrorKind::Body => "body error",
            TransportErrorKind::Other => "transport error",
        };
        f.write_str(name)
    }
}

/// A failure reported by the [`Transport`](crate::transport::Transport).
///
/// Whether it is worth retrying is decided by the retry policy
/// (see [`RetryPolicy::is_transient`](crate::RetryPolicy::is_transient)),
/// not by the error itself.
#[derive(Debug)]
pub struct TransportError {
    kind: TransportErrorKind,
    message: Cow<'static, str>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl TransportError {
    /// Creates a new transport error.
    pub fn new(kind: TransportErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self { kind, message: message.into(), source: None }
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    /// Creates a connection error.
    pub fn connect(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(TransportErrorKind::Connect, message)
    }

    /// Creates a connection-lost error.
    pub fn connection_lost(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(TransportErrorKind::ConnectionLost, message)
    }

    /// Sets the underlying error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the failure category.
    #[inline]
    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        let kind = io_kind(err.kind()).unwrap_or(TransportErrorKind::Other);
        TransportError::new(kind, err.to_string()).with_source(err)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if let Some(kind) = io_kind_in_chain(&err) {
            kind
        } else if err.is_builder() || err.is_redirect() {
            TransportErrorKind::Request
        } else if err.is_body() || err.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Other
        };
        TransportError::new(kind, err.to_string()).with_source(err)
    }
}

fn io_kind(kind: io::ErrorKind) -> Option<TransportErrorKind> {
    match kind {
        io::ErrorKind::TimedOut => Some(TransportErrorKind::Timeout),
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::NotConnected
        | io::ErrorKind::AddrNotAvailable => Some(TransportErrorKind::Connect),
        io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::UnexpectedEof => Some(TransportErrorKind::ConnectionLost),
        _ => None,
    }
}

/// Walks the source chain looking for an I/O error that names a
/// connectivity failure.
fn io_kind_in_chain(err: &(dyn StdError + 'static)) -> Option<TransportErrorKind> {
    let mut current = err.source();
    while let Some(cause) = current {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if let Some(kind) = io_kind(io_err.kind()) {
                return Some(kind);
            }
        }
        current = cause.source();
    }
    None
}
