//! The boundary between the middleware chain and the network.
//!
//! A [`Transport`] takes a fully prepared [`Request`] and returns a fully
//! buffered [`Response`], or [`Error::NetworkError`] when no HTTP response
//! was obtained. It never interprets status codes; that is the job of the
//! interceptors and the client.
//!
//! - [`HttpTransport`]: the default, backed by `reqwest`
//! - [`MockTransport`](crate::testing::MockTransport): scripted responses
//!   for tests
//!
//! Custom transports plug in through
//! [`ClientBuilder::transport`](crate::ClientBuilder::transport).

mod http;

use async_trait::async_trait;

pub use http::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, HttpTransport, HttpTransportBuilder};

use crate::Error;
use crate::middleware::{Request, Response};

/// Sends a request and buffers the response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NetworkError`] if the request did not produce an HTTP
    /// response. Any HTTP status, including 4xx and 5xx, is a successful
    /// send.
    async fn send(&self, request: Request) -> Result<Response, Error>;
}
