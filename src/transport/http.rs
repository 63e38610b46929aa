//! `reqwest`-backed transport.

use std::time::Duration;

use async_trait::async_trait;

use super::Transport;
use crate::Error;
use crate::error::{TransportError, TransportErrorKind};
use crate::middleware::{Request, Response};
use crate::user_agent;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP transport over a pooled [`reqwest::Client`].
///
/// Timeouts surface as [`TransportErrorKind::Timeout`] and connection
/// failures as [`TransportErrorKind::Connect`] or
/// [`TransportErrorKind::ConnectionLost`], which the retry policy treats as
/// transient.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with default timeouts.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    /// Creates a builder.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, Error> {
        let mut builder = self
            .client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(TransportError::from)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(TransportError::from)?;

        tracing::trace!(
            operation = %request.operation(),
            status = status.as_u16(),
            bytes = body.len(),
            "received response"
        );
        Ok(Response::new(status).with_headers(headers).with_body(body))
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportBuilder {
    timeout: Duration,
    connect_timeout: Duration,
    pool_idle_timeout: Option<Duration>,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_idle_timeout: Some(Duration::from_secs(90)),
        }
    }
}

impl HttpTransportBuilder {
    /// Sets the total per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets how long idle pooled connections are kept; `None` keeps them
    /// indefinitely.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Builds the transport.
    ///
    /// # Errors
    ///
    /// [`Error::NetworkError`] if the HTTP client (e.g. its TLS backend)
    /// cannot be initialised.
    pub fn build(self) -> Result<HttpTransport, Error> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .pool_idle_timeout(self.pool_idle_timeout)
            .user_agent(user_agent::user_agent())
            .build()
            .map_err(|err| {
                TransportError::new(TransportErrorKind::Request, "failed to build HTTP client")
                    .with_source(err)
            })?;
        Ok(HttpTransport { client })
    }
}
