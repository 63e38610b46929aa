//! Client builder with typestate pattern.

use std::{marker::PhantomData, sync::Arc, time::Duration};

use url::Url;

use super::inner::ClientInner;
use crate::{
    Client, Credential, Error, RetryPolicy,
    middleware::{AuthInterceptor, Middleware, MiddlewareStack, RetryInterceptor},
    transport::{HttpTransport, Transport},
};

/// Typestate marker: base URL not yet provided.
pub struct NoUrl;

/// Typestate marker: base URL provided.
pub struct HasUrl;

/// Typestate marker: token not yet provided.
pub struct NoToken;

/// Typestate marker: token provided.
pub struct HasToken;

/// Builder for [`Client`].
///
/// `build()` only exists once both a URL and a token have been supplied,
/// so forgetting either is a compile error:
///
/// ```compile_fail
/// use kaiten::Client;
///
/// let client = Client::builder()
///     .url("https://team.kaiten.ru/api/latest")
///     .build(); // no token
/// ```
///
/// ## Example
///
/// ```rust
/// use kaiten::{Client, RetryPolicy};
/// use std::time::Duration;
///
/// let client = Client::builder()
///     .url("https://team.kaiten.ru/api/latest")
///     .token("your-api-token")
///     .retry_policy(RetryPolicy::new().with_max_attempts(5))
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// assert_eq!(client.base_url().as_str(), "https://team.kaiten.ru/api/latest/");
/// # Ok::<(), kaiten::Error>(())
/// ```
pub struct ClientBuilder<UrlState, TokenState> {
    url: Option<String>,
    token: Option<String>,
    retry_policy: RetryPolicy,
    timeout: Duration,
    transport: Option<Arc<dyn Transport>>,
    middleware: MiddlewareStack,
    _state: PhantomData<(UrlState, TokenState)>,
}

impl ClientBuilder<NoUrl, NoToken> {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            url: None,
            token: None,
            retry_policy: RetryPolicy::default(),
            timeout: crate::transport::DEFAULT_TIMEOUT,
            transport: None,
            middleware: MiddlewareStack::new(),
            _state: PhantomData,
        }
    }
}

impl Default for ClientBuilder<NoUrl, NoToken> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U, T> ClientBuilder<U, T> {
    fn into_state<U2, T2>(self) -> ClientBuilder<U2, T2> {
        ClientBuilder {
            url: self.url,
            token: self.token,
            retry_policy: self.retry_policy,
            timeout: self.timeout,
            transport: self.transport,
            middleware: self.middleware,
            _state: PhantomData,
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Sets the per-request timeout of the default HTTP transport.
    ///
    /// Ignored when a custom transport is supplied.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the HTTP transport.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Adds a middleware outside the retry and auth interceptors.
    ///
    /// Middleware added first runs first.
    #[must_use]
    pub fn middleware(mut self, middleware: impl Middleware) -> Self {
        self.middleware.push(middleware);
        self
    }
}

impl<T> ClientBuilder<NoUrl, T> {
    /// Sets the API base URL, e.g. `https://team.kaiten.ru/api/latest`.
    pub fn url(mut self, url: impl Into<String>) -> ClientBuilder<HasUrl, T> {
        self.url = Some(url.into());
        self.into_state()
    }
}

impl<U> ClientBuilder<U, NoToken> {
    /// Sets the API token.
    pub fn token(mut self, token: impl Into<String>) -> ClientBuilder<U, HasToken> {
        self.token = Some(token.into());
        self.into_state()
    }
}

impl ClientBuilder<HasUrl, HasToken> {
    /// Validates the configuration and builds the client.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUrl`] if the URL does not parse, is not `http(s)`
    ///   or cannot serve as a base for relative paths
    /// - [`Error::MissingConfiguration`] with key `"token"` if the token is
    ///   empty
    /// - [`Error::NetworkError`] if the default HTTP transport cannot be
    ///   initialised
    pub fn build(self) -> Result<Client, Error> {
        let base_url = parse_base_url(self.url.as_deref().unwrap_or_default())?;
        let credential = Credential::new(self.token.as_deref().unwrap_or_default())?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::builder().timeout(self.timeout).build()?),
        };

        let mut stack = self.middleware;
        stack.push(RetryInterceptor::new(self.retry_policy.clone()));
        stack.push(AuthInterceptor::new(credential));

        tracing::debug!(
            base_url = %base_url,
            max_attempts = self.retry_policy.max_attempts,
            middleware = stack.len(),
            "kaiten client built"
        );

        Ok(Client::from_inner(ClientInner {
            base_url,
            retry_policy: self.retry_policy,
            stack,
            transport,
        }))
    }
}

impl<U, T> std::fmt::Debug for ClientBuilder<U, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("retry_policy", &self.retry_policy)
            .field("timeout", &self.timeout)
            .field("custom_transport", &self.transport.is_some())
            .field("middleware", &self.middleware)
            .finish()
    }
}

/// Parses and normalises a base URL so that relative paths join beneath it.
fn parse_base_url(raw: &str) -> Result<Url, Error> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).map_err(|_| Error::invalid_url(raw))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_url(raw));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
