//! The request pipeline every API call passes through.
//!
//! An SDK call becomes a [`Request`], travels through an ordered list of
//! [`Middleware`] and reaches the [`Transport`]. Each middleware receives the
//! request and a [`Next`] handle to the rest of the chain.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ SDK Request Pipeline                                         │
//! │                                                              │
//! │  ┌───────────────────┐                                       │
//! │  │ Your Code         │  client.cards().get(42)               │
//! │  └─────────┬─────────┘                                       │
//! │            ▼                                                 │
//! │  ┌───────────────────┐                                       │
//! │  │ Your Middleware   │  optional, outermost                  │
//! │  └─────────┬─────────┘                                       │
//! │            ▼                                                 │
//! │  ┌───────────────────┐                                       │
//! │  │ RetryInterceptor  │  backoff, 429 / 5xx / network retries │
//! │  └─────────┬─────────┘                                       │
//! │            ▼                                                 │
//! │  ┌───────────────────┐                                       │
//! │  │ AuthInterceptor   │  Bearer token, 401 → Unauthorized     │
//! │  └─────────┬─────────┘                                       │
//! │            ▼                                                 │
//! │  ┌───────────────────┐                                       │
//! │  │ Transport         │  HTTP call                            │
//! │  └───────────────────┘                                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Because the retry interceptor sits outside the auth interceptor, every
//! attempt is re-authenticated and a 401 is never retried.
//!
//! ## Writing Middleware
//!
//! ```rust
//! use kaiten::middleware::{Middleware, Next, Request, ResponseFuture};
//! use std::time::Instant;
//!
//! struct Timing;
//!
//! impl Middleware for Timing {
//!     fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> ResponseFuture<'a> {
//!         Box::pin(async move {
//!             let started = Instant::now();
//!             let operation = req.operation().to_string();
//!             let result = next.call(req).await;
//!             println!("{operation} took {:?}", started.elapsed());
//!             result
//!         })
//!     }
//! }
//! ```
//!
//! `next` is `Copy`: a middleware may call it several times, which is how the
//! retry interceptor re-issues a request.

mod auth;
mod retry;

use std::{fmt, future::Future, pin::Pin, sync::Arc};

use bytes::Bytes;
use reqwest::{
    Method, StatusCode,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use url::Url;

pub use auth::AuthInterceptor;
pub use retry::RetryInterceptor;

use crate::{Error, transport::Transport};

/// Type alias for the response future returned by middleware handlers.
pub type ResponseFuture<'a> = Pin<Box<dyn Future<Output = Result<Response, Error>> + Send + 'a>>;

/// Intercepts requests on their way to the transport.
///
/// A middleware can:
/// - modify the request before calling `next`
/// - inspect or replace the response after `next` returns
/// - short-circuit by returning without calling `next`
/// - call `next` more than once
pub trait Middleware: Send + Sync + 'static {
    /// Handles a request. Call `next.call(req)` to continue the chain.
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> ResponseFuture<'a>;
}

/// An outbound HTTP request.
///
/// The body is held as [`Bytes`], so cloning a request for another attempt
/// is cheap and the body is replayed byte-for-byte.
#[derive(Debug, Clone)]
pub struct Request {
    operation: String,
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a request without a body.
    ///
    /// `operation` is a short name for logs, e.g. `"cards.get"`.
    pub fn new(operation: impl Into<String>, method: Method, url: Url) -> Self {
        Self { operation: operation.into(), method, url, headers: HeaderMap::new(), body: None }
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a header, replacing any previous value.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Returns the operation name.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the absolute URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns mutable access to the headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Returns the body, if any.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.method, self.url, self.operation)
    }
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Creates an empty response with the given status.
    pub fn new(status: StatusCode) -> Self {
        Self { status, headers: HeaderMap::new(), body: Bytes::new() }
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a header, replacing any previous value.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Replaces all headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Returns the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns mutable access to the headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Returns the body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consumes the response, returning the body.
    pub fn into_body(self) -> Bytes {
        self.body
    }
}

/// The rest of the chain after the current middleware.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    middlewares: &'a [Arc<dyn Middleware>],
    transport: &'a dyn Transport,
}

impl<'a> Next<'a> {
    /// Creates a chain over `middlewares` ending at `transport`.
    pub fn new(middlewares: &'a [Arc<dyn Middleware>], transport: &'a dyn Transport) -> Self {
        Self { middlewares, transport }
    }

    /// Passes the request to the next middleware, or to the transport at
    /// the end of the chain.
    pub fn call(self, req: Request) -> ResponseFuture<'a> {
        match self.middlewares.split_first() {
            Some((current, rest)) => current.handle(req, Next::new(rest, self.transport)),
            None => self.transport.send(req),
        }
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").field("remaining", &self.middlewares.len()).finish_non_exhaustive()
    }
}

/// An ordered list of middleware; the first added is the outermost.
#[derive(Clone, Default)]
pub struct MiddlewareStack {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware inside the ones already present.
    pub fn push(&mut self, middleware: impl Middleware) {
        self.middlewares.push(Arc::new(middleware));
    }

    /// Appends an already shared middleware.
    pub fn push_arc(&mut self, middleware: Arc<dyn Middleware>) {
        self.middlewares.push(middleware);
    }

    /// Appends a middleware (builder pattern).
    #[must_use]
    pub fn with(mut self, middleware: impl Middleware) -> Self {
        self.push(middleware);
        self
    }

    /// Checks if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Returns the number of middlewares in the stack.
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Runs a request through every middleware and then `transport`.
    pub async fn process(&self, req: Request, transport: &dyn Transport) -> Result<Response, Error> {
        Next::new(&self.middlewares, transport).call(req).await
    }
}

impl fmt::Debug for MiddlewareStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareStack").field("len", &self.middlewares.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::testing::MockTransport;

    fn get(path: &str) -> Request {
        let url = Url::parse("https://team.kaiten.ru/api/latest/").unwrap().join(path).unwrap();
        Request::new("test", Method::GET, url)
    }

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Middleware for Recorder {
        fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> ResponseFuture<'a> {
            Box::pin(async move {
                self.log.lock().push(self.name);
                next.call(req).await
            })
        }
    }

    #[test]
    fn test_request_accessors() {
        let req = get("cards/1")
            .with_body(Bytes::from_static(b"{}"))
            .header(HeaderName::from_static("x-custom"), HeaderValue::from_static("v"));
        assert_eq!(req.operation(), "test");
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.url().as_str(), "https://team.kaiten.ru/api/latest/cards/1");
        assert_eq!(req.headers().get("x-custom").unwrap(), "v");
        assert_eq!(req.body().unwrap().as_ref(), b"{}");
    }

    #[test]
    fn test_request_display() {
        let req = get("spaces");
        assert_eq!(req.to_string(), "GET https://team.kaiten.ru/api/latest/spaces (test)");
    }

    #[test]
    fn test_response_builder() {
        let resp = Response::new(StatusCode::CREATED)
            .with_body("created")
            .with_header(HeaderName::from_static("x-id"), HeaderValue::from_static("9"));
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers().get("x-id").unwrap(), "9");
        assert_eq!(resp.into_body().as_ref(), b"created");
    }

    #[test]
    fn test_stack_len() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let stack = MiddlewareStack::new()
            .with(Recorder { name: "a", log: log.clone() })
            .with(Recorder { name: "b", log });
        assert_eq!(stack.len(), 2);
        assert!(!stack.is_empty());
        assert!(MiddlewareStack::new().is_empty());
    }

    #[tokio::test]
    async fn test_empty_stack_reaches_transport() {
        let transport = MockTransport::returning(StatusCode::OK, "done");
        let resp = MiddlewareStack::new().process(get("spaces"), &transport).await.unwrap();
        assert_eq!(resp.body().as_ref(), b"done");
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_stack_runs_in_insertion_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let stack = MiddlewareStack::new()
            .with(Recorder { name: "outer", log: log.clone() })
            .with(Recorder { name: "inner", log: log.clone() });
        let transport = MockTransport::returning(StatusCode::OK, "");

        stack.process(get("spaces"), &transport).await.unwrap();
        assert_eq!(*log.lock(), vec!["outer", "inner"]);
    }

    #[tokio::test]
    async fn test_middleware_modifies_request() {
        struct AddHeader;

        impl Middleware for AddHeader {
            fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> ResponseFuture<'a> {
                let req = req.header(HeaderName::from_static("x-added"), HeaderValue::from_static("1"));
                next.call(req)
            }
        }

        let transport = MockTransport::returning(StatusCode::OK, "");
        MiddlewareStack::new().with(AddHeader).process(get("spaces"), &transport).await.unwrap();
        let recorded = transport.recorded_requests();
        assert_eq!(recorded[0].headers().get("x-added").unwrap(), "1");
    }

    #[tokio::test]
    async fn test_middleware_short_circuit() {
        struct Deny;

        impl Middleware for Deny {
            fn handle<'a>(&'a self, _req: Request, _next: Next<'a>) -> ResponseFuture<'a> {
                Box::pin(async { Err(Error::Unauthorized) })
            }
        }

        let transport = MockTransport::returning(StatusCode::OK, "");
        let err = MiddlewareStack::new().with(Deny).process(get("spaces"), &transport).await;
        assert!(matches!(err, Err(Error::Unauthorized)));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_next_can_be_called_twice() {
        struct Twice;

        impl Middleware for Twice {
            fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> ResponseFuture<'a> {
                Box::pin(async move {
                    next.call(req.clone()).await?;
                    next.call(req).await
                })
            }
        }

        let transport = MockTransport::returning(StatusCode::OK, "");
        MiddlewareStack::new().with(Twice).process(get("spaces"), &transport).await.unwrap();
        assert_eq!(transport.call_count(), 2);
    }
}
