//! A scripted, recording transport.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use reqwest::StatusCode;

use crate::Error;
use crate::middleware::{Request, Response};
use crate::transport::Transport;

type Handler = dyn Fn(&Request, usize) -> Result<Response, Error> + Send + Sync;

/// A transport answering from a closure instead of the network.
///
/// The closure receives each request together with its 0-based call index.
/// Clones share the script and the request log, so one clone can be handed
/// to the client while another is kept for assertions.
///
/// ## Example
///
/// ```rust
/// use kaiten::error::TransportError;
/// use kaiten::middleware::Response;
/// use kaiten::testing::MockTransport;
/// use reqwest::StatusCode;
///
/// // Fails with a timeout once, then succeeds.
/// let transport = MockTransport::new(|_request, call| match call {
///     0 => Err(TransportError::timeout("simulated").into()),
///     _ => Ok(Response::new(StatusCode::OK).with_body("{}")),
/// });
/// assert_eq!(transport.call_count(), 0);
/// ```
#[derive(Clone)]
pub struct MockTransport {
    handler: Arc<Handler>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl MockTransport {
    /// Creates a transport driven by `handler`.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&Request, usize) -> Result<Response, Error> + Send + Sync + 'static,
    {
        Self { handler: Arc::new(handler), requests: Arc::new(Mutex::new(Vec::new())) }
    }

    /// Returns the same status and body for every call.
    pub fn returning(status: StatusCode, body: impl Into<Bytes>) -> Self {
        let response = Response::new(status).with_body(body);
        Self::new(move |_, _| Ok(response.clone()))
    }

    /// Returns `responses` in order, repeating the last one once the list
    /// is exhausted. An empty list answers 200 with an empty body.
    pub fn sequence(responses: Vec<Response>) -> Self {
        Self::new(move |_, call| {
            let response = responses
                .get(call)
                .or_else(|| responses.last())
                .cloned()
                .unwrap_or_else(|| Response::new(StatusCode::OK));
            Ok(response)
        })
    }

    /// Returns every request received so far, in order.
    pub fn recorded_requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<Request> {
        self.requests.lock().last().cloned()
    }

    /// Returns the number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, Error> {
        let call = {
            let mut requests = self.requests.lock();
            requests.push(request.clone());
            requests.len() - 1
        };
        (self.handler)(&request, call)
    }
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransport").field("calls", &self.call_count()).finish_non_exhaustive()
    }
}
