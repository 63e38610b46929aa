//! Internal client implementation: URL building, dispatch through the
//! middleware chain and classification of the final response.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::middleware::{MiddlewareStack, Request, Response};
use crate::transport::Transport;
use crate::{Error, RetryPolicy};

fn application_json() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

/// The resource a call addresses, used to turn a 404 into
/// [`Error::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Lookup {
    pub resource: &'static str,
    pub id: i64,
}

impl Lookup {
    pub(crate) fn new(resource: &'static str, id: i64) -> Self {
        Self { resource, id }
    }
}

/// Shared state behind every [`Client`](crate::Client) clone.
pub(crate) struct ClientInner {
    /// Base URL, always ending in `/`.
    pub base_url: Url,

    /// Retry policy installed in the chain.
    pub retry_policy: RetryPolicy,

    /// User middleware, then retry, then auth.
    pub stack: MiddlewareStack,

    pub transport: Arc<dyn Transport>,
}

impl ClientInner {
    /// Builds a request for `path` relative to the base URL.
    pub(crate) fn request(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
    ) -> Result<Request, Error> {
        self.request_with_query(operation, method, path, &[])
    }

    pub(crate) fn request_with_query(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Request, Error> {
        let mut url = self.base_url.join(path).map_err(|_| {
            Error::invalid_url(format!("{}{path}", self.base_url))
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(Request::new(operation, method, url).header(ACCEPT, application_json()))
    }

    /// Attaches `body` as JSON.
    pub(crate) fn json_body<T: Serialize + ?Sized>(
        &self,
        req: Request,
        body: &T,
    ) -> Result<Request, Error> {
        let bytes = serde_json::to_vec(body)?;
        Ok(req.header(CONTENT_TYPE, application_json()).with_body(Bytes::from(bytes)))
    }

    async fn execute(&self, req: Request) -> Result<Response, Error> {
        self.stack.process(req, &*self.transport).await
    }

    /// Sends `req` and decodes a 2xx body as `R`.
    pub(crate) async fn send_json<R: DeserializeOwned>(
        &self,
        req: Request,
        lookup: Option<Lookup>,
    ) -> Result<R, Error> {
        let body = classify(self.execute(req).await?, lookup)?;
        decode(&body)
    }

    /// Sends `req`, ignoring any 2xx body.
    pub(crate) async fn send_unit(&self, req: Request, lookup: Option<Lookup>) -> Result<(), Error> {
        classify(self.execute(req).await?, lookup)?;
        Ok(())
    }
}

/// Maps a response that made it through the chain to its body or an error.
///
/// - 2xx: the body
/// - 404 with a lookup: [`Error::NotFound`]
/// - 401: [`Error::Unauthorized`]
/// - anything else: [`Error::UnexpectedResponse`]
pub(crate) fn classify(response: Response, lookup: Option<Lookup>) -> Result<Bytes, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.into_body());
    }
    match (status, lookup) {
        (StatusCode::NOT_FOUND, Some(Lookup { resource, id })) => {
            Err(Error::NotFound { resource, id })
        },
        (StatusCode::UNAUTHORIZED, _) => Err(Error::Unauthorized),
        _ => Err(Error::unexpected_response(status.as_u16(), response.body())),
    }
}

pub(crate) fn decode<R: DeserializeOwned>(body: &[u8]) -> Result<R, Error> {
    serde_json::from_slice(body).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::ErrorKind;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    fn response(status: u16, body: &'static str) -> Response {
        Response::new(StatusCode::from_u16(status).unwrap()).with_body(body)
    }

    #[test]
    fn test_success_returns_body() {
        let body = classify(response(200, r#"{"id":1}"#), None).unwrap();
        assert_eq!(decode::<Item>(&body).unwrap(), Item { id: 1 });
    }

    #[test]
    fn test_not_found_with_lookup() {
        let err = classify(response(404, ""), Some(Lookup::new("card", 42))).unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "card", id: 42 }));
    }

    #[test]
    fn test_not_found_without_lookup_is_unexpected() {
        let err = classify(response(404, "nope"), None).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedResponse { status_code: 404, body: Some(ref b) } if b == "nope"
        ));
    }

    #[test]
    fn test_unauthorized() {
        let err = classify(response(401, ""), Some(Lookup::new("card", 1))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_forbidden_is_unexpected_with_body() {
        let err = classify(response(403, r#"{"message":"forbidden"}"#), None).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse { status_code: 403, body: Some(_) }));
    }

    #[test]
    fn test_empty_error_body_is_none() {
        let err = classify(response(400, ""), None).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse { status_code: 400, body: None }));
    }

    #[test]
    fn test_decode_mismatch_is_decoding_error() {
        let err = decode::<Item>(br#"{"id":"x"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodingError);
        let err = decode::<Item>(b"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodingError);
    }
}
