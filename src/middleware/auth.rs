//! Bearer authentication and 401 detection.

use reqwest::{StatusCode, header::AUTHORIZATION};

use super::{Middleware, Next, Request, ResponseFuture};
use crate::{Credential, Error};

/// Attaches `Authorization: Bearer <token>` to every request and turns any
/// 401 response into [`Error::Unauthorized`].
///
/// The header is inserted, not appended, so a request carries it exactly
/// once however many times it passes through. Transport failures and every
/// other status pass through untouched.
#[derive(Debug, Clone)]
pub struct AuthInterceptor {
    credential: Credential,
}

impl AuthInterceptor {
    /// Creates an interceptor for `credential`.
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }
}

impl Middleware for AuthInterceptor {
    fn handle<'a>(&'a self, mut req: Request, next: Next<'a>) -> ResponseFuture<'a> {
        req.headers_mut().insert(AUTHORIZATION, self.credential.header_value().clone());
        Box::pin(async move {
            let operation = req.operation().to_string();
            let response = next.call(req).await?;
            if response.status() == StatusCode::UNAUTHORIZED {
                tracing::debug!(operation = %operation, "request rejected with 401");
                return Err(Error::Unauthorized);
            }
            Ok(response)
        })
    }
}
