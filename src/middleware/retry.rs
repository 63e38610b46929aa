//! The retry state machine.
//!
//! One logical call runs at most `attempts` times, strictly in sequence,
//! where `attempts` is the policy maximum for `GET`/`HEAD` and 1 for every
//! other method. Each attempt ends in one of:
//!
//! | Outcome                    | Not last attempt              | Last attempt                 |
//! |----------------------------|-------------------------------|------------------------------|
//! | transient transport error  | sleep backoff, retry          | `NetworkError { cause }`     |
//! | other transport error      | returned immediately          | returned immediately         |
//! | 429                        | sleep rate-limit delay, retry | `RateLimited { retry_after }`|
//! | 5xx                        | sleep backoff, retry          | `ServerError { status_code }`|
//! | anything else              | returned as the response      | returned as the response     |
//!
//! The only suspension points besides the transport call are the sleeps.
//! Dropping the call's future during either stops the loop: no further
//! attempt is issued.

use std::time::Duration;

use reqwest::StatusCode;

use super::{Middleware, Next, Request, Response, ResponseFuture};
use crate::{Error, RetryPolicy};

/// Retries `GET`/`HEAD` requests on transient failures, 429 and 5xx.
#[derive(Debug, Clone, Default)]
pub struct RetryInterceptor {
    policy: RetryPolicy,
}

impl RetryInterceptor {
    /// Creates an interceptor applying `policy`.
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    async fn execute(&self, req: Request, next: Next<'_>) -> Result<Response, Error> {
        let attempts = self.policy.attempts_for(req.method());
        let mut attempt = 0;

        loop {
            let last = attempt + 1 >= attempts;
            tracing::trace!(operation = %req.operation(), attempt, "sending request");

            let (delay, reason) = match next.call(req.clone()).await {
                Err(Error::NetworkError { cause }) => {
                    if !self.policy.is_transient(&cause) {
                        return Err(Error::NetworkError { cause });
                    }
                    if last {
                        self.log_exhausted(&req, attempts, "network error");
                        return Err(Error::NetworkError { cause });
                    }
                    (self.policy.backoff_delay(attempt), cause.kind().to_string())
                },
                Err(err) => return Err(err),
                Ok(resp) if resp.status() == StatusCode::TOO_MANY_REQUESTS => {
                    let delay = self.policy.rate_limit_delay(resp.headers(), attempt);
                    if last {
                        self.log_exhausted(&req, attempts, "rate limited");
                        return Err(Error::RateLimited { retry_after: Some(delay) });
                    }
                    (delay, "rate limited".to_string())
                },
                Ok(resp) if resp.status().is_server_error() => {
                    let status_code = resp.status().as_u16();
                    if last {
                        self.log_exhausted(&req, attempts, "server error");
                        return Err(Error::ServerError { status_code, body: None });
                    }
                    (self.policy.backoff_delay(attempt), format!("status {status_code}"))
                },
                Ok(resp) => return Ok(resp),
            };

            self.log_retry(&req, attempt, delay, &reason);
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    fn log_retry(&self, req: &Request, attempt: u32, delay: Duration, reason: &str) {
        tracing::debug!(
            operation = %req.operation(),
            method = %req.method(),
            attempt = attempt + 1,
            max_attempts = self.policy.max_attempts,
            delay_ms = delay.as_millis() as u64,
            reason,
            "retrying request"
        );
    }

    fn log_exhausted(&self, req: &Request, attempts: u32, reason: &str) {
        tracing::warn!(
            operation = %req.operation(),
            method = %req.method(),
            attempts,
            reason,
            "giving up on request"
        );
    }
}

impl Middleware for RetryInterceptor {
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> ResponseFuture<'a> {
        Box::pin(self.execute(req, next))
    }
}
