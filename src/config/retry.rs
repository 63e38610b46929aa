//! Retry policy for transient failures and rate limits.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, RETRY_AFTER};

use crate::error::{TransportError, TransportErrorKind};

/// Remaining requests in the current rate-limit window.
pub const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Unix epoch second at which the rate-limit window resets.
pub const RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Highest exponent applied to the base delay; beyond it the delay saturates.
const MAX_BACKOFF_EXPONENT: u32 = 62;

/// Configuration for the retry interceptor.
///
/// Only `GET` and `HEAD` requests are ever attempted more than once. Every
/// other method gets exactly one attempt so a side-effecting call is never
/// duplicated.
///
/// ## Default Values
///
/// - `max_attempts`: 3
/// - `base_delay`: 1s
/// - `retry_on_timeout`: true
/// - `retry_on_connection_error`: true
///
/// ## Backoff
///
/// The delay before attempt `n + 1` is `base_delay × 2^n × jitter` with
/// `jitter` drawn uniformly from `[0.5, 1.5)` on every call.
///
/// ## Example
///
/// ```rust
/// use kaiten::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_attempts(5)
///     .with_base_delay(Duration::from_millis(250))
///     .with_retry_on_timeout(false);
///
/// assert_eq!(policy.max_attempts, 5);
/// assert_eq!(policy.attempts_for(&reqwest::Method::POST), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts for a retryable request, at least 1.
    pub max_attempts: u32,

    /// Base delay of the exponential backoff, at least
    /// [`MIN_BASE_DELAY`](Self::MIN_BASE_DELAY).
    pub base_delay: Duration,

    /// Whether transport timeouts are transient.
    pub retry_on_timeout: bool,

    /// Whether connection failures (connect, reset, aborted) are transient.
    pub retry_on_connection_error: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            retry_on_timeout: true,
            retry_on_connection_error: true,
        }
    }
}

impl RetryPolicy {
    /// Smallest base delay the backoff uses.
    pub const MIN_BASE_DELAY: Duration = Duration::from_millis(1);

    /// Creates a retry policy with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a policy that makes a single attempt for every request.
    pub fn disabled() -> Self {
        Self { max_attempts: 1, ..Default::default() }
    }

    /// Sets the maximum number of attempts. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Sets the base delay of the exponential backoff. Values below
    /// [`MIN_BASE_DELAY`](Self::MIN_BASE_DELAY) are raised to it.
    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay.max(Self::MIN_BASE_DELAY);
        self
    }

    /// Sets whether to retry on timeout errors.
    #[must_use]
    pub fn with_retry_on_timeout(mut self, retry: bool) -> Self {
        self.retry_on_timeout = retry;
        self
    }

    /// Sets whether to retry on connection errors.
    #[must_use]
    pub fn with_retry_on_connection_error(mut self, retry: bool) -> Self {
        self.retry_on_connection_error = retry;
        self
    }

    /// Returns the attempt budget for a request method.
    pub fn attempts_for(&self, method: &Method) -> u32 {
        if is_retryable_method(method) { self.max_attempts.max(1) } else { 1 }
    }

    /// Returns `true` if a transport failure is worth another attempt.
    ///
    /// Request, body and unclassified failures are never transient.
    pub fn is_transient(&self, error: &TransportError) -> bool {
        match error.kind() {
            TransportErrorKind::Timeout => self.retry_on_timeout,
            TransportErrorKind::Connect | TransportErrorKind::ConnectionLost => {
                self.retry_on_connection_error
            },
            _ => false,
        }
    }

    /// Computes a jittered exponential backoff for a 0-based attempt index.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        scaled_delay(self.base_delay.max(Self::MIN_BASE_DELAY), attempt, 0.5 + fastrand::f64())
    }

    /// Computes the delay before retrying a 429 response.
    ///
    /// In priority order:
    ///
    /// 1. `X-RateLimit-Remaining: 0` with an epoch `X-RateLimit-Reset`: the
    ///    time left until the reset.
    /// 2. `Retry-After` as seconds (clamped to zero) or as an HTTP-date.
    /// 3. [`backoff_delay`](Self::backoff_delay) for `attempt`.
    pub fn rate_limit_delay(&self, headers: &HeaderMap, attempt: u32) -> Duration {
        self.rate_limit_delay_at(headers, attempt, Utc::now())
    }

    pub(crate) fn rate_limit_delay_at(
        &self,
        headers: &HeaderMap,
        attempt: u32,
        now: DateTime<Utc>,
    ) -> Duration {
        reset_delay(headers, now)
            .or_else(|| retry_after_delay(headers, now))
            .unwrap_or_else(|| self.backoff_delay(attempt))
    }
}

fn is_retryable_method(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}

/// `base × 2^attempt × factor`, saturating at [`Duration::MAX`].
pub(crate) fn scaled_delay(base: Duration, attempt: u32, factor: f64) -> Duration {
    let exponent = attempt.min(MAX_BACKOFF_EXPONENT) as i32;
    let secs = base.as_secs_f64() * 2f64.powi(exponent) * factor;
    Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers.get(name)?.to_str().ok().map(str::trim)
}

fn reset_delay(headers: &HeaderMap, now: DateTime<Utc>) -> Option<Duration> {
    let remaining: i64 = header_str(headers, &RATE_LIMIT_REMAINING)?.parse().ok()?;
    if remaining != 0 {
        return None;
    }
    let reset: i64 = header_str(headers, &RATE_LIMIT_RESET)?.parse().ok()?;
    let reset = DateTime::from_timestamp(reset, 0)?;
    Some(until(reset, now))
}

fn retry_after_delay(headers: &HeaderMap, now: DateTime<Utc>) -> Option<Duration> {
    let value = header_str(headers, &RETRY_AFTER)?;
    if let Ok(secs) = value.parse::<f64>() {
        if !secs.is_finite() {
            return None;
        }
        return Some(Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX));
    }
    let date = DateTime::parse_from_rfc2822(value).ok()?;
    Some(until(date.with_timezone(&Utc), now))
}

fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (target - now).to_std().unwrap_or(Duration::ZERO)
}
