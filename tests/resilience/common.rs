//! Shared harness for the resilience tests.

use std::sync::Once;
use std::time::Duration;

use kaiten::{Client, RetryPolicy};
use wiremock::MockServer;

/// Token every test client sends.
pub const TOKEN: &str = "test-token";

/// Base path the mock server serves the API under.
pub const API_PREFIX: &str = "/api/latest";

static TRACING: Once = Once::new();

/// Routes SDK logs to the test output when `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A retry policy with millisecond delays so exhaustion tests stay fast.
pub fn fast_retries(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new().with_max_attempts(max_attempts).with_base_delay(Duration::from_millis(5))
}

/// A client for `server` with the default attempt count and fast backoff.
pub fn client(server: &MockServer) -> Client {
    client_with_policy(server, fast_retries(3))
}

/// A client for `server` with a custom retry policy.
pub fn client_with_policy(server: &MockServer, policy: RetryPolicy) -> Client {
    init_tracing();
    Client::builder()
        .url(format!("{}{API_PREFIX}", server.uri()))
        .token(TOKEN)
        .retry_policy(policy)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// Full path of an API resource on the mock server.
pub fn api(path: &str) -> String {
    format!("{API_PREFIX}/{path}")
}

/// Number of requests the server has seen.
pub async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}
