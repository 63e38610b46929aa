//! Configuration types for the Kaiten SDK.
//!
//! - [`RetryPolicy`]: retry budget, backoff and transient-failure set
//! - [`Config`]: base URL and token loaded from the environment or a file

mod retry;
mod source;

pub use retry::{RATE_LIMIT_REMAINING, RATE_LIMIT_RESET, RetryPolicy};
pub use source::{Config, ENV_TOKEN, ENV_URL, PartialConfig};
