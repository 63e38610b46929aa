//! The `User-Agent` sent with every HTTP request.

use std::sync::LazyLock;

const SDK_NAME: &str = "kaiten-rust";

const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let os = match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    };
    format!(
        "{SDK_NAME}/{SDK_VERSION} (rust/{}; {os}/{})",
        env!("CARGO_PKG_RUST_VERSION"),
        std::env::consts::ARCH
    )
});

/// Returns `kaiten-rust/<version> (rust/<msrv>; <os>/<arch>)`.
pub fn user_agent() -> &'static str {
    &USER_AGENT
}
