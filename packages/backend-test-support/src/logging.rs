//! Logging bootstrap for integration tests
//!
//! Integration test binaries cannot see the library's `#[cfg(test)]` ctor
//! hook, so each test file calls [`init`] before exercising the engine.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Initialize test logging once per binary.
///
/// Filter precedence: `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
/// Setting `TEST_LOG_JSON=1` switches to JSON lines, matching the shape the
/// engine emits in production.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let json = std::env::var("TEST_LOG_JSON").is_ok_and(|v| v == "1");

        let builder = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time();

        if json {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
