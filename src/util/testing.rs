//! Test logging setup shared by unit and integration tests

use std::sync::Once;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

/// Install a stderr tracing subscriber once per test binary.
///
/// Honors `RUST_LOG`; defaults to `value2md=trace`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("value2md=trace"));

        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .with_target(true)
                .with_thread_names(false)
                .with_span_events(FmtSpan::CLOSE)
                .with_test_writer()
                .with_filter(env_filter),
        );

        // Another harness may already own the global subscriber.
        if subscriber.try_init().is_ok() {
            info!("Test Setup complete");
        }
    });
}
