//! Tracing subscriber setup shared by binaries and test fixtures.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides the default level. Safe to call more than once; the
/// second initialization is a no-op (relevant when test fixtures race).
pub fn setup_logger(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},tower_http=debug")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
