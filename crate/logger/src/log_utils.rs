use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the global tracing subscriber; subsequent calls are no-ops.
///
/// The filter is taken from `RUST_LOG` when the variable is set and falls
/// back to `default_directives` otherwise. Safe to call from every test.
pub fn log_init(default_directives: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives));
        // try_init: another harness may already have installed a subscriber
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .compact()
            .try_init();
    });
}
