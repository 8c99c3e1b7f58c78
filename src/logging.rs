//! Diagnostic logging setup
//!
//! Installs a `tracing` fmt subscriber once per process. The filter comes from
//! `RUST_LOG` with `finfree=warn` added as the default directive.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// Safe to call more than once; only the first call installs the subscriber.
/// Output goes to stderr so it never mixes with command output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "finfree=warn".parse() {
            filter = filter.add_directive(directive);
        }

        // try_init: a test harness may already have installed a subscriber
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
