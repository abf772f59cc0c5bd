//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the infragate tracing/logging system.
///
/// Reads the `INFRAGATE_LOG` environment variable for per-module log levels.
/// Format: `INFRAGATE_LOG=infragate_analysis::loader=debug,infragate=info`
///
/// Falls back to `infragate=info` if `INFRAGATE_LOG` is not set or is invalid.
/// Output goes to stderr so that reporters can own stdout.
///
/// Calling this more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        // try_init: a host process may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(filter)
            .try_init();
    });
}
