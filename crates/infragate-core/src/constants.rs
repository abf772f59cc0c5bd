//! Shared constants for the infragate workspace.

/// infragate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project config file name looked up in the working root.
pub const CONFIG_FILE_NAME: &str = "infragate.toml";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "INFRAGATE_LOG";

/// Fallback tracing filter when `INFRAGATE_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "infragate=info";

/// Default currency label used when rendering cost amounts.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Default reporter format.
pub const DEFAULT_REPORT_FORMAT: &str = "console";

/// Default per-class finding limit for CRITICAL and HIGH.
pub const DEFAULT_MAX_BLOCKING_FINDINGS: u64 = 0;

/// Process exit code for a passing or warning verdict.
pub const EXIT_PASS: i32 = 0;

/// Process exit code for a blocking verdict.
pub const EXIT_BLOCK: i32 = 1;

/// Process exit code for configuration and strict-mode load errors.
pub const EXIT_CONFIG_ERROR: i32 = 2;
