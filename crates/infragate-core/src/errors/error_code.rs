//! InfragateErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a stable code string that
/// CI wrappers can match on without parsing messages.
pub trait InfragateErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const POLICY_SHAPE_ERROR: &str = "POLICY_SHAPE_ERROR";
pub const LOAD_ERROR: &str = "LOAD_ERROR";
pub const REPORT_PARSE_ERROR: &str = "REPORT_PARSE_ERROR";
pub const GATE_ERROR: &str = "GATE_ERROR";
pub const RENDER_ERROR: &str = "RENDER_ERROR";
