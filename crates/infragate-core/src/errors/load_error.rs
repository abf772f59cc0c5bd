//! Report acquisition errors.
//!
//! Only surfaced in strict acquisition mode; lenient mode substitutes an
//! empty default document instead.

use super::error_code::{self, InfragateErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Cannot read report {source_name}: {message}")]
    Read { source_name: String, message: String },

    #[error("Invalid JSON in report {source_name}: {message}")]
    Parse { source_name: String, message: String },
}

impl LoadError {
    /// Name of the source (file path or buffer label) that failed.
    pub fn source_name(&self) -> &str {
        match self {
            Self::Read { source_name, .. } | Self::Parse { source_name, .. } => source_name,
        }
    }
}

impl InfragateErrorCode for LoadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Read { .. } => error_code::LOAD_ERROR,
            Self::Parse { .. } => error_code::REPORT_PARSE_ERROR,
        }
    }
}
