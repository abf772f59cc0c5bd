//! Gate pipeline errors.

use super::error_code::{self, InfragateErrorCode};
use super::{ConfigError, LoadError};

/// Errors that can stop a gate run before a verdict is produced.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Report rendering failed ({format}): {message}")]
    RenderFailed { format: String, message: String },

    #[error("Unknown report format: {0}")]
    UnknownFormat(String),
}

impl InfragateErrorCode for GateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Load(e) => e.error_code(),
            Self::RenderFailed { .. } => error_code::RENDER_ERROR,
            Self::UnknownFormat(_) => error_code::GATE_ERROR,
        }
    }
}
