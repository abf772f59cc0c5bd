//! Configuration errors.

use super::error_code::{self, InfragateErrorCode};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error(
        "Conflicting policy shapes: bounded-severity fields ({bounded}) and cost-tier fields ({tiered}) are both set"
    )]
    ConflictingPolicyShapes { bounded: String, tiered: String },

    #[error("No policy configured: set severity limits (max_*) or cost tiers (cost_warn, cost_block)")]
    MissingPolicyShape,
}

impl InfragateErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConflictingPolicyShapes { .. } | Self::MissingPolicyShape => {
                error_code::POLICY_SHAPE_ERROR
            }
            _ => error_code::CONFIG_ERROR,
        }
    }
}
