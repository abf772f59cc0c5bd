//! Error handling for infragate.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod gate_error;
pub mod load_error;

pub use config_error::ConfigError;
pub use error_code::InfragateErrorCode;
pub use gate_error::GateError;
pub use load_error::LoadError;
