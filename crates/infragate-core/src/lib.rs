//! # infragate-core
//!
//! Shared foundation for the infragate merge gate: error enums,
//! layered TOML configuration, tracing setup, and constants.
//! Contains no report parsing or policy logic.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
