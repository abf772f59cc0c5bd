//! Policy: turns normalized reports into a gate verdict.

pub mod engine;
pub mod types;

pub use engine::PolicyEngine;
pub use types::*;
