//! # infragate-analysis
//!
//! The gate pipeline: report loading, normalization of security and cost
//! reports into canonical summaries, policy evaluation, and reporters.
//!
//! Data flows strictly forward: `loader` → `normalize` → `policy` →
//! `reporters`. `pipeline` wires the stages together for callers.

pub mod loader;
pub mod normalize;
pub mod pipeline;
pub mod policy;
pub mod reporters;
