//! Observability for infragate.
//! `tracing` crate with `EnvFilter`, configured through `INFRAGATE_LOG`.

pub mod setup;

pub use setup::init_tracing;
