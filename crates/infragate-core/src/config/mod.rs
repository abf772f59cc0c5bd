//! Configuration system for infragate.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod infragate_config;
pub mod loading_config;
pub mod report_config;
pub mod threshold_config;

pub use infragate_config::{CliOverrides, InfragateConfig};
pub use loading_config::{AcquisitionMode, LoadingConfig};
pub use report_config::ReportConfig;
pub use threshold_config::{ThresholdConfig, ThresholdShape};
