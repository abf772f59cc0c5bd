//! Top-level infragate configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::report_config::REPORT_FORMATS;
use super::{AcquisitionMode, LoadingConfig, ReportConfig, ThresholdConfig, ThresholdShape};
use crate::constants::CONFIG_FILE_NAME;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sections.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`INFRAGATE_*`)
/// 3. Config file (explicit path, or `infragate.toml` in the working root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct InfragateConfig {
    pub loading: LoadingConfig,
    pub thresholds: ThresholdConfig,
    pub report: ReportConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub mode: Option<AcquisitionMode>,
    pub format: Option<String>,
    pub currency: Option<String>,
    pub thresholds: ThresholdConfig,
}

impl InfragateConfig {
    /// Load configuration with layered resolution and validate the result.
    ///
    /// `explicit_path` must exist when given. Otherwise `infragate.toml` in
    /// `root` is read if present.
    pub fn load(
        root: &Path,
        explicit_path: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3: config file
        match explicit_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_toml_file(&mut config, path)?;
            }
            None => {
                let project_config_path = root.join(CONFIG_FILE_NAME);
                if project_config_path.is_file() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1: CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        let shape = Self::validate(&config)?;
        tracing::debug!(
            mode = %config.loading.effective_mode(),
            ?shape,
            format = config.report.effective_format(),
            "configuration resolved"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values, returning the selected policy shape.
    pub fn validate(config: &InfragateConfig) -> Result<ThresholdShape, ConfigError> {
        if let Some(ref format) = config.report.format {
            if !REPORT_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "report.format".to_string(),
                    message: format!(
                        "unknown format '{format}' (expected one of: {})",
                        REPORT_FORMATS.join(", ")
                    ),
                });
            }
        }
        if let Some(ref currency) = config.report.currency {
            if currency.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "report.currency".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        config.thresholds.validate()
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut InfragateConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: InfragateConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut InfragateConfig, other: &InfragateConfig) {
        if other.loading.mode.is_some() {
            base.loading.mode = other.loading.mode;
        }
        if other.report.currency.is_some() {
            base.report.currency = other.report.currency.clone();
        }
        if other.report.format.is_some() {
            base.report.format = other.report.format.clone();
        }
        base.thresholds.overlay(&other.thresholds);
    }

    /// Apply environment variable overrides.
    /// Pattern: `INFRAGATE_LOADING_MODE`, `INFRAGATE_MAX_HIGH`, `INFRAGATE_COST_WARN`, etc.
    ///
    /// A set but unparsable variable is an error rather than silently ignored,
    /// since thresholds decide whether a merge is blocked.
    fn apply_env_overrides(config: &mut InfragateConfig) -> Result<(), ConfigError> {
        if let Some(val) = env_var("INFRAGATE_LOADING_MODE") {
            let mode = val.parse::<AcquisitionMode>().map_err(|message| {
                ConfigError::InvalidValue {
                    field: "INFRAGATE_LOADING_MODE".to_string(),
                    message,
                }
            })?;
            config.loading.mode = Some(mode);
        }
        if let Some(val) = env_var("INFRAGATE_REPORT_FORMAT") {
            config.report.format = Some(val);
        }
        if let Some(val) = env_var("INFRAGATE_REPORT_CURRENCY") {
            config.report.currency = Some(val);
        }

        let t = &mut config.thresholds;
        if let Some(v) = env_parse::<u64>("INFRAGATE_MAX_CRITICAL")? {
            t.max_critical = Some(v);
        }
        if let Some(v) = env_parse::<u64>("INFRAGATE_MAX_HIGH")? {
            t.max_high = Some(v);
        }
        if let Some(v) = env_parse::<u64>("INFRAGATE_MAX_MEDIUM")? {
            t.max_medium = Some(v);
        }
        if let Some(v) = env_parse::<u64>("INFRAGATE_MAX_LOW")? {
            t.max_low = Some(v);
        }
        if let Some(v) = env_parse::<f64>("INFRAGATE_MAX_COST_DELTA")? {
            t.max_cost_delta = Some(v);
        }
        if let Some(v) = env_parse::<f64>("INFRAGATE_MAX_COST_INCREASE_PERCENT")? {
            t.max_cost_increase_percent = Some(v);
        }
        if let Some(v) = env_parse::<f64>("INFRAGATE_COST_WARN")? {
            t.cost_warn = Some(v);
        }
        if let Some(v) = env_parse::<f64>("INFRAGATE_COST_BLOCK")? {
            t.cost_block = Some(v);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut InfragateConfig, cli: &CliOverrides) {
        if let Some(mode) = cli.mode {
            config.loading.mode = Some(mode);
        }
        if let Some(ref v) = cli.format {
            config.report.format = Some(v.clone());
        }
        if let Some(ref v) = cli.currency {
            config.report.currency = Some(v.clone());
        }
        config.thresholds.overlay(&cli.thresholds);
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Default location of the project config file under `root`.
    pub fn project_config_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE_NAME)
    }
}

/// Read a non-empty environment variable.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_var(key) {
        Some(val) => val
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: key.to_string(),
                message: format!("'{val}': {e}"),
            }),
        None => Ok(None),
    }
}
