//! Report rendering configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CURRENCY, DEFAULT_REPORT_FORMAT};

/// Formats understood by the reporters.
pub const REPORT_FORMATS: &[&str] = &["console", "json", "markdown"];

/// `[report]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Currency label printed next to amounts. Default: "USD".
    pub currency: Option<String>,
    /// Reporter format: "console" | "json" | "markdown". Default: "console".
    pub format: Option<String>,
}

impl ReportConfig {
    pub fn effective_currency(&self) -> &str {
        self.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    pub fn effective_format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_REPORT_FORMAT)
    }
}
