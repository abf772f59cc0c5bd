//! Report acquisition configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the report loader reacts to a missing file or malformed JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquisitionMode {
    /// Substitute an empty default document and keep going.
    #[default]
    Lenient,
    /// Fail the run with a load error.
    Strict,
}

impl AcquisitionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for AcquisitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AcquisitionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown acquisition mode '{other}' (expected lenient or strict)")),
        }
    }
}

/// `[loading]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LoadingConfig {
    /// Acquisition mode. Default: lenient.
    pub mode: Option<AcquisitionMode>,
}

impl LoadingConfig {
    /// Returns the effective acquisition mode, defaulting to lenient.
    pub fn effective_mode(&self) -> AcquisitionMode {
        self.mode.unwrap_or_default()
    }
}
