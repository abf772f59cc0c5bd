//! Loader types.

use std::fmt;
use std::path::PathBuf;

use infragate_core::errors::LoadError;
use serde::Serialize;
use serde_json::{json, Value};

/// Where a report comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    Path(PathBuf),
    Bytes { name: String, bytes: Vec<u8> },
}

impl ReportSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::Bytes {
            name: name.into(),
            bytes,
        }
    }

    /// Display name used in logs and errors.
    pub fn name(&self) -> String {
        match self {
            Self::Path(p) => p.display().to_string(),
            Self::Bytes { name, .. } => name.clone(),
        }
    }
}

/// Which report a document is expected to be. Selects the empty default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Security,
    Cost,
}

impl ReportKind {
    /// Document substituted for an unreadable or malformed report.
    ///
    /// The cost default carries a zero total and no delta field, so a
    /// missing diff document cannot mask a snapshot difference.
    pub fn empty_default(&self) -> Value {
        match self {
            Self::Security => json!({ "results": { "failed_checks": [] } }),
            Self::Cost => json!({ "totalMonthlyCost": 0 }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Cost => "cost",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the loader substituted a default document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionCause {
    /// The file was missing or could not be read.
    Unreadable,
    /// The bytes were not valid JSON.
    Malformed,
}

impl From<&LoadError> for SubstitutionCause {
    fn from(error: &LoadError) -> Self {
        match error {
            LoadError::Read { .. } => Self::Unreadable,
            LoadError::Parse { .. } => Self::Malformed,
        }
    }
}

impl fmt::Display for SubstitutionCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable => f.write_str("unreadable"),
            Self::Malformed => f.write_str("malformed"),
        }
    }
}

/// A parsed report, or the default that replaced it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedReport {
    pub source_name: String,
    pub kind: ReportKind,
    pub tree: Value,
    pub substituted: Option<SubstitutionCause>,
}

impl LoadedReport {
    pub fn is_substituted(&self) -> bool {
        self.substituted.is_some()
    }
}
