//! Severity extraction from security scan reports.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::paths::{lookup, FAILED_CHECKS_PATH, SEVERITY_FIELDS};

/// Finding severity. Ordered so that `Critical > High > Medium > Low > Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Case-insensitive parse. Anything unrecognized is `Unknown`.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "CRITICAL" => Self::Critical,
            "HIGH" => Self::High,
            "MEDIUM" => Self::Medium,
            "LOW" => Self::Low,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// All classes in reporting order, most severe first.
    pub fn all() -> &'static [Severity] {
        &[
            Self::Critical,
            Self::High,
            Self::Medium,
            Self::Low,
            Self::Unknown,
        ]
    }

    /// CRITICAL and HIGH.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Critical | Self::High)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finding counts per severity class.
///
/// Built once from a report and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SeverityProfile {
    critical: u64,
    high: u64,
    medium: u64,
    low: u64,
    unknown: u64,
}

impl SeverityProfile {
    pub fn from_counts(critical: u64, high: u64, medium: u64, low: u64, unknown: u64) -> Self {
        Self {
            critical,
            high,
            medium,
            low,
            unknown,
        }
    }

    pub fn count(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Unknown => self.unknown,
        }
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.critical + self.high + self.medium + self.low + self.unknown
    }

    /// CRITICAL + HIGH.
    pub fn blocking(&self) -> u64 {
        Severity::all()
            .iter()
            .filter(|s| s.is_blocking())
            .map(|s| self.count(*s))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    fn slot(&mut self, severity: Severity) -> &mut u64 {
        match severity {
            Severity::Critical => &mut self.critical,
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
            Severity::Unknown => &mut self.unknown,
        }
    }
}

impl FromIterator<Severity> for SeverityProfile {
    fn from_iter<I: IntoIterator<Item = Severity>>(iter: I) -> Self {
        let mut profile = Self::default();
        for severity in iter {
            *profile.slot(severity) += 1;
        }
        profile
    }
}

/// Severity of one failed-check record.
///
/// `check_severity` is consulted before `severity`; the first non-empty
/// string wins. Records without either, or that are not objects, are
/// `Unknown`.
pub fn finding_severity(record: &Value) -> Severity {
    SEVERITY_FIELDS
        .iter()
        .filter_map(|field| record.get(*field)?.as_str())
        .map(str::trim)
        .find(|label| !label.is_empty())
        .map(Severity::parse)
        .unwrap_or(Severity::Unknown)
}

/// Tally the failed checks of a security report.
///
/// A missing or mis-shaped `results.failed_checks` is an empty list. Every
/// entry is counted exactly once, so `total()` equals the list length.
pub fn severity_profile(tree: &Value) -> SeverityProfile {
    if !tree.is_object() {
        // Multi-framework scans emit one report per framework in a top-level array.
        tracing::debug!(
            root = json_kind(tree),
            "security report root is not an object, no failed checks read"
        );
    }
    let checks = lookup(tree, FAILED_CHECKS_PATH)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let profile: SeverityProfile = checks.iter().map(finding_severity).collect();
    tracing::debug!(
        failed_checks = checks.len(),
        critical = profile.critical,
        high = profile.high,
        medium = profile.medium,
        low = profile.low,
        unknown = profile.unknown,
        "severity profile built"
    );
    profile
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert!(Severity::Low > Severity::Unknown);
    }

    #[test]
    fn only_critical_and_high_block() {
        let blocking: Vec<Severity> = Severity::all()
            .iter()
            .copied()
            .filter(Severity::is_blocking)
            .collect();
        assert_eq!(blocking, [Severity::Critical, Severity::High]);

        let p = SeverityProfile::from_counts(2, 3, 5, 7, 11);
        assert_eq!(p.blocking(), 5);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Severity::parse("high"), Severity::High);
        assert_eq!(Severity::parse(" Critical "), Severity::Critical);
        assert_eq!(Severity::parse("INFO"), Severity::Unknown);
        assert_eq!(Severity::parse(""), Severity::Unknown);
    }

    #[test]
    fn check_severity_takes_priority() {
        let record = json!({"check_severity": "low", "severity": "critical"});
        assert_eq!(finding_severity(&record), Severity::Low);
    }

    #[test]
    fn empty_check_severity_falls_through() {
        let record = json!({"check_severity": "  ", "severity": "medium"});
        assert_eq!(finding_severity(&record), Severity::Medium);

        let record = json!({"check_severity": null, "severity": "HIGH"});
        assert_eq!(finding_severity(&record), Severity::High);
    }

    #[test]
    fn non_string_and_non_object_records_are_unknown() {
        assert_eq!(finding_severity(&json!({"severity": 3})), Severity::Unknown);
        assert_eq!(finding_severity(&json!("HIGH")), Severity::Unknown);
        assert_eq!(finding_severity(&json!({})), Severity::Unknown);
    }

    #[test]
    fn profile_counts_every_record() {
        let tree = json!({"results": {"failed_checks": [
            {"check_severity": "high"},
            {"severity": "HIGH"},
            {"severity": "critical"},
            {"severity": "bogus"},
            {},
            null,
            {"check_severity": "Low"}
        ]}});
        let p = severity_profile(&tree);
        assert_eq!(p.count(Severity::High), 2);
        assert_eq!(p.count(Severity::Critical), 1);
        assert_eq!(p.count(Severity::Low), 1);
        assert_eq!(p.count(Severity::Unknown), 3);
        assert_eq!(p.total(), 7);
        assert_eq!(p.blocking(), 3);
    }

    #[test]
    fn mis_shaped_reports_are_empty() {
        for tree in [
            json!({}),
            json!({"results": null}),
            json!({"results": {"failed_checks": {"a": 1}}}),
            json!([{"results": {"failed_checks": [{"severity": "HIGH"}]}}]),
            json!("scan failed"),
        ] {
            assert!(severity_profile(&tree).is_empty(), "{tree}");
        }
    }
}
