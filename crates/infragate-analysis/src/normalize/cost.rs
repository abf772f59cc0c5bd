//! Cost extraction — resolves heterogeneous cost reports to one monthly delta.
//!
//! Three document layouts are recognized, tried in this order:
//!
//! 1. **Reported delta**: the diff (or proposed) document states the delta
//!    directly (`REPORTED_DELTA_PATHS`).
//! 2. **Project deltas**: no document-level delta, but entries of
//!    `projects` carry their own (`PROJECT_DELTA_PATHS`); they are summed.
//! 3. **Snapshot difference**: only absolute totals are available; the
//!    delta is `proposed - base`.
//!
//! A tool-reported delta is never recomputed from snapshots: it may account
//! for line items, such as removed resources, that a naive subtraction of
//! totals would miss.

use std::fmt;

use rust_decimal::RoundingStrategy;
use serde::Serialize;
use serde_json::Value;

use super::coerce::{amount_or_zero, decimal_sum, from_decimal, to_decimal};
use super::paths::{
    first_present, projects, DIFF_PROPOSED_TOTAL_PATHS, PAST_TOTAL_PATHS, PROJECT_DELTA_PATHS,
    PROJECT_TOTAL_PATHS, REPORTED_DELTA_PATHS, SNAPSHOT_TOTAL_PATHS,
};

/// Every `f64` at or above this magnitude (2^52) is a whole number.
const WHOLE_NUMBER_LIMIT: f64 = 4_503_599_627_370_496.0;

/// Round to cents, half away from zero, on the decimal form of `amount`.
/// Non-finite input and negative zero become `0.0`; the result is always
/// finite.
pub fn round_cents(amount: f64) -> f64 {
    if !amount.is_finite() {
        return 0.0;
    }
    let rounded = if amount.abs() >= WHOLE_NUMBER_LIMIT {
        amount
    } else {
        // No decimal form only below 1e-28, which rounds to zero anyway.
        to_decimal(amount)
            .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
            .map(from_decimal)
            .unwrap_or(0.0)
    };
    if rounded == 0.0 || !rounded.is_finite() {
        0.0
    } else {
        rounded
    }
}

/// Monthly cost change in currency units, rounded to cents.
/// Positive is an increase, negative a saving.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct CostDelta(f64);

impl CostDelta {
    pub fn new(raw: f64) -> Self {
        Self(round_cents(raw))
    }

    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn amount(&self) -> f64 {
        self.0
    }

    /// A non-positive delta.
    pub fn is_saving(&self) -> bool {
        self.0 <= 0.0
    }
}

impl fmt::Display for CostDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Which layout produced the delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostShape {
    ReportedDelta,
    ProjectDeltas,
    SnapshotDifference,
    NoData,
}

impl CostShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReportedDelta => "reported_delta",
            Self::ProjectDeltas => "project_deltas",
            Self::SnapshotDifference => "snapshot_difference",
            Self::NoData => "no_data",
        }
    }
}

impl fmt::Display for CostShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The cost documents available to one evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostReports<'a> {
    /// Diff output (baseline vs. proposed), usually carrying a delta.
    pub diff: Option<&'a Value>,
    /// Baseline snapshot.
    pub base: Option<&'a Value>,
    /// Proposed snapshot.
    pub proposed: Option<&'a Value>,
}

/// Canonical cost summary of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostSummary {
    pub delta: CostDelta,
    pub base_total: Option<f64>,
    pub proposed_total: Option<f64>,
    pub shape: CostShape,
}

impl CostSummary {
    /// Summary for an evaluation without any cost documents.
    pub fn no_data() -> Self {
        Self {
            delta: CostDelta::zero(),
            base_total: None,
            proposed_total: None,
            shape: CostShape::NoData,
        }
    }

    /// Delta relative to the base total, in percent. `None` unless the base
    /// total is known and positive.
    pub fn increase_percent(&self) -> Option<f64> {
        match self.base_total {
            Some(base) if base > 0.0 => Some(self.delta.amount() / base * 100.0),
            _ => None,
        }
    }
}

/// Resolve the cost documents to a `CostSummary`.
pub fn extract_cost(reports: &CostReports<'_>) -> CostSummary {
    let delta_sources = [reports.diff, reports.proposed];

    let resolved = delta_sources
        .iter()
        .flatten()
        .find_map(|doc| reported_delta(doc).map(|d| (d, CostShape::ReportedDelta)))
        .or_else(|| {
            delta_sources
                .iter()
                .flatten()
                .find_map(|doc| project_delta_sum(doc).map(|d| (d, CostShape::ProjectDeltas)))
        });

    let base_total = reports.base.map(snapshot_total).or_else(|| {
        reports
            .diff
            .and_then(|d| first_present(d, PAST_TOTAL_PATHS))
            .map(|(_, v)| amount_or_zero(v))
    });
    let proposed_total = reports.proposed.map(snapshot_total).or_else(|| {
        reports
            .diff
            .and_then(|d| first_present(d, DIFF_PROPOSED_TOTAL_PATHS))
            .map(|(_, v)| amount_or_zero(v))
    });

    let (raw, shape) = match resolved {
        Some(found) => found,
        None if reports.base.is_some() || reports.proposed.is_some() => {
            let proposed = reports.proposed.map(snapshot_total).unwrap_or(0.0);
            let base = reports.base.map(snapshot_total).unwrap_or(0.0);
            (decimal_sum([proposed, -base]), CostShape::SnapshotDifference)
        }
        None => (0.0, CostShape::NoData),
    };

    let summary = CostSummary {
        delta: CostDelta::new(raw),
        base_total,
        proposed_total,
        shape,
    };
    tracing::debug!(
        shape = %summary.shape,
        delta = %summary.delta,
        base_total = ?summary.base_total,
        proposed_total = ?summary.proposed_total,
        "cost summary resolved"
    );
    summary
}

/// Document-level reported delta, if present.
pub fn reported_delta(doc: &Value) -> Option<f64> {
    first_present(doc, REPORTED_DELTA_PATHS).map(|(_, v)| amount_or_zero(v))
}

/// Sum of per-project deltas. `None` unless at least one project carries one.
pub fn project_delta_sum(doc: &Value) -> Option<f64> {
    let projects = projects(doc)?;
    let deltas: Vec<Option<f64>> = projects
        .iter()
        .map(|p| first_present(p, PROJECT_DELTA_PATHS).map(|(_, v)| amount_or_zero(v)))
        .collect();
    if deltas.iter().all(Option::is_none) {
        return None;
    }
    Some(decimal_sum(deltas.into_iter().flatten()))
}

/// Absolute monthly total of a snapshot document.
///
/// Tries `SNAPSHOT_TOTAL_PATHS`, then the sum of per-project totals.
/// A snapshot with neither resolves to `0.0`.
pub fn snapshot_total(doc: &Value) -> f64 {
    if let Some((_, v)) = first_present(doc, SNAPSHOT_TOTAL_PATHS) {
        return amount_or_zero(v);
    }
    projects(doc)
        .map(|projects| {
            decimal_sum(projects.iter().map(|p| {
                first_present(p, PROJECT_TOTAL_PATHS)
                    .map(|(_, v)| amount_or_zero(v))
                    .unwrap_or(0.0)
            }))
        })
        .unwrap_or(0.0)
}
