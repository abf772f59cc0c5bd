//! Gate pipeline: load, normalize, evaluate.
//!
//! Each run is independent: nothing is cached or shared between calls, so
//! callers may evaluate many gates concurrently.

use infragate_core::config::{AcquisitionMode, InfragateConfig};
use infragate_core::errors::{GateError, LoadError};
use serde::Serialize;
use serde_json::Value;

use crate::loader::{self, LoadedReport, ReportKind, ReportSource, SubstitutionCause};
use crate::normalize::{
    extract_cost, severity_profile, CostDelta, CostReports, CostShape, CostSummary,
    SeverityProfile,
};
use crate::policy::{GatePolicy, GateVerdict, PolicyEngine};

/// Report locations for one gate run. Every report is optional.
#[derive(Debug, Clone, Default)]
pub struct GateInputs {
    pub security: Option<ReportSource>,
    pub cost_diff: Option<ReportSource>,
    pub cost_base: Option<ReportSource>,
    pub cost_proposed: Option<ReportSource>,
}

/// A report the loader replaced with its empty default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub source_name: String,
    pub kind: ReportKind,
    pub cause: SubstitutionCause,
}

/// Verdict plus the substitutions made while loading.
#[derive(Debug, Clone, PartialEq)]
pub struct GateRun {
    pub verdict: GateVerdict,
    pub substitutions: Vec<Substitution>,
}

/// Evaluate already-parsed documents. Pure and total.
pub fn evaluate_trees(
    security: Option<&Value>,
    cost: &CostReports<'_>,
    policy: GatePolicy,
) -> GateVerdict {
    let profile = security
        .map(severity_profile)
        .unwrap_or_else(SeverityProfile::default);
    let summary = extract_cost(cost);
    PolicyEngine::new(policy).evaluate(&profile, &summary)
}

/// Load, normalize, and evaluate.
///
/// In lenient mode a substituted cost report counts as absent. When a
/// baseline or proposed snapshot was substituted, a delta that could only come
/// from subtracting snapshots is reported as `NoData` instead.
pub fn run_gate(
    inputs: &GateInputs,
    policy: GatePolicy,
    mode: AcquisitionMode,
) -> Result<GateRun, LoadError> {
    let load = |source: &Option<ReportSource>, kind| -> Result<Option<LoadedReport>, LoadError> {
        source
            .as_ref()
            .map(|s| loader::load(s, kind, mode))
            .transpose()
    };

    let security = load(&inputs.security, ReportKind::Security)?;
    let diff = load(&inputs.cost_diff, ReportKind::Cost)?;
    let base = load(&inputs.cost_base, ReportKind::Cost)?;
    let proposed = load(&inputs.cost_proposed, ReportKind::Cost)?;

    let substitutions = [&security, &diff, &base, &proposed]
        .into_iter()
        .flatten()
        .filter_map(|report| {
            report.substituted.map(|cause| Substitution {
                source_name: report.source_name.clone(),
                kind: report.kind,
                cause,
            })
        })
        .collect();

    let cost = CostReports {
        diff: evidence(&diff),
        base: evidence(&base),
        proposed: evidence(&proposed),
    };
    let mut summary = extract_cost(&cost);
    let snapshot_substituted = [&base, &proposed]
        .into_iter()
        .flatten()
        .any(LoadedReport::is_substituted);
    if snapshot_substituted && summary.shape == CostShape::SnapshotDifference {
        tracing::debug!(
            delta = %summary.delta,
            "snapshot report substituted, discarding snapshot difference"
        );
        summary = CostSummary {
            delta: CostDelta::zero(),
            shape: CostShape::NoData,
            ..summary
        };
    }

    let profile = security
        .as_ref()
        .map(|r| severity_profile(&r.tree))
        .unwrap_or_default();
    let verdict = PolicyEngine::new(policy).evaluate(&profile, &summary);

    Ok(GateRun {
        verdict,
        substitutions,
    })
}

/// Tree of a report that was actually read. A substituted default is no
/// evidence and must not feed totals or a snapshot difference.
fn evidence(report: &Option<LoadedReport>) -> Option<&Value> {
    report
        .as_ref()
        .filter(|r| !r.is_substituted())
        .map(|r| &r.tree)
}

/// `run_gate` with policy and acquisition mode taken from configuration.
pub fn run_gate_with_config(
    inputs: &GateInputs,
    config: &InfragateConfig,
) -> Result<GateRun, GateError> {
    let policy = GatePolicy::from_thresholds(&config.thresholds)?;
    Ok(run_gate(inputs, policy, config.loading.effective_mode())?)
}
