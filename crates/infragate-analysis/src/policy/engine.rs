//! Policy engine — evaluates a severity profile and cost summary per shape.

use super::types::*;
use crate::normalize::{CostSummary, Severity, SeverityProfile};

/// Severity classes with configurable limits, in reason order.
const LIMITED_CLASSES: [Severity; 4] = [
    Severity::Critical,
    Severity::High,
    Severity::Medium,
    Severity::Low,
];

/// Policy engine: a pure function of (profile, cost, policy).
#[derive(Debug, Clone, Copy)]
pub struct PolicyEngine {
    policy: GatePolicy,
}

impl PolicyEngine {
    pub fn new(policy: GatePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    /// Evaluate one gate run.
    pub fn evaluate(&self, profile: &SeverityProfile, cost: &CostSummary) -> GateVerdict {
        let mut reasons = Vec::new();
        let mut warnings = Vec::new();

        match &self.policy {
            GatePolicy::BoundedSeverity(policy) => {
                Self::bounded_severity(policy, profile, cost, &mut reasons, &mut warnings)
            }
            GatePolicy::CostTier(policy) => {
                Self::cost_tier(policy, profile, cost, &mut reasons, &mut warnings)
            }
        }

        let verdict = GateVerdict::new(reasons, warnings, *profile, *cost, self.policy);
        tracing::info!(
            policy = self.policy.name(),
            status = %verdict.status(),
            findings = profile.total(),
            blocking_findings = profile.blocking(),
            cost_delta = %cost.delta,
            reasons = verdict.reasons().len(),
            warnings = verdict.warnings().len(),
            "gate evaluated"
        );
        verdict
    }

    /// Each class over its limit blocks. Cost caps only apply to an
    /// increase: a saving clears cost reasons but never security reasons.
    fn bounded_severity(
        policy: &BoundedSeverityPolicy,
        profile: &SeverityProfile,
        cost: &CostSummary,
        reasons: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        for severity in LIMITED_CLASSES {
            let count = profile.count(severity);
            if let Some(limit) = policy.limits.limit(severity) {
                if count > limit {
                    reasons.push(format!("{severity} {count} > {limit}"));
                }
            }
        }

        let delta = cost.delta;
        if delta.is_saving() {
            return;
        }

        if let Some(max) = policy.max_cost_delta {
            if delta.amount() > max {
                reasons.push(format!("cost delta {delta} > {max:.2}"));
            }
        }

        if let Some(max_pct) = policy.max_cost_increase_percent {
            match cost.increase_percent() {
                Some(pct) if pct > max_pct => {
                    reasons.push(format!("cost increase {pct:.2}% > {max_pct:.2}%"));
                }
                Some(_) => {}
                None => warnings.push(format!(
                    "cost increase percentage not checked: base total is {}",
                    cost.base_total
                        .map(|b| format!("{b:.2}"))
                        .unwrap_or_else(|| "unknown".to_string())
                )),
            }
        }
    }

    /// Any CRITICAL/HIGH finding blocks. The signed delta is banded:
    /// `>= cost_block` blocks, `>= cost_warn` warns.
    fn cost_tier(
        policy: &CostTierPolicy,
        profile: &SeverityProfile,
        cost: &CostSummary,
        reasons: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        if profile.blocking() > 0 {
            reasons.push(format!(
                "{} CRITICAL/HIGH findings (CRITICAL {}, HIGH {})",
                profile.blocking(),
                profile.count(Severity::Critical),
                profile.count(Severity::High),
            ));
        }

        let delta = cost.delta;
        if delta.amount() >= policy.cost_block {
            reasons.push(format!(
                "cost delta {delta} >= block threshold {:.2}",
                policy.cost_block
            ));
        } else if delta.amount() >= policy.cost_warn {
            warnings.push(format!(
                "cost delta {delta} >= warn threshold {:.2}",
                policy.cost_warn
            ));
        }
    }
}
