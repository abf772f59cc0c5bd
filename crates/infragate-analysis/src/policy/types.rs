//! Policy types — two policy shapes and the verdict they produce.

use std::fmt;

use infragate_core::config::{ThresholdConfig, ThresholdShape};
use infragate_core::constants::{DEFAULT_MAX_BLOCKING_FINDINGS, EXIT_BLOCK, EXIT_PASS};
use infragate_core::errors::ConfigError;
use serde::Serialize;

use crate::normalize::{CostDelta, CostSummary, Severity, SeverityProfile};

/// Per-class finding limits. `None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeverityLimits {
    pub max_critical: Option<u64>,
    pub max_high: Option<u64>,
    pub max_medium: Option<u64>,
    pub max_low: Option<u64>,
}

impl Default for SeverityLimits {
    /// No CRITICAL or HIGH findings allowed; MEDIUM and LOW unbounded.
    fn default() -> Self {
        Self {
            max_critical: Some(DEFAULT_MAX_BLOCKING_FINDINGS),
            max_high: Some(DEFAULT_MAX_BLOCKING_FINDINGS),
            max_medium: None,
            max_low: None,
        }
    }
}

impl SeverityLimits {
    /// Limit for a class. UNKNOWN findings are never capped.
    pub fn limit(&self, severity: Severity) -> Option<u64> {
        match severity {
            Severity::Critical => self.max_critical,
            Severity::High => self.max_high,
            Severity::Medium => self.max_medium,
            Severity::Low => self.max_low,
            Severity::Unknown => None,
        }
    }
}

/// Severity caps plus optional caps on the cost increase.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoundedSeverityPolicy {
    pub limits: SeverityLimits,
    /// Maximum monthly increase in currency units.
    pub max_cost_delta: Option<f64>,
    /// Maximum monthly increase relative to the base total, in percent.
    pub max_cost_increase_percent: Option<f64>,
}

/// Any CRITICAL/HIGH finding blocks; the cost delta falls into a pass, warn
/// or block band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostTierPolicy {
    pub cost_warn: f64,
    pub cost_block: f64,
}

impl CostTierPolicy {
    pub fn new(cost_warn: f64, cost_block: f64) -> Result<Self, ConfigError> {
        for (field, value) in [("cost_warn", cost_warn), ("cost_block", cost_block)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: format!("thresholds.{field}"),
                    message: "must be a finite, non-negative number".to_string(),
                });
            }
        }
        if cost_warn >= cost_block {
            return Err(ConfigError::ValidationFailed {
                field: "thresholds.cost_warn".to_string(),
                message: format!("must be below cost_block ({cost_warn} >= {cost_block})"),
            });
        }
        Ok(Self {
            cost_warn,
            cost_block,
        })
    }
}

/// The gate policy. Exactly one shape is active per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum GatePolicy {
    BoundedSeverity(BoundedSeverityPolicy),
    CostTier(CostTierPolicy),
}

impl GatePolicy {
    /// Build the policy from threshold configuration.
    ///
    /// Fails when both shapes or neither shape is populated.
    pub fn from_thresholds(thresholds: &ThresholdConfig) -> Result<Self, ConfigError> {
        match thresholds.validate()? {
            ThresholdShape::BoundedSeverity => {
                let defaults = SeverityLimits::default();
                Ok(Self::BoundedSeverity(BoundedSeverityPolicy {
                    limits: SeverityLimits {
                        max_critical: thresholds.max_critical.or(defaults.max_critical),
                        max_high: thresholds.max_high.or(defaults.max_high),
                        max_medium: thresholds.max_medium.or(defaults.max_medium),
                        max_low: thresholds.max_low.or(defaults.max_low),
                    },
                    max_cost_delta: thresholds.max_cost_delta,
                    max_cost_increase_percent: thresholds.max_cost_increase_percent,
                }))
            }
            ThresholdShape::CostTier => {
                let (Some(warn), Some(block)) = (thresholds.cost_warn, thresholds.cost_block)
                else {
                    return Err(ConfigError::MissingPolicyShape);
                };
                Ok(Self::CostTier(CostTierPolicy::new(warn, block)?))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BoundedSeverity(_) => "bounded_severity",
            Self::CostTier(_) => "cost_tier",
        }
    }
}

impl TryFrom<&ThresholdConfig> for GatePolicy {
    type Error = ConfigError;

    fn try_from(thresholds: &ThresholdConfig) -> Result<Self, Self::Error> {
        Self::from_thresholds(thresholds)
    }
}

/// Overall verdict status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Pass,
    Warn,
    Block,
}

impl VerdictStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Warn => "warn",
            Self::Block => "block",
        }
    }
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one gate evaluation, with the inputs that produced it.
///
/// Only `PolicyEngine` constructs verdicts; fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateVerdict {
    blocked: bool,
    warned: bool,
    reasons: Vec<String>,
    warnings: Vec<String>,
    severity_profile: SeverityProfile,
    cost: CostSummary,
    policy: GatePolicy,
}

impl GateVerdict {
    pub(crate) fn new(
        reasons: Vec<String>,
        warnings: Vec<String>,
        severity_profile: SeverityProfile,
        cost: CostSummary,
        policy: GatePolicy,
    ) -> Self {
        let blocked = !reasons.is_empty();
        let warned = !blocked && !warnings.is_empty();
        Self {
            blocked,
            warned,
            reasons,
            warnings,
            severity_profile,
            cost,
            policy,
        }
    }

    pub fn blocked(&self) -> bool {
        self.blocked
    }

    pub fn warned(&self) -> bool {
        self.warned
    }

    /// Blocking reasons, security before cost. Empty unless blocked.
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Non-blocking annotations.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn severity_profile(&self) -> &SeverityProfile {
        &self.severity_profile
    }

    pub fn cost(&self) -> &CostSummary {
        &self.cost
    }

    pub fn cost_delta(&self) -> CostDelta {
        self.cost.delta
    }

    pub fn policy(&self) -> &GatePolicy {
        &self.policy
    }

    pub fn status(&self) -> VerdictStatus {
        if self.blocked {
            VerdictStatus::Block
        } else if self.warned {
            VerdictStatus::Warn
        } else {
            VerdictStatus::Pass
        }
    }

    /// 0 for pass and warn, 1 for block.
    pub fn exit_code(&self) -> i32 {
        if self.blocked {
            EXIT_BLOCK
        } else {
            EXIT_PASS
        }
    }
}
