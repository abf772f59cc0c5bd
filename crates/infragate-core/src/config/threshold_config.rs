//! Gate threshold configuration.
//!
//! The fields belong to one of two policy shapes. Bounded-severity fields cap
//! each severity count and optionally the cost increase; cost-tier fields
//! define a warn band and a block band on the cost delta. A configuration
//! must populate exactly one shape.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Which policy shape a threshold configuration selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdShape {
    BoundedSeverity,
    CostTier,
}

/// `[thresholds]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Maximum CRITICAL findings. Default when the bounded shape is selected: 0.
    pub max_critical: Option<u64>,
    /// Maximum HIGH findings. Default when the bounded shape is selected: 0.
    pub max_high: Option<u64>,
    /// Maximum MEDIUM findings. Default: unbounded.
    pub max_medium: Option<u64>,
    /// Maximum LOW findings. Default: unbounded.
    pub max_low: Option<u64>,
    /// Maximum monthly cost increase, in currency units.
    pub max_cost_delta: Option<f64>,
    /// Maximum monthly cost increase relative to the base total, in percent.
    pub max_cost_increase_percent: Option<f64>,
    /// Cost delta at which a non-blocking warning is raised.
    pub cost_warn: Option<f64>,
    /// Cost delta at which the gate blocks.
    pub cost_block: Option<f64>,
}

impl ThresholdConfig {
    /// Names of the populated bounded-severity fields.
    pub fn bounded_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.max_critical.is_some() {
            fields.push("max_critical");
        }
        if self.max_high.is_some() {
            fields.push("max_high");
        }
        if self.max_medium.is_some() {
            fields.push("max_medium");
        }
        if self.max_low.is_some() {
            fields.push("max_low");
        }
        if self.max_cost_delta.is_some() {
            fields.push("max_cost_delta");
        }
        if self.max_cost_increase_percent.is_some() {
            fields.push("max_cost_increase_percent");
        }
        fields
    }

    /// Names of the populated cost-tier fields.
    pub fn tier_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.cost_warn.is_some() {
            fields.push("cost_warn");
        }
        if self.cost_block.is_some() {
            fields.push("cost_block");
        }
        fields
    }

    /// Determine the selected policy shape.
    ///
    /// Errors when both shapes or neither shape is populated.
    pub fn shape(&self) -> Result<ThresholdShape, ConfigError> {
        let bounded = self.bounded_fields();
        let tiered = self.tier_fields();
        match (bounded.is_empty(), tiered.is_empty()) {
            (false, false) => Err(ConfigError::ConflictingPolicyShapes {
                bounded: bounded.join(", "),
                tiered: tiered.join(", "),
            }),
            (false, true) => Ok(ThresholdShape::BoundedSeverity),
            (true, false) => Ok(ThresholdShape::CostTier),
            (true, true) => Err(ConfigError::MissingPolicyShape),
        }
    }

    /// Validate amounts and the shape selection.
    pub fn validate(&self) -> Result<ThresholdShape, ConfigError> {
        let amounts = [
            ("thresholds.max_cost_delta", self.max_cost_delta),
            ("thresholds.max_cost_increase_percent", self.max_cost_increase_percent),
            ("thresholds.cost_warn", self.cost_warn),
            ("thresholds.cost_block", self.cost_block),
        ];
        for (field, value) in amounts {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be a finite, non-negative number".to_string(),
                    });
                }
            }
        }

        let shape = self.shape()?;
        if shape == ThresholdShape::CostTier {
            match (self.cost_warn, self.cost_block) {
                (Some(warn), Some(block)) if warn >= block => {
                    return Err(ConfigError::ValidationFailed {
                        field: "thresholds.cost_warn".to_string(),
                        message: format!("must be below cost_block ({warn} >= {block})"),
                    });
                }
                (Some(_), Some(_)) => {}
                (None, _) => {
                    return Err(ConfigError::ValidationFailed {
                        field: "thresholds.cost_warn".to_string(),
                        message: "required when cost_block is set".to_string(),
                    });
                }
                (_, None) => {
                    return Err(ConfigError::ValidationFailed {
                        field: "thresholds.cost_block".to_string(),
                        message: "required when cost_warn is set".to_string(),
                    });
                }
            }
        }
        Ok(shape)
    }

    /// Overlay `other` onto `self`; only populated fields in `other` win.
    pub fn overlay(&mut self, other: &ThresholdConfig) {
        if other.max_critical.is_some() {
            self.max_critical = other.max_critical;
        }
        if other.max_high.is_some() {
            self.max_high = other.max_high;
        }
        if other.max_medium.is_some() {
            self.max_medium = other.max_medium;
        }
        if other.max_low.is_some() {
            self.max_low = other.max_low;
        }
        if other.max_cost_delta.is_some() {
            self.max_cost_delta = other.max_cost_delta;
        }
        if other.max_cost_increase_percent.is_some() {
            self.max_cost_increase_percent = other.max_cost_increase_percent;
        }
        if other.cost_warn.is_some() {
            self.cost_warn = other.cost_warn;
        }
        if other.cost_block.is_some() {
            self.cost_block = other.cost_block;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_shape_selected_by_any_max_field() {
        let t = ThresholdConfig {
            max_medium: Some(5),
            ..Default::default()
        };
        assert_eq!(t.shape().unwrap(), ThresholdShape::BoundedSeverity);
    }

    #[test]
    fn mixing_shapes_is_rejected() {
        let t = ThresholdConfig {
            max_high: Some(0),
            cost_block: Some(300.0),
            ..Default::default()
        };
        let err = t.shape().unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingPolicyShapes { .. }));
        assert!(err.to_string().contains("max_high"));
        assert!(err.to_string().contains("cost_block"));
    }

    #[test]
    fn empty_thresholds_are_rejected() {
        assert!(matches!(
            ThresholdConfig::default().shape(),
            Err(ConfigError::MissingPolicyShape)
        ));
    }

    #[test]
    fn tier_bounds_must_be_ordered() {
        let t = ThresholdConfig {
            cost_warn: Some(300.0),
            cost_block: Some(300.0),
            ..Default::default()
        };
        assert!(matches!(
            t.validate(),
            Err(ConfigError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn tier_requires_both_bounds() {
        let t = ThresholdConfig {
            cost_block: Some(300.0),
            ..Default::default()
        };
        let err = t.validate().unwrap_err();
        assert!(err.to_string().contains("cost_warn"));
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let t = ThresholdConfig {
            max_cost_delta: Some(-1.0),
            ..Default::default()
        };
        assert!(t.validate().is_err());
    }
}
