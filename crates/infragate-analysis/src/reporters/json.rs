//! JSON reporter — structured verdict output.

use infragate_core::errors::GateError;
use serde_json::json;

use super::Reporter;
use crate::normalize::Severity;
use crate::policy::GateVerdict;

/// JSON reporter for machine-readable output.
pub struct JsonReporter {
    pub currency: String,
}

impl JsonReporter {
    pub fn new(currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
        }
    }
}

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, verdict: &GateVerdict) -> Result<String, GateError> {
        let profile = verdict.severity_profile();
        let cost = verdict.cost();

        let mut findings = serde_json::Map::new();
        for severity in Severity::all() {
            findings.insert(
                severity.as_str().to_ascii_lowercase(),
                json!(profile.count(*severity)),
            );
        }
        findings.insert("total".to_string(), json!(profile.total()));
        findings.insert("blocking".to_string(), json!(profile.blocking()));

        let output = json!({
            "status": verdict.status(),
            "blocked": verdict.blocked(),
            "warned": verdict.warned(),
            "exit_code": verdict.exit_code(),
            "reasons": verdict.reasons(),
            "warnings": verdict.warnings(),
            "findings": findings,
            "cost": {
                "currency": self.currency,
                "delta": cost.delta,
                "base_total": cost.base_total,
                "proposed_total": cost.proposed_total,
                "increase_percent": cost.increase_percent(),
                "shape": cost.shape,
            },
            "policy": verdict.policy(),
        });

        serde_json::to_string_pretty(&output).map_err(|e| GateError::RenderFailed {
            format: self.name().to_string(),
            message: e.to_string(),
        })
    }
}
