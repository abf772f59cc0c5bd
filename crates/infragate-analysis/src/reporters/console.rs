//! Console reporter — human-readable multi-line output.

use infragate_core::errors::GateError;

use super::{describe_thresholds, money, signed_money, Reporter};
use crate::normalize::Severity;
use crate::policy::{GateVerdict, VerdictStatus};

/// Console reporter for terminal and CI log output.
pub struct ConsoleReporter {
    pub currency: String,
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(currency: &str, use_color: bool) -> Self {
        Self {
            currency: currency.to_string(),
            use_color,
        }
    }

    fn status_line(&self, status: VerdictStatus) -> String {
        let (color, text) = match status {
            VerdictStatus::Pass => ("\x1b[32m", "PASSED ✓"),
            VerdictStatus::Warn => ("\x1b[33m", "PASSED WITH WARNINGS ⚠"),
            VerdictStatus::Block => ("\x1b[31m", "BLOCKED ✗"),
        };
        if self.use_color {
            format!("Result: {color}{text}\x1b[0m\n")
        } else {
            format!("Result: {text}\n")
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(infragate_core::constants::DEFAULT_CURRENCY, false)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, verdict: &GateVerdict) -> Result<String, GateError> {
        let mut output = String::new();
        let profile = verdict.severity_profile();
        let cost = verdict.cost();

        output.push_str("---- infragate ----\n");

        let counts: Vec<String> = Severity::all()
            .iter()
            .map(|s| format!("{s}: {}", profile.count(*s)))
            .collect();
        output.push_str(&format!(
            "Findings: {}  (total {}, blocking {})\n",
            counts.join("  "),
            profile.total(),
            profile.blocking()
        ));

        let pct = cost
            .increase_percent()
            .map(|p| format!(" ({p:+.2}%)"))
            .unwrap_or_default();
        output.push_str(&format!(
            "Cost delta: {}{} [{}]\n",
            signed_money(cost.delta.amount(), &self.currency),
            pct,
            cost.shape
        ));
        if let Some(base) = cost.base_total {
            output.push_str(&format!("Base total: {}\n", money(base, &self.currency)));
        }
        if let Some(proposed) = cost.proposed_total {
            output.push_str(&format!(
                "Proposed total: {}\n",
                money(proposed, &self.currency)
            ));
        }

        output.push_str(&format!("Policy: {}\n", verdict.policy().name()));
        for line in describe_thresholds(verdict.policy(), &self.currency) {
            output.push_str(&format!("  - {line}\n"));
        }

        if !verdict.reasons().is_empty() {
            output.push_str("Reasons:\n");
            for reason in verdict.reasons() {
                output.push_str(&format!("  ✗ {reason}\n"));
            }
        }
        if !verdict.warnings().is_empty() {
            output.push_str("Warnings:\n");
            for warning in verdict.warnings() {
                output.push_str(&format!("  ⚠ {warning}\n"));
            }
        }

        output.push_str(&self.status_line(verdict.status()));
        Ok(output)
    }
}
