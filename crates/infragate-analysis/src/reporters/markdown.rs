//! Markdown reporter — CI job step summary.

use infragate_core::errors::GateError;

use super::{describe_thresholds, money, signed_money, Reporter};
use crate::normalize::Severity;
use crate::policy::{GateVerdict, VerdictStatus};

pub struct MarkdownReporter {
    pub currency: String,
}

impl MarkdownReporter {
    pub fn new(currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
        }
    }
}

impl Reporter for MarkdownReporter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn generate(&self, verdict: &GateVerdict) -> Result<String, GateError> {
        let profile = verdict.severity_profile();
        let cost = verdict.cost();
        let mut out = String::new();

        let heading = match verdict.status() {
            VerdictStatus::Pass => "✅ Passed",
            VerdictStatus::Warn => "⚠️ Passed with warnings",
            VerdictStatus::Block => "❌ Blocked",
        };
        out.push_str(&format!("## Infrastructure gate: {heading}\n\n"));

        out.push_str("| Severity | Findings |\n|---|---:|\n");
        for severity in Severity::all() {
            out.push_str(&format!("| {severity} | {} |\n", profile.count(*severity)));
        }
        out.push_str(&format!("| **Total** | **{}** |\n\n", profile.total()));

        out.push_str(&format!(
            "**Monthly cost delta:** {}",
            signed_money(cost.delta.amount(), &self.currency)
        ));
        if let Some(pct) = cost.increase_percent() {
            out.push_str(&format!(" ({pct:+.2}%)"));
        }
        out.push('\n');
        if let (Some(base), Some(proposed)) = (cost.base_total, cost.proposed_total) {
            out.push_str(&format!(
                "\nBase {} → proposed {}\n",
                money(base, &self.currency),
                money(proposed, &self.currency)
            ));
        }

        out.push_str(&format!("\n**Policy:** `{}`\n", verdict.policy().name()));
        for line in describe_thresholds(verdict.policy(), &self.currency) {
            out.push_str(&format!("- {line}\n"));
        }

        if !verdict.reasons().is_empty() {
            out.push_str("\n### Blocking reasons\n");
            for reason in verdict.reasons() {
                out.push_str(&format!("- {reason}\n"));
            }
        }
        if !verdict.warnings().is_empty() {
            out.push_str("\n### Warnings\n");
            for warning in verdict.warnings() {
                out.push_str(&format!("- {warning}\n"));
            }
        }
        Ok(out)
    }
}
