//! Reporters — output formats for gate verdicts.
//!
//! 3 formats: console text, JSON, and markdown for CI step summaries.

pub mod console;
pub mod json;
pub mod markdown;

use infragate_core::config::report_config::REPORT_FORMATS;
use infragate_core::errors::GateError;

use crate::policy::{GatePolicy, GateVerdict};

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, verdict: &GateVerdict) -> Result<String, GateError>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str, currency: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "console" => Some(Box::new(console::ConsoleReporter::new(currency, false))),
        "json" => Some(Box::new(json::JsonReporter::new(currency))),
        "markdown" => Some(Box::new(markdown::MarkdownReporter::new(currency))),
        _ => None,
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    REPORT_FORMATS
}

/// Format an amount with two decimals and a currency label.
pub(crate) fn money(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

/// Signed variant of `money` for deltas.
pub(crate) fn signed_money(amount: f64, currency: &str) -> String {
    format!("{amount:+.2} {currency}")
}

/// One line per configured threshold.
pub(crate) fn describe_thresholds(policy: &GatePolicy, currency: &str) -> Vec<String> {
    let limit = |v: Option<u64>| v.map_or_else(|| "unbounded".to_string(), |n| n.to_string());
    match policy {
        GatePolicy::BoundedSeverity(p) => {
            let mut lines = vec![format!(
                "max CRITICAL {}, HIGH {}, MEDIUM {}, LOW {}",
                limit(p.limits.max_critical),
                limit(p.limits.max_high),
                limit(p.limits.max_medium),
                limit(p.limits.max_low),
            )];
            if let Some(max) = p.max_cost_delta {
                lines.push(format!("max cost increase {}", money(max, currency)));
            }
            if let Some(pct) = p.max_cost_increase_percent {
                lines.push(format!("max cost increase {pct:.2}%"));
            }
            lines
        }
        GatePolicy::CostTier(p) => vec![
            "any CRITICAL/HIGH finding blocks".to_string(),
            format!("warn at {}", money(p.cost_warn, currency)),
            format!("block at {}", money(p.cost_block, currency)),
        ],
    }
}
