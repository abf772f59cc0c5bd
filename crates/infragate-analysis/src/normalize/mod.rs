//! Normalizer — turns loosely-structured report trees into canonical records.
//!
//! - `severity`: failed checks → `SeverityProfile`
//! - `cost`: one to three cost documents → `CostSummary` / `CostDelta`
//! - `paths`: the explicit field-path priority lists both extractors use
//! - `coerce`: tolerant number coercion for cost amounts

pub mod coerce;
pub mod cost;
pub mod paths;
pub mod severity;

pub use coerce::{amount_or_zero, coerce_amount};
pub use cost::{extract_cost, round_cents, CostDelta, CostReports, CostShape, CostSummary};
pub use severity::{finding_severity, severity_profile, Severity, SeverityProfile};
