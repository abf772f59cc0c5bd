//! Tolerant coercion of cost amounts.
//!
//! Upstream tools emit amounts as JSON numbers or as strings such as
//! `"$1,234.50"`. Strings keep only ASCII digits, signs and the decimal
//! point before parsing.
//!
//! Amounts are carried as `f64` but added and rounded as decimals, read from
//! the shortest text that round-trips the `f64`.

use rust_decimal::Decimal;
use serde_json::Value;

/// Coerce a JSON value to a finite amount. `None` when it cannot be read.
pub fn coerce_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let cleaned: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
                .collect();
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok()?
        }
        _ => return None,
    };
    amount.is_finite().then_some(amount)
}

/// Coerce a present field, substituting `0.0` when it cannot be read.
pub fn amount_or_zero(value: &Value) -> f64 {
    coerce_amount(value).unwrap_or(0.0)
}

/// Decimal form of an amount: `1.005` becomes the decimal `1.005`, not its
/// binary neighbour `1.00499999999999989...`. `None` for non-finite amounts
/// and amounts outside `Decimal` range or precision.
pub fn to_decimal(amount: f64) -> Option<Decimal> {
    if !amount.is_finite() {
        return None;
    }
    amount.to_string().parse().ok()
}

/// Nearest `f64` to a decimal.
pub fn from_decimal(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

/// Sum amounts as decimals. Falls back to `f64` addition when an amount has
/// no decimal form or the sum overflows.
pub fn decimal_sum<I: IntoIterator<Item = f64>>(amounts: I) -> f64 {
    let amounts: Vec<f64> = amounts.into_iter().collect();
    amounts
        .iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(to_decimal(*amount)?))
        .map(from_decimal)
        .unwrap_or_else(|| amounts.iter().sum())
}
