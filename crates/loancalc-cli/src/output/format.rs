use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

/// Fields rendered as whole currency units in human-facing output.
const MONEY_FIELDS: &[&str] = &[
    "monthly_payment",
    "headline_payment",
    "total_interest",
    "total_repaid",
    "payment",
    "principal",
    "interest",
    "balance",
    "property_value",
    "loan_amount",
    "annual_income",
    "existing_monthly_debt",
];

/// Fields rendered as percentages with two decimals.
const PERCENT_FIELDS: &[&str] = &["ltv_percent", "dsr_percent"];

/// Round half away from zero to a whole unit and group thousands with
/// commas: 1234567.5 becomes "1,234,568".
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Human rendering of a result field: money rounded and grouped,
/// percentages to two places, everything else as-is.
pub fn display_field(key: &str, value: &Value) -> Option<String> {
    let number = decimal_of(value)?;
    if MONEY_FIELDS.contains(&key) {
        Some(format_amount(number))
    } else if PERCENT_FIELDS.contains(&key) {
        Some(format!("{}%", number.round_dp(2)))
    } else {
        None
    }
}

/// Decimals serialise as strings; accept either form.
fn decimal_of(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}
