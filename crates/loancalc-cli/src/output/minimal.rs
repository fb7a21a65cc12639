use serde_json::Value;

use super::format::display_field;
use super::{partition_result, result_of};

/// Priority of the single figure worth printing, per command.
const PRIORITY_KEYS: &[&str] = &[
    "monthly_payment",
    "headline_payment",
    "ltv_percent",
];

/// Print just the key answer: the monthly payment for evaluations and
/// payment queries, the headline payment for schedules, LTV for risk.
pub fn print_minimal(value: &Value) {
    let (scalars, _) = partition_result(result_of(value));

    for key in PRIORITY_KEYS {
        let hit = scalars
            .iter()
            .find(|(k, v)| super::leaf(k) == *key && !v.is_null());
        if let Some((_, val)) = hit {
            println!("{}", display_field(key, val).unwrap_or_else(|| format_minimal(val)));
            return;
        }
    }

    if let Some((key, val)) = scalars.first() {
        println!("{}: {}", key, format_minimal(val));
        return;
    }

    println!("{}", format_minimal(result_of(value)));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
