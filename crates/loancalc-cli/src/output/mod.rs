pub mod csv_out;
pub mod format;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` object of a computation envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Split a result object into scalar fields (nested objects flattened as
/// `parent.child`) and named row arrays such as the repayment schedule.
pub(crate) fn partition_result(result: &Value) -> (Vec<(String, Value)>, Vec<(String, Vec<Value>)>) {
    let mut scalars = Vec::new();
    let mut tables = Vec::new();
    collect(result, "", &mut scalars, &mut tables);
    (scalars, tables)
}

fn collect(
    value: &Value,
    prefix: &str,
    scalars: &mut Vec<(String, Value)>,
    tables: &mut Vec<(String, Vec<Value>)>,
) {
    let Value::Object(map) = value else {
        scalars.push((prefix.to_string(), value.clone()));
        return;
    };
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(_) => collect(val, &path, scalars, tables),
            Value::Array(rows) if rows.iter().all(Value::is_object) && !rows.is_empty() => {
                tables.push((path, rows.clone()));
            }
            _ => scalars.push((path, val.clone())),
        }
    }
}

/// Schedule row columns, in the order a row is defined.
const ROW_COLUMNS: &[&str] = &["month", "payment", "principal", "interest", "balance"];

/// Headers for a row table: known row columns in definition order, then any
/// other keys of the first row.
pub(crate) fn row_headers(first: &Map<String, Value>) -> Vec<String> {
    let known = ROW_COLUMNS
        .iter()
        .filter(|c| first.contains_key(**c))
        .map(|c| c.to_string());
    let rest = first
        .keys()
        .filter(|k| !ROW_COLUMNS.contains(&k.as_str()))
        .cloned();
    known.chain(rest).collect()
}

/// Last segment of a flattened key.
pub(crate) fn leaf(key: &str) -> &str {
    key.rsplit('.').next().unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partition_flattens_and_extracts_rows() {
        let result = json!({
            "monthly_payment": "157.17",
            "risk": { "ltv_percent": "70", "ltv_status": "Good" },
            "repayment": {
                "kind": "equal-payment",
                "schedule": [ { "month": 1, "payment": "157.17" } ]
            }
        });
        let (scalars, tables) = partition_result(&result);
        let keys: Vec<&str> = scalars.iter().map(|(k, _)| k.as_str()).collect();
        assert!(keys.contains(&"monthly_payment"));
        assert!(keys.contains(&"risk.ltv_status"));
        assert!(keys.contains(&"repayment.kind"));
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].0, "repayment.schedule");
    }

    #[test]
    fn test_result_of_unwraps_envelope() {
        let env = json!({ "result": { "a": 1 }, "warnings": [] });
        assert_eq!(result_of(&env), &json!({ "a": 1 }));
        let bare = json!({ "a": 1 });
        assert_eq!(result_of(&bare), &bare);
    }

    #[test]
    fn test_row_headers_follow_row_definition() {
        let row = json!({
            "balance": "11000",
            "interest": "60",
            "month": 1,
            "payment": "1060",
            "principal": "1000"
        });
        let Value::Object(map) = row else { unreachable!() };
        assert_eq!(
            row_headers(&map),
            vec!["month", "payment", "principal", "interest", "balance"]
        );
    }

    #[test]
    fn test_leaf() {
        assert_eq!(leaf("risk.ltv_percent"), "ltv_percent");
        assert_eq!(leaf("balance"), "balance");
    }
}
