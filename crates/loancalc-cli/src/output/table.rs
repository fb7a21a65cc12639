use colored::Colorize;
use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::format::display_field;
use super::{leaf, partition_result, result_of, row_headers};

/// Human-readable tables: result fields, then each row array (the repayment
/// schedule), then warnings and methodology.
pub fn print_table(value: &Value) {
    let result = result_of(value);
    let (scalars, tables) = partition_result(result);

    if !scalars.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &scalars {
            builder.push_record([key.clone(), render_cell(key, val)]);
        }
        println!("{}", Table::from(builder));
    }

    for (name, rows) in &tables {
        println!("\n{}", name);
        print_rows(rows);
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_rows(rows: &[Value]) {
    match rows_table(rows) {
        Some(table) => println!("{}", table),
        None => println!("(empty)"),
    }
}

fn rows_table(rows: &[Value]) -> Option<Table> {
    let Some(Value::Object(first)) = rows.first() else {
        return None;
    };

    let headers = row_headers(first);
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| {
                    map.get(h.as_str())
                        .map(|v| render_cell(h, v))
                        .unwrap_or_default()
                })
                .collect();
            builder.push_record(row);
        }
    }

    Some(Table::from(builder))
}

fn render_cell(key: &str, value: &Value) -> String {
    let field = leaf(key);
    if field.ends_with("_status") {
        if let Value::String(tier) = value {
            return colour_tier(tier);
        }
    }
    display_field(field, value).unwrap_or_else(|| format_value(value))
}

fn colour_tier(tier: &str) -> String {
    match tier {
        "Good" => tier.green().to_string(),
        "Caution" => tier.yellow().to_string(),
        "Risk" => tier.red().bold().to_string(),
        other => other.to_string(),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
