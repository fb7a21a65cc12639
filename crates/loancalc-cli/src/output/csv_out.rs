use serde_json::Value;
use std::io;

use super::{partition_result, result_of, row_headers};

/// CSV to stdout at full precision.
///
/// When the result carries a row array (the repayment schedule) the rows
/// are written with a header line; otherwise a two-column field,value list.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let (scalars, tables) = partition_result(result_of(value));

    match tables.first() {
        Some((_, rows)) => write_rows(&mut wtr, rows),
        None => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in &scalars {
                let _ = wtr.write_record([key.as_str(), format_csv_value(val).as_str()]);
            }
        }
    }

    let _ = wtr.flush();
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };
    let headers = row_headers(first);
    let _ = wtr.write_record(&headers);

    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
