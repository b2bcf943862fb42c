use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{is_record_list, payload, scalar_text};

/// Per-month rows are long; the terminal view shows this many.
const TABLE_MONTHS: usize = 24;

/// Format output as tables: scalar fields in a Field/Value table, every list
/// of records as its own titled table, nested objects as titled sections.
pub fn print_table(value: &Value) {
    print_section(None, payload(value));

    if let Value::Object(envelope) = value {
        if let Some(Value::Array(warnings)) = envelope.get("warnings") {
            if !warnings.is_empty() {
                println!("\nWarnings:");
                for w in warnings.iter().filter_map(Value::as_str) {
                    println!("  - {w}");
                }
            }
        }
        if let Some(Value::String(methodology)) = envelope.get("methodology") {
            println!("\nMethodology: {methodology}");
        }
    }
}

fn print_section(title: Option<&str>, value: &Value) {
    match value {
        Value::Object(map) => print_object(title, map),
        Value::Array(items) if is_record_list(value) => {
            print_title(title);
            print_records(title, items);
        }
        other => {
            print_title(title);
            println!("{}", scalar_text(other));
        }
    }
}

fn print_title(title: Option<&str>) {
    if let Some(t) = title {
        println!("\n{t}");
    }
}

fn print_object(title: Option<&str>, map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut scalars = 0;
    for (key, val) in map {
        if val.is_object() || is_record_list(val) {
            continue;
        }
        builder.push_record([key.as_str(), &list_text(val)]);
        scalars += 1;
    }
    if scalars > 0 {
        print_title(title);
        println!("{}", Table::from(builder));
    }

    for (key, val) in map {
        if val.is_object() || is_record_list(val) {
            let nested = match title {
                Some(t) => format!("{t}.{key}"),
                None => key.clone(),
            };
            print_section(Some(&nested), val);
        }
    }
}

fn print_records(title: Option<&str>, items: &[Value]) {
    let Some(Value::Object(first)) = items.first() else {
        return;
    };
    let headers: Vec<String> = first.keys().cloned().collect();
    let limit = if title.is_some_and(|t| t.ends_with("monthly_breakdown")) {
        TABLE_MONTHS
    } else {
        items.len()
    };

    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(String::as_str));
    for item in items.iter().take(limit) {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(cell_text).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
    if items.len() > limit {
        println!("... {} more rows (use --output csv for all)", items.len() - limit);
    }
}

/// Cells inside record tables: nested per-debt rows collapse to a count.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Array(items) if is_record_list(value) => format!("[{} rows]", items.len()),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{k}={}", scalar_text(v)))
            .collect::<Vec<_>>()
            .join(" "),
        other => list_text(other),
    }
}

fn list_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
        Value::Null => "-".to_string(),
        other => scalar_text(other),
    }
}
