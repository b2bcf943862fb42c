use serde_json::{Map, Value};
use std::io;

use super::{is_record_list, payload, scalar_text};

/// Lists exported as rows when present in an object payload, in priority order.
const ROW_SECTIONS: [&str; 3] = ["monthly_breakdown", "payoff_events", "debts"];

/// Write output as CSV to stdout.
///
/// Lists of records become one row per record. An object with a payoff
/// schedule exports the schedule; any other object flattens to
/// `field,value` pairs with dotted paths.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let body = payload(value);
    let result = match body {
        Value::Array(items) => write_rows(&mut wtr, items),
        Value::Object(map) => match ROW_SECTIONS
            .iter()
            .find_map(|key| map.get(*key).filter(|v| is_record_list(v)))
        {
            Some(Value::Array(items)) => write_rows(&mut wtr, items),
            _ => write_fields(&mut wtr, map),
        },
        other => wtr.write_record([scalar_text(other)]),
    };

    if let Err(e) = result.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        tracing::error!(error = %e, "failed to write CSV output");
    }
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, items: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = items.first() else {
        for item in items {
            wtr.write_record([scalar_text(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<String> = first
        .iter()
        .filter(|(_, v)| !is_record_list(v))
        .map(|(k, _)| k.clone())
        .collect();
    wtr.write_record(&headers)?;

    for item in items {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(scalar_text).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, map: &Map<String, Value>) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    let mut pairs = Vec::new();
    flatten("", map, &mut pairs);
    for (field, value) in pairs {
        wtr.write_record([field, value])?;
    }
    Ok(())
}

fn flatten(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, String)>) {
    for (key, val) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten(&path, inner, out),
            // Schedules are too wide for field/value form.
            _ if is_record_list(val) => {}
            Value::Array(items) => out.push((
                path,
                items.iter().map(scalar_text).collect::<Vec<_>>().join(";"),
            )),
            other => out.push((path, scalar_text(other))),
        }
    }
}
