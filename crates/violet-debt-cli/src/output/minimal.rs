use serde_json::{Map, Value};

use super::{payload, scalar_text};

/// Headline fields, most useful first.
const HEADLINE_KEYS: [&str; 5] = [
    "recommendation_text",
    "time_to_payoff",
    "months_to_payoff",
    "total_months",
    "total_interest",
];

/// Objects searched for headline fields after the payload itself.
const NESTED_SECTIONS: [&str; 2] = ["strategies", "summary"];

/// Print only the headline answer: the recommendation for an analysis, the
/// payoff time for a plan or single debt, one line per row for lists.
pub fn print_minimal(value: &Value) {
    let body = payload(value);

    match body {
        Value::Object(map) => match headline(map) {
            Some(text) => println!("{text}"),
            None => match map.iter().next() {
                Some((key, val)) => println!("{key}: {}", scalar_text(val)),
                None => println!(),
            },
        },
        Value::Array(items) => {
            for item in items {
                println!("{}", row_line(item));
            }
        }
        other => println!("{}", scalar_text(other)),
    }
}

fn headline(map: &Map<String, Value>) -> Option<String> {
    let direct = HEADLINE_KEYS
        .iter()
        .find_map(|key| map.get(*key).filter(|v| !v.is_null() && *v != ""));
    if let Some(val) = direct {
        return Some(scalar_text(val));
    }

    NESTED_SECTIONS
        .iter()
        .filter_map(|section| map.get(*section).and_then(Value::as_object))
        .find_map(headline)
}

fn row_line(item: &Value) -> String {
    let Value::Object(map) = item else {
        return scalar_text(item);
    };
    if let (Some(title), Some(message)) = (map.get("title"), map.get("message")) {
        return format!("{}: {}", scalar_text(title), scalar_text(message));
    }
    if let (Some(extra), Some(time)) = (map.get("extra_payment"), map.get("time_to_payoff")) {
        return format!("+{}: {}", scalar_text(extra), scalar_text(time));
    }
    map.values().map(scalar_text).collect::<Vec<_>>().join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_recommendation_is_headline() {
        let map = json!({
            "strategies": {"recommendation_text": "Either method works well: ok"},
            "avalanche_plan": {}
        });
        assert_eq!(
            headline(map.as_object().unwrap()).as_deref(),
            Some("Either method works well: ok")
        );
    }

    #[test]
    fn test_empty_recommendation_falls_through() {
        let map = json!({"recommendation_text": "", "total_months": 0});
        assert_eq!(headline(map.as_object().unwrap()).as_deref(), Some("0"));
    }

    #[test]
    fn test_row_lines() {
        assert_eq!(
            row_line(&json!({"type": "tip", "title": "T", "message": "M"})),
            "T: M"
        );
        assert_eq!(
            row_line(&json!({"extra_payment": "50", "time_to_payoff": "2 years 1 months"})),
            "+50: 2 years 1 months"
        );
    }
}
