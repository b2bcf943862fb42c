use serde_json::Value;
use std::io::{self, Read};

/// Portfolio piped on stdin, as JSON or YAML. `None` on an interactive
/// terminal, where commands fall back to their flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    read_piped(io::stdin().lock())
}

fn read_piped<R: Read>(mut reader: R) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| format!("Failed to read piped input: {e}"))?;
    parse_piped(&text)
}

/// Blank input is no input. Documents opening with `{` or `[` must be JSON;
/// anything else is read as YAML, e.g. `vdebt analyze < debts.yaml`.
fn parse_piped(text: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let body = text.trim();
    if body.is_empty() {
        return Ok(None);
    }

    let value: Value = if body.starts_with(['{', '[']) {
        serde_json::from_str(body)
            .map_err(|e| format!("Failed to parse piped input as JSON: {e}"))?
    } else {
        serde_yaml::from_str(body)
            .map_err(|e| format!("Failed to parse piped input as YAML: {e}"))?
    };
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_input_is_none() {
        assert!(parse_piped("").unwrap().is_none());
        assert!(parse_piped("  \n\t ").unwrap().is_none());
        assert!(read_piped("\n".as_bytes()).unwrap().is_none());
    }

    #[test]
    fn test_json_debt_list() {
        let value = read_piped(r#"[{"id": "card", "currentBalance": 1200}]"#.as_bytes())
            .unwrap()
            .unwrap();
        assert_eq!(value, json!([{"id": "card", "currentBalance": 1200}]));
    }

    #[test]
    fn test_yaml_portfolio() {
        let text = "extra_payment: 150\ndebts:\n  - id: card\n    current_balance: 900\n";
        let value = parse_piped(text).unwrap().unwrap();
        assert_eq!(value["extra_payment"], json!(150));
        assert_eq!(value["debts"][0]["id"], json!("card"));
    }

    #[test]
    fn test_malformed_json_names_the_format() {
        let err = parse_piped(r#"{"debts": ["#).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse piped input as JSON"));
    }
}
