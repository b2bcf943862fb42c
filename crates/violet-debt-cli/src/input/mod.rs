pub mod file;
pub mod stdin;

use serde_json::Value;

/// Input from `--input <path>` when given, else from piped stdin.
pub fn read_input(path: Option<&str>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Some(file::read_value(path)?)),
        None => stdin::read_stdin(),
    }
}
