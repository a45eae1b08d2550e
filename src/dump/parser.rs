//! Record parser
//!
//! Dump lines may carry arbitrary text before the JSON payload (type, key,
//! revision and timestamp columns in tab-separated dumps, line numbers, log
//! noise). The payload starts at the first `{`.

use serde_json::{Map, Value};

use crate::error::LineError;

/// A parsed dump record
pub type Record = Map<String, Value>;

/// Parse one raw dump line into a JSON object.
pub fn parse_record(line: &str) -> Result<Record, LineError> {
    let start = line
        .find('{')
        .ok_or_else(|| LineError::Parse("no JSON object on line".to_string()))?;

    match serde_json::from_str::<Value>(&line[start..]) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(LineError::Parse("payload is not a JSON object".to_string())),
        Err(e) => Err(LineError::Parse(e.to_string())),
    }
}

/// String field, or an empty string when absent or not a string
pub fn opt_string(record: &Record, field: &str) -> String {
    record
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Nested object field, if present and an object
pub fn opt_object<'a>(record: &'a Record, field: &str) -> Option<&'a Record> {
    record.get(field).and_then(Value::as_object)
}

/// Array field, if present and an array
pub fn opt_array<'a>(record: &'a Record, field: &str) -> Option<&'a Vec<Value>> {
    record.get(field).and_then(Value::as_array)
}

/// Coerce a JSON scalar to its string form. Strings are taken verbatim,
/// anything else as its JSON text (`101` becomes `"101"`).
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Remove a literal key prefix. Keys without the prefix are returned as is.
pub fn strip_key_prefix<'a>(key: &'a str, prefix: &str) -> &'a str {
    key.strip_prefix(prefix).unwrap_or(key)
}
