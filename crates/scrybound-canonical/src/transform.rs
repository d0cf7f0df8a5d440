//! Canonical text to structured data.

use serde_json::Value;

use crate::format::FormatError;

const JSON: &str = "JSON";

/// Parses canonical text as JSON.
pub fn parse(name: &str, text: &str) -> Result<Value, FormatError> {
    serde_json::from_str(text).map_err(|err| FormatError::Malformed {
        name: name.to_string(),
        format: JSON,
        detail: err.to_string(),
    })
}

/// Extracts `key` from a parsed top-level mapping.
///
/// A top-level value that is not a mapping has no keys, so it fails the same
/// way as a mapping without `key`.
pub fn extract(name: &str, value: Value, key: &str) -> Result<Value, FormatError> {
    match value {
        Value::Object(mut map) => map.remove(key).ok_or_else(|| FormatError::MissingKey {
            name: name.to_string(),
            key: key.to_string(),
        }),
        _ => Err(FormatError::MissingKey {
            name: name.to_string(),
            key: key.to_string(),
        }),
    }
}

/// Parses `text` and applies the optional key filter.
pub fn parse_json(name: &str, text: &str, keyfilter: Option<&str>) -> Result<Value, FormatError> {
    let value = parse(name, text)?;
    match keyfilter {
        Some(key) => extract(name, value, key),
        None => Ok(value),
    }
}
