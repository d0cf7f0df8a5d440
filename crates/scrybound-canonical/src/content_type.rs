//! Content-Type header parsing.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::format::FormatError;

/// Key under which the media type appears in [`ContentType::to_value`].
pub const MEDIA_TYPE_KEY: &str = "mediatype";

/// Parsed `Content-Type` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Lower-cased media type, e.g. `application/json`.
    pub media_type: String,
    /// Parameters keyed by lower-cased name.
    pub params: BTreeMap<String, String>,
}

impl ContentType {
    /// Declared `charset` parameter, if any.
    pub fn charset(&self) -> Option<&str> {
        self.param("charset")
    }

    /// Looks up a parameter by name (case-insensitive).
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Mapping form consumed by the response validator:
    /// `{"mediatype": ..., "<param>": ...}`.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            MEDIA_TYPE_KEY.to_string(),
            Value::String(self.media_type.clone()),
        );
        for (name, value) in &self.params {
            map.insert(name.clone(), Value::String(value.clone()));
        }
        Value::Object(map)
    }
}

/// Parses a header of the form `<media-type>; <name>=<value>; ...`.
///
/// # Errors
///
/// Returns [`FormatError::ContentTypeParameter`] when a parameter segment
/// has no `=`.
pub fn parse_content_type(header: &str) -> Result<ContentType, FormatError> {
    let mut segments = header.split(';');
    let media_type = segments
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let mut params = BTreeMap::new();
    for segment in segments {
        let segment = segment.trim();
        let (name, value) =
            segment
                .split_once('=')
                .ok_or_else(|| FormatError::ContentTypeParameter {
                    segment: segment.to_string(),
                })?;
        params.insert(
            name.trim().to_ascii_lowercase(),
            unquote(value.trim()).to_string(),
        );
    }

    Ok(ContentType { media_type, params })
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_values_are_unwrapped() {
        assert_eq!(unquote("\"utf-8\""), "utf-8");
        assert_eq!(unquote("\"utf-8"), "\"utf-8");
        assert_eq!(unquote("utf-8"), "utf-8");
    }
}
