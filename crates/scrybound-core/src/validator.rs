//! Recursive structural validator.
//!
//! One entry point, [`validate`], dispatches on the [`SchemaNode`] variant to
//! the four rule validators below. Validators are pure functions of
//! `(value, name, rule)`: no state survives between calls, and the first
//! failure propagates unchanged to the caller.

use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::errors::ValidationError;
use crate::schema::{type_name, MappingRule, ScalarRule, SchemaNode, SequenceRule, UrlRule};
use crate::url::split_url;

/// Validates `value` against `node`.
pub fn validate(value: &Value, name: &str, node: &SchemaNode) -> Result<(), ValidationError> {
    match node {
        SchemaNode::Scalar(rule) => validate_scalar(value, name, rule),
        SchemaNode::Sequence(rule) => validate_sequence(value, name, rule),
        SchemaNode::Mapping(rule) => validate_mapping(value, name, rule),
        SchemaNode::Url(rule) => validate_url(value, name, rule),
    }
}

fn child_name(name: &str, segment: impl std::fmt::Display) -> String {
    format!("{}:{}", name, segment)
}

fn type_error(name: &str, expected: impl Into<String>, value: &Value) -> ValidationError {
    ValidationError::Type {
        name: name.to_string(),
        expected: expected.into(),
        found: type_name(value).to_string(),
    }
}

/// Validates a primitive value.
pub fn validate_scalar(value: &Value, name: &str, rule: &ScalarRule) -> Result<(), ValidationError> {
    if !rule.types.iter().any(|ty| ty.matches(value)) {
        let expected = rule
            .types
            .iter()
            .map(|ty| ty.name())
            .collect::<Vec<_>>()
            .join(" or ");
        return Err(type_error(name, expected, value));
    }

    if rule.min.is_some() || rule.max.is_some() {
        let number = value
            .as_f64()
            .ok_or_else(|| type_error(name, "number", value))?;
        if let Some(min) = rule.min {
            if number < min {
                return Err(ValidationError::BelowMinimum {
                    name: name.to_string(),
                    min,
                });
            }
        }
        if let Some(max) = rule.max {
            if number > max {
                return Err(ValidationError::AboveMaximum {
                    name: name.to_string(),
                    max,
                });
            }
        }
    }

    if rule.minlen.is_some() || rule.maxlen.is_some() {
        let length = value
            .as_str()
            .map(|s| s.chars().count())
            .ok_or_else(|| type_error(name, "text", value))?;
        if let Some(minlen) = rule.minlen {
            if length < minlen {
                return Err(ValidationError::TooShort {
                    name: name.to_string(),
                    minlen,
                });
            }
        }
        if let Some(maxlen) = rule.maxlen {
            if length > maxlen {
                return Err(ValidationError::TooLong {
                    name: name.to_string(),
                    maxlen,
                });
            }
        }
    }

    if let Some(pattern) = &rule.pattern {
        let text = value
            .as_str()
            .ok_or_else(|| type_error(name, "text", value))?;
        if !pattern.is_match(text) {
            return Err(ValidationError::PatternMismatch {
                name: name.to_string(),
                pattern: pattern.as_str().to_string(),
            });
        }
    }

    if let Some(choices) = &rule.choices {
        if !choices.contains(value) {
            return Err(ValidationError::NotInEnum {
                name: name.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates every element of a sequence; element `i` is named `name:i`.
pub fn validate_sequence(
    value: &Value,
    name: &str,
    rule: &SequenceRule,
) -> Result<(), ValidationError> {
    let items = value
        .as_array()
        .ok_or_else(|| type_error(name, "sequence", value))?;
    for (index, item) in items.iter().enumerate() {
        validate(item, &child_name(name, index), &rule.element)?;
    }
    Ok(())
}

/// Validates a closed mapping; the value under `key` is named `name:key`.
pub fn validate_mapping(
    value: &Value,
    name: &str,
    rule: &MappingRule,
) -> Result<(), ValidationError> {
    let map: &Map<String, Value> = value
        .as_object()
        .ok_or_else(|| type_error(name, "mapping", value))?;

    let mut remaining: BTreeSet<&str> = rule.required.keys().map(String::as_str).collect();

    for (key, item) in map {
        if remaining.remove(key.as_str()) {
            validate(item, &child_name(name, key), &rule.required[key])?;
        } else if let Some(node) = rule.optional.get(key) {
            validate(item, &child_name(name, key), node)?;
        } else {
            return Err(ValidationError::UnknownKey {
                name: name.to_string(),
                key: key.clone(),
            });
        }
    }

    if !remaining.is_empty() {
        return Err(ValidationError::MissingKeys {
            name: name.to_string(),
            keys: remaining.into_iter().map(str::to_string).collect(),
        });
    }
    Ok(())
}

/// Validates URL-shaped text component by component.
pub fn validate_url(value: &Value, name: &str, rule: &UrlRule) -> Result<(), ValidationError> {
    let text = value
        .as_str()
        .ok_or_else(|| type_error(name, "text", value))?;
    let parts = split_url(text);

    let checks = [
        ("scheme", &rule.scheme, &*parts.scheme),
        ("netloc", &rule.netloc, parts.netloc),
        ("path", &rule.path, parts.path),
        ("params", &rule.params, parts.params),
        ("query", &rule.query, parts.query),
        ("fragment", &rule.fragment, parts.fragment),
    ];
    for (component, expected, actual) in checks {
        if let Some(expected) = expected {
            if expected != actual {
                return Err(ValidationError::UrlComponent {
                    name: name.to_string(),
                    component,
                });
            }
        }
    }
    Ok(())
}
