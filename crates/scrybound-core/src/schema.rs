//! Declarative schema nodes.
//!
//! A [`SchemaNode`] is pure data describing how one value is validated. Nodes
//! compose by reference: mapping and sequence rules hold their children behind
//! `Arc`, so a leaf rule such as "UUID text" is built once and shared by every
//! object shape that uses it.

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::{ConfigError, ValidationError};
use crate::validator;

/// Primitive types a scalar rule can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// JSON `true`/`false`.
    Boolean,
    /// JSON number stored as a signed or unsigned 64-bit integer.
    Integer,
    /// JSON number stored as a float (written with a fraction or exponent).
    Float,
    /// JSON string.
    Text,
}

impl ScalarType {
    /// Exact type test; booleans are never numbers and integers are never floats.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (ScalarType::Boolean, Value::Bool(_)) => true,
            (ScalarType::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (ScalarType::Float, Value::Number(n)) => n.is_f64(),
            (ScalarType::Text, Value::String(_)) => true,
            _ => false,
        }
    }

    /// Name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Boolean => "boolean",
            ScalarType::Integer => "integer",
            ScalarType::Float => "float",
            ScalarType::Text => "text",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of a value's runtime type, as reported in type errors.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "text",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Regular expression anchored at the start of the value.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `source` so that it only matches at the start of a string.
    pub fn new(source: impl Into<String>) -> Result<Self, ConfigError> {
        let source = source.into();
        let regex =
            Regex::new(&format!("^(?:{})", source)).map_err(|err| ConfigError::InvalidPattern {
                pattern: source.clone(),
                reason: err.to_string(),
            })?;
        Ok(Self { source, regex })
    }

    /// Whether `text` matches from its first character.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Constraints on a primitive value.
///
/// Checks run in the order type, min, max, minlen, maxlen, pattern, enum and
/// stop at the first failure. A constraint left as `None` is not checked;
/// `Some(0)` is a real bound.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarRule {
    /// Accepted types; the value must match one exactly.
    pub types: Vec<ScalarType>,
    /// Inclusive numeric minimum.
    pub min: Option<f64>,
    /// Inclusive numeric maximum.
    pub max: Option<f64>,
    /// Inclusive minimum length in characters.
    pub minlen: Option<usize>,
    /// Inclusive maximum length in characters.
    pub maxlen: Option<usize>,
    /// Start-anchored pattern.
    pub pattern: Option<Pattern>,
    /// Allowed values.
    pub choices: Option<Vec<Value>>,
}

impl ScalarRule {
    /// Rule accepting a single type.
    pub fn new(ty: ScalarType) -> Self {
        Self::any_of([ty])
    }

    /// Rule accepting any of `types`.
    pub fn any_of(types: impl IntoIterator<Item = ScalarType>) -> Self {
        Self {
            types: types.into_iter().collect(),
            min: None,
            max: None,
            minlen: None,
            maxlen: None,
            pattern: None,
            choices: None,
        }
    }

    /// Sets the numeric minimum.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the numeric maximum.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the minimum length.
    pub fn minlen(mut self, minlen: usize) -> Self {
        self.minlen = Some(minlen);
        self
    }

    /// Sets the maximum length.
    pub fn maxlen(mut self, maxlen: usize) -> Self {
        self.maxlen = Some(maxlen);
        self
    }

    /// Sets the pattern.
    pub fn pattern(mut self, source: impl Into<String>) -> Result<Self, ConfigError> {
        self.pattern = Some(Pattern::new(source)?);
        Ok(self)
    }

    /// Restricts the value to `choices`.
    pub fn one_of<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }
}

/// Applies one node to every element of a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRule {
    /// Rule for each element.
    pub element: Arc<SchemaNode>,
}

/// Closed mapping: every present key must be a required or optional key,
/// and every required key must be present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MappingRule {
    /// Keys that must be present.
    pub required: BTreeMap<String, Arc<SchemaNode>>,
    /// Keys that may be present.
    pub optional: BTreeMap<String, Arc<SchemaNode>>,
}

impl MappingRule {
    /// Empty mapping rule (accepts only `{}`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required key.
    pub fn require(mut self, key: impl Into<String>, node: impl Into<Arc<SchemaNode>>) -> Self {
        self.required.insert(key.into(), node.into());
        self
    }

    /// Adds an optional key.
    pub fn optional(mut self, key: impl Into<String>, node: impl Into<Arc<SchemaNode>>) -> Self {
        self.optional.insert(key.into(), node.into());
        self
    }
}

/// Expected URL components; `None` leaves a component unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlRule {
    /// Scheme, e.g. `https`.
    pub scheme: Option<String>,
    /// Network location, e.g. `api.scryfall.com`.
    pub netloc: Option<String>,
    /// Path.
    pub path: Option<String>,
    /// `;` parameters of the last path segment.
    pub params: Option<String>,
    /// Query string without `?`.
    pub query: Option<String>,
    /// Fragment without `#`.
    pub fragment: Option<String>,
}

impl UrlRule {
    /// Unconstrained URL rule (any text).
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule for `scheme://netloc/...` URLs.
    pub fn host(scheme: impl Into<String>, netloc: impl Into<String>) -> Self {
        Self::new().scheme(scheme).netloc(netloc)
    }

    /// Constrains the scheme.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Constrains the network location.
    pub fn netloc(mut self, netloc: impl Into<String>) -> Self {
        self.netloc = Some(netloc.into());
        self
    }

    /// Constrains the path.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Constrains the path parameters.
    pub fn params(mut self, params: impl Into<String>) -> Self {
        self.params = Some(params.into());
        self
    }

    /// Constrains the query string.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Constrains the fragment.
    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }
}

/// A declarative description of one value.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Primitive value.
    Scalar(ScalarRule),
    /// Homogeneous sequence.
    Sequence(SequenceRule),
    /// Closed mapping.
    Mapping(MappingRule),
    /// URL-shaped text.
    Url(UrlRule),
}

impl SchemaNode {
    /// Sequence whose elements all satisfy `element`.
    pub fn sequence_of(element: impl Into<Arc<SchemaNode>>) -> Self {
        SchemaNode::Sequence(SequenceRule {
            element: element.into(),
        })
    }

    /// Validates `value`, naming it `name` in errors.
    pub fn validate(&self, value: &Value, name: &str) -> Result<(), ValidationError> {
        validator::validate(value, name, self)
    }
}

impl From<ScalarRule> for SchemaNode {
    fn from(rule: ScalarRule) -> Self {
        SchemaNode::Scalar(rule)
    }
}

impl From<SequenceRule> for SchemaNode {
    fn from(rule: SequenceRule) -> Self {
        SchemaNode::Sequence(rule)
    }
}

impl From<MappingRule> for SchemaNode {
    fn from(rule: MappingRule) -> Self {
        SchemaNode::Mapping(rule)
    }
}

impl From<UrlRule> for SchemaNode {
    fn from(rule: UrlRule) -> Self {
        SchemaNode::Url(rule)
    }
}

impl From<ScalarRule> for Arc<SchemaNode> {
    fn from(rule: ScalarRule) -> Self {
        Arc::new(rule.into())
    }
}

impl From<MappingRule> for Arc<SchemaNode> {
    fn from(rule: MappingRule) -> Self {
        Arc::new(rule.into())
    }
}

impl From<UrlRule> for Arc<SchemaNode> {
    fn from(rule: UrlRule) -> Self {
        Arc::new(rule.into())
    }
}
