//! Trust boundary between the remote catalog and the rest of the program.
//!
//! Every response crossing the boundary goes through the same pipeline:
//!
//! 1. the Content-Type header is canonicalized, parsed and checked against
//!    the [`ResponseValidator`];
//! 2. the body is decoded under the declared charset and normalized;
//! 3. the canonical text is parsed as JSON and optionally narrowed to one
//!    top-level key;
//! 4. the result is validated against the schema bound to the operation.
//!
//! Nothing is returned unless every step succeeds.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use scrybound_canonical::{
    parse_content_type, parse_json, Canonicalizer, Encoding, InputKind, NormalizationForm,
    RawInput,
};

use crate::errors::{BoundaryError, ConfigError};
use crate::response::ResponseValidator;
use crate::schema::SchemaNode;

const CONTENT_TYPE: &str = "Content-Type";

/// What an operation hands to the boundary: the raw header and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Text of the `Content-Type` header.
    pub content_type: String,
    /// Undecoded body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response from a header and body.
    pub fn new(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: content_type.into(),
            body: body.into(),
        }
    }
}

/// Validation bound to one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Schema the (filtered) payload must satisfy.
    pub schema: Arc<SchemaNode>,
    /// Top-level key to extract before validation.
    pub keyfilter: Option<String>,
    /// Normalization form applied to the decoded body.
    pub form: NormalizationForm,
}

impl Binding {
    /// Validates the whole document against `schema`.
    pub fn new(schema: impl Into<Arc<SchemaNode>>) -> Self {
        Self {
            schema: schema.into(),
            keyfilter: None,
            form: NormalizationForm::default(),
        }
    }

    /// Validates only the value under `key`.
    pub fn keyfilter(mut self, key: impl Into<String>) -> Self {
        self.keyfilter = Some(key.into());
        self
    }

    /// Overrides the normalization form.
    pub fn form(mut self, form: NormalizationForm) -> Self {
        self.form = form;
        self
    }
}

/// Immutable map from operation name to its [`Binding`].
#[derive(Debug, Clone, Default)]
pub struct BindingRegistry {
    bindings: BTreeMap<String, Binding>,
}

impl BindingRegistry {
    /// Starts building a registry.
    pub fn builder() -> BindingRegistryBuilder {
        BindingRegistryBuilder::default()
    }

    /// Binding for `operation`.
    pub fn get(&self, operation: &str) -> Result<&Binding, ConfigError> {
        self.bindings
            .get(operation)
            .ok_or_else(|| ConfigError::Unbound(operation.to_string()))
    }

    /// Fails on the first of `operations` without a binding.
    pub fn require(&self, operations: &[&str]) -> Result<(), ConfigError> {
        for operation in operations {
            self.get(operation)?;
        }
        Ok(())
    }

    /// Bound operation names, sorted.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Number of bound operations.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Builder for [`BindingRegistry`].
#[derive(Debug, Default)]
pub struct BindingRegistryBuilder {
    bindings: BTreeMap<String, Binding>,
}

impl BindingRegistryBuilder {
    /// Binds `operation`; each name may be bound once.
    pub fn bind(mut self, operation: impl Into<String>, binding: Binding) -> Result<Self, ConfigError> {
        let operation = operation.into();
        if self.bindings.contains_key(&operation) {
            return Err(ConfigError::DuplicateBinding(operation));
        }
        self.bindings.insert(operation, binding);
        Ok(self)
    }

    /// Freezes the registry.
    pub fn build(self) -> BindingRegistry {
        BindingRegistry {
            bindings: self.bindings,
        }
    }
}

/// Settings for the response envelope check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Only accepted media type.
    pub media_type: String,
    /// Only accepted charset.
    pub charset: String,
    /// Normalization form for bindings built from this config.
    pub form: NormalizationForm,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            media_type: "application/json".to_string(),
            charset: "utf-8".to_string(),
            form: NormalizationForm::Nfc,
        }
    }
}

/// Enforces bound validation on every operation result.
#[derive(Debug, Clone)]
pub struct TrustBoundary {
    registry: Arc<BindingRegistry>,
    response: ResponseValidator,
}

impl TrustBoundary {
    /// Boundary accepting `application/json; charset=utf-8`.
    pub fn new(registry: impl Into<Arc<BindingRegistry>>) -> Self {
        Self::with_config(registry, &BoundaryConfig::default())
    }

    /// Boundary using the media type and charset from `config`.
    pub fn with_config(registry: impl Into<Arc<BindingRegistry>>, config: &BoundaryConfig) -> Self {
        Self {
            registry: registry.into(),
            response: ResponseValidator::new(&config.media_type, &config.charset),
        }
    }

    /// Registry in use.
    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    /// Runs `op` and validates what it returns.
    ///
    /// The binding is looked up before `op` runs, so an unbound operation
    /// never performs I/O.
    pub fn call<F, E>(&self, operation: &str, op: F) -> Result<Value, BoundaryError>
    where
        F: FnOnce() -> Result<RawResponse, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let binding = self.registry.get(operation)?;
        let raw = op().map_err(|err| BoundaryError::Operation {
            operation: operation.to_string(),
            source: Box::new(err),
        })?;
        self.run(operation, binding, &raw)
    }

    /// Validates an already obtained response for `operation`.
    pub fn validate(&self, operation: &str, raw: &RawResponse) -> Result<Value, BoundaryError> {
        let binding = self.registry.get(operation)?;
        self.run(operation, binding, raw)
    }

    fn run(
        &self,
        operation: &str,
        binding: &Binding,
        raw: &RawResponse,
    ) -> Result<Value, BoundaryError> {
        let result = self.pipeline(operation, binding, raw);
        if let Err(err) = &result {
            warn!(operation = %operation, kind = ?err.kind(), error = %err, "response rejected");
        }
        result
    }

    fn pipeline(
        &self,
        operation: &str,
        binding: &Binding,
        raw: &RawResponse,
    ) -> Result<Value, BoundaryError> {
        let header = Canonicalizer::new(Encoding::Utf8, binding.form).canonicalize(
            CONTENT_TYPE,
            RawInput::Text(&raw.content_type),
            InputKind::Text,
        )?;
        let content_type = parse_content_type(&header)?;
        self.response.validate(&content_type)?;
        debug!(operation = %operation, content_type = %header, "content type accepted");

        let charset = content_type.charset().unwrap_or(self.response.charset());
        let encoding: Encoding = charset.parse()?;
        let canonical = Canonicalizer::new(encoding, binding.form).canonicalize_with_report(
            operation,
            RawInput::Bytes(&raw.body),
            InputKind::Bytes,
        )?;
        debug!(
            operation = %operation,
            bytes = raw.body.len(),
            status = ?canonical.report.status,
            "body decoded"
        );

        let value = parse_json(operation, &canonical.text, binding.keyfilter.as_deref())?;
        binding.schema.validate(&value, operation)?;
        debug!(operation = %operation, "structure validated");
        Ok(value)
    }
}
