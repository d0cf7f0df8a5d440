//! Structural validation and trust-boundary enforcement for catalog responses.
//!
//! This crate provides:
//! - Declarative schema nodes (scalar, sequence, closed mapping, URL)
//! - A recursive validator that names failures by colon-separated path
//! - The response validator for the Content-Type envelope
//! - The trust boundary that binds a schema to every remote operation
//!
//! Core invariants:
//! - Schemas are immutable once built and shared by reference
//! - Validation is a pure function of `(value, name, schema)`
//! - A response is returned only after every pipeline step has passed
//! - An operation without a binding fails before it runs
//!
#![deny(missing_docs)]

/// Trust boundary, bindings and raw responses.
pub mod boundary;
/// Error types and the shared error taxonomy.
pub mod errors;
/// Content-Type envelope validation.
pub mod response;
/// Schema node data model.
pub mod schema;
/// URL decomposition.
pub mod url;
/// Recursive structural validator.
pub mod validator;

pub use boundary::{
    Binding, BindingRegistry, BindingRegistryBuilder, BoundaryConfig, RawResponse, TrustBoundary,
};
pub use errors::{BoundaryError, ConfigError, ErrorKind, ValidationError};
pub use response::ResponseValidator;
pub use schema::{
    type_name, MappingRule, Pattern, ScalarRule, ScalarType, SchemaNode, SequenceRule, UrlRule,
};
pub use url::{split_url, UrlParts};
pub use validator::validate;
