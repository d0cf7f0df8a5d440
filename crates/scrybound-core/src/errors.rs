use scrybound_canonical::{CanonicalizationError, FormatError};
use thiserror::Error;

/// Error classes shared by every failure the boundary can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value's runtime type does not match the schema.
    Type,
    /// A value has the right type but violates a constraint.
    Value,
    /// A mapping has an unknown key or lacks required keys.
    Key,
    /// Bytes, text or headers could not be decoded or parsed.
    Format,
    /// Configuration defect: missing binding, unsupported form or encoding.
    Config,
    /// The wrapped operation itself failed.
    Transport,
}

/// Structural validation failures. Every message names the offending field
/// by its colon-separated path, e.g. `card:color_identity:2`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Runtime type mismatch.
    #[error("{name} must be of type {expected}. Was {found}.")]
    Type {
        /// Path of the value.
        name: String,
        /// Accepted type(s).
        expected: String,
        /// Type actually found.
        found: String,
    },
    /// Numeric value below its minimum.
    #[error("{name} must be at least {min}.")]
    BelowMinimum {
        /// Path of the value.
        name: String,
        /// Configured minimum.
        min: f64,
    },
    /// Numeric value above its maximum.
    #[error("{name} cannot be more than {max}.")]
    AboveMaximum {
        /// Path of the value.
        name: String,
        /// Configured maximum.
        max: f64,
    },
    /// Length below its minimum.
    #[error("{name} must be longer than {minlen}.")]
    TooShort {
        /// Path of the value.
        name: String,
        /// Configured minimum length.
        minlen: usize,
    },
    /// Length above its maximum.
    #[error("{name} must be shorter than {maxlen}.")]
    TooLong {
        /// Path of the value.
        name: String,
        /// Configured maximum length.
        maxlen: usize,
    },
    /// Text does not match the configured pattern.
    #[error("{name} must match pattern {pattern}.")]
    PatternMismatch {
        /// Path of the value.
        name: String,
        /// Source of the pattern.
        pattern: String,
    },
    /// Value outside the enumerated set.
    #[error("{name} does not match a value in list.")]
    NotInEnum {
        /// Path of the value.
        name: String,
    },
    /// A URL component differs from the expected one.
    #[error("{name}:{component} has invalid value.")]
    UrlComponent {
        /// Path of the URL value.
        name: String,
        /// Failing component (`scheme`, `netloc`, `path`, ...).
        component: &'static str,
    },
    /// A mapping carries a key the schema does not know.
    #[error("{name} contains an invalid key: {key}.")]
    UnknownKey {
        /// Path of the mapping.
        name: String,
        /// Unrecognized key.
        key: String,
    },
    /// A mapping lacks one or more required keys.
    #[error("{name} is missing required key(s): {}.", .keys.join(", "))]
    MissingKeys {
        /// Path of the mapping.
        name: String,
        /// Every required key that was absent.
        keys: Vec<String>,
    },
}

impl ValidationError {
    /// Error class of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Type { .. } => ErrorKind::Type,
            ValidationError::UnknownKey { .. } | ValidationError::MissingKeys { .. } => {
                ErrorKind::Key
            }
            _ => ErrorKind::Value,
        }
    }
}

/// Configuration defects detected while wiring the boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No validator is bound to the operation.
    #[error("No validator configured for {0}.")]
    Unbound(String),
    /// The operation was bound twice.
    #[error("operation {0} is already bound")]
    DuplicateBinding(String),
    /// A pattern in a schema rule does not compile.
    #[error("invalid pattern {pattern}: {reason}")]
    InvalidPattern {
        /// Pattern source.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },
}

/// Errors surfaced by the trust boundary.
#[derive(Error, Debug)]
pub enum BoundaryError {
    /// The wrapped operation failed before producing a response.
    #[error("{operation} failed: {source}")]
    Operation {
        /// Operation name.
        operation: String,
        /// Underlying failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Decoding or normalization failed.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),
    /// The header or payload is malformed.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The structure does not conform to its schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The boundary is misconfigured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BoundaryError {
    /// Error class of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoundaryError::Operation { .. } => ErrorKind::Transport,
            BoundaryError::Canonicalization(err) => match err {
                CanonicalizationError::Decode { .. } => ErrorKind::Format,
                CanonicalizationError::UnexpectedInput { .. } => ErrorKind::Type,
                CanonicalizationError::UnsupportedEncoding(_)
                | CanonicalizationError::UnsupportedForm(_) => ErrorKind::Config,
            },
            BoundaryError::Format(_) => ErrorKind::Format,
            BoundaryError::Validation(err) => err.kind(),
            BoundaryError::Config(_) => ErrorKind::Config,
        }
    }

    /// The structural validation failure, if that is what this is.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            BoundaryError::Validation(err) => Some(err),
            _ => None,
        }
    }
}
