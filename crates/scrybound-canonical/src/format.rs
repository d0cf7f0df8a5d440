use thiserror::Error;

/// Errors raised while turning canonical text into structured data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The payload is not well-formed in the expected serialization format.
    #[error("{name} must be valid {format}.")]
    Malformed {
        /// Name of the payload.
        name: String,
        /// Expected serialization format (e.g. `JSON`).
        format: &'static str,
        /// Parser diagnostic.
        detail: String,
    },
    /// A requested key filter is absent from the top-level mapping.
    #[error("{name} must have a key named {key}.")]
    MissingKey {
        /// Name of the payload.
        name: String,
        /// Key that was requested.
        key: String,
    },
    /// A Content-Type parameter segment has no `=`.
    #[error("Content-Type parameters must be name=value pairs.")]
    ContentTypeParameter {
        /// Offending segment.
        segment: String,
    },
}
