//! Canonicalization primitives for untrusted catalog responses.
//!
//! Raw responses arrive as a Content-Type header plus a byte payload. This
//! crate turns them into something the structural validator can inspect:
//! bytes are decoded under the declared charset and Unicode-normalized, the
//! header is split into media type and parameters, and the canonical text is
//! parsed as JSON with an optional top-level key filter.
//!
#![deny(missing_docs)]

/// Decoding and Unicode normalization.
pub mod canonicalizer;
/// Content-Type header parsing.
pub mod content_type;
/// Format errors shared by the parsers.
pub mod format;
/// Hygiene report types emitted during canonicalization.
pub mod hygiene;
/// JSON parsing and key extraction.
pub mod transform;

pub use canonicalizer::{
    canonicalize, CanonicalText, CanonicalizationError, Canonicalizer, Encoding, InputKind,
    NormalizationForm, RawInput,
};
pub use content_type::{parse_content_type, ContentType, MEDIA_TYPE_KEY};
pub use format::FormatError;
pub use hygiene::{HygieneReport, HygieneStatus, HygieneWarning};
pub use transform::{extract, parse, parse_json};
