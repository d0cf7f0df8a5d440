use crate::canonicalizer::NormalizationForm;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hygiene status for canonicalization attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HygieneStatus {
    /// The decoded text was already in the requested normal form.
    Clean,
    /// Normalization rewrote at least one character sequence.
    Normalized,
    /// The input was text and passed through untouched.
    Passthrough,
}

/// Stable warning code emitted by canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HygieneWarning(String);

impl HygieneWarning {
    /// Creates a warning from a literal code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the warning code.
    pub fn code(&self) -> &str {
        &self.0
    }
}

/// Hygiene report produced alongside canonical text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HygieneReport {
    /// Overall hygiene status.
    pub status: HygieneStatus,
    /// Stable warning codes.
    pub warnings: Vec<HygieneWarning>,
    /// Metrics such as `input_bytes` and `output_chars`.
    pub metrics: BTreeMap<String, u64>,
    /// Normalization form the text was transformed into.
    pub form: NormalizationForm,
}

impl HygieneReport {
    pub(crate) fn new(status: HygieneStatus, form: NormalizationForm) -> Self {
        Self {
            status,
            warnings: Vec::new(),
            metrics: BTreeMap::new(),
            form,
        }
    }

    pub(crate) fn record(&mut self, metric: &str, value: u64) {
        self.metrics.insert(metric.to_string(), value);
    }
}
