use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use unicode_normalization::{is_nfc_quick, IsNormalized, UnicodeNormalization};

use crate::hygiene::{HygieneReport, HygieneStatus, HygieneWarning};

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CanonicalizationError {
    /// The byte sequence is not valid under the declared encoding.
    #[error("{name} was not valid {encoding}.")]
    Decode {
        /// Name of the value being decoded.
        name: String,
        /// Encoding the bytes were declared to be in.
        encoding: Encoding,
    },
    /// The declared encoding label is not supported.
    #[error("unsupported character encoding: {0}")]
    UnsupportedEncoding(String),
    /// The requested normalization form does not exist.
    #[error("invalid normalization form: {0}")]
    UnsupportedForm(String),
    /// The input was not of the kind the caller declared.
    #[error("{name} must be of type {expected}. Was {found}.")]
    UnexpectedInput {
        /// Name of the value being canonicalized.
        name: String,
        /// Declared input kind.
        expected: InputKind,
        /// Kind actually supplied.
        found: InputKind,
    },
}

/// Character encodings the canonicalizer can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Encoding {
    /// UTF-8, decoded strictly.
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    /// 7-bit US-ASCII.
    #[serde(rename = "us-ascii")]
    Ascii,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    #[serde(rename = "iso-8859-1")]
    Latin1,
}

impl Encoding {
    /// Canonical label for the encoding.
    pub fn label(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Ascii => "us-ascii",
            Encoding::Latin1 => "iso-8859-1",
        }
    }

    fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            Encoding::Ascii => bytes
                .is_ascii()
                .then(|| bytes.iter().map(|&b| b as char).collect()),
            Encoding::Latin1 => Some(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Encoding {
    type Err = CanonicalizationError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf_8" | "utf8" => Ok(Encoding::Utf8),
            "us-ascii" | "ascii" => Ok(Encoding::Ascii),
            "iso-8859-1" | "latin-1" | "latin_1" | "latin1" => Ok(Encoding::Latin1),
            _ => Err(CanonicalizationError::UnsupportedEncoding(label.to_string())),
        }
    }
}

/// Unicode normalization forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NormalizationForm {
    /// Canonical composition.
    #[default]
    #[serde(rename = "NFC")]
    Nfc,
    /// Canonical decomposition.
    #[serde(rename = "NFD")]
    Nfd,
    /// Compatibility composition.
    #[serde(rename = "NFKC")]
    Nfkc,
    /// Compatibility decomposition.
    #[serde(rename = "NFKD")]
    Nfkd,
}

impl NormalizationForm {
    /// Name of the form as used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            NormalizationForm::Nfc => "NFC",
            NormalizationForm::Nfd => "NFD",
            NormalizationForm::Nfkc => "NFKC",
            NormalizationForm::Nfkd => "NFKD",
        }
    }

    /// Transforms `text` into this normal form.
    pub fn apply(&self, text: &str) -> String {
        match self {
            NormalizationForm::Nfc => {
                if is_nfc_quick(text.chars()) == IsNormalized::Yes {
                    return text.to_owned();
                }
                text.nfc().collect()
            }
            NormalizationForm::Nfd => text.nfd().collect(),
            NormalizationForm::Nfkc => text.nfkc().collect(),
            NormalizationForm::Nfkd => text.nfkd().collect(),
        }
    }
}

impl fmt::Display for NormalizationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NormalizationForm {
    type Err = CanonicalizationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "NFC" => Ok(NormalizationForm::Nfc),
            "NFD" => Ok(NormalizationForm::Nfd),
            "NFKC" => Ok(NormalizationForm::Nfkc),
            "NFKD" => Ok(NormalizationForm::Nfkd),
            other => Err(CanonicalizationError::UnsupportedForm(other.to_string())),
        }
    }
}

/// Kind of raw input handed to the canonicalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Already-decoded text.
    Text,
    /// Undecoded bytes.
    Bytes,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Text => f.write_str("text"),
            InputKind::Bytes => f.write_str("bytes"),
        }
    }
}

/// Untrusted input: either text or bytes.
#[derive(Debug, Clone, Copy)]
pub enum RawInput<'a> {
    /// Text, taken as already decoded.
    Text(&'a str),
    /// Bytes in the canonicalizer's encoding.
    Bytes(&'a [u8]),
}

impl RawInput<'_> {
    /// Kind of this input.
    pub fn kind(&self) -> InputKind {
        match self {
            RawInput::Text(_) => InputKind::Text,
            RawInput::Bytes(_) => InputKind::Bytes,
        }
    }
}

/// Canonical text plus the hygiene report describing how it was produced.
#[derive(Debug, Clone)]
pub struct CanonicalText {
    /// Canonical text.
    pub text: String,
    /// Hygiene report.
    pub report: HygieneReport,
}

/// Canonicalizer that turns untrusted input into canonical text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonicalizer {
    encoding: Encoding,
    form: NormalizationForm,
}

impl Canonicalizer {
    /// Creates a canonicalizer for the given encoding and normalization form.
    pub fn new(encoding: Encoding, form: NormalizationForm) -> Self {
        Self { encoding, form }
    }

    /// Creates a canonicalizer from configuration labels.
    pub fn from_labels(encoding: &str, form: &str) -> Result<Self, CanonicalizationError> {
        Ok(Self::new(encoding.parse()?, form.parse()?))
    }

    /// Encoding used for byte input.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Normalization form applied after decoding.
    pub fn form(&self) -> NormalizationForm {
        self.form
    }

    /// Produces canonical text for `input`.
    ///
    /// Text passes through unchanged. Bytes are decoded strictly and then
    /// normalized; an invalid byte sequence is an error, never replaced.
    pub fn canonicalize(
        &self,
        name: &str,
        input: RawInput<'_>,
        expected: InputKind,
    ) -> Result<String, CanonicalizationError> {
        self.canonicalize_with_report(name, input, expected)
            .map(|canonical| canonical.text)
    }

    /// Produces canonical text + hygiene report.
    pub fn canonicalize_with_report(
        &self,
        name: &str,
        input: RawInput<'_>,
        expected: InputKind,
    ) -> Result<CanonicalText, CanonicalizationError> {
        if input.kind() != expected {
            return Err(CanonicalizationError::UnexpectedInput {
                name: name.to_string(),
                expected,
                found: input.kind(),
            });
        }

        match input {
            RawInput::Text(text) => {
                let mut report = HygieneReport::new(HygieneStatus::Passthrough, self.form);
                report.record("output_chars", text.chars().count() as u64);
                Ok(CanonicalText {
                    text: text.to_owned(),
                    report,
                })
            }
            RawInput::Bytes(bytes) => {
                let decoded =
                    self.encoding
                        .decode(bytes)
                        .ok_or_else(|| CanonicalizationError::Decode {
                            name: name.to_string(),
                            encoding: self.encoding,
                        })?;
                let text = self.form.apply(&decoded);

                let mut report = HygieneReport::new(HygieneStatus::Clean, self.form);
                if text != decoded {
                    debug!(name, form = %self.form, "normalization rewrote decoded text");
                    report.status = HygieneStatus::Normalized;
                    report.warnings.push(HygieneWarning::new("NormalizationApplied"));
                }
                report.record("input_bytes", bytes.len() as u64);
                report.record("output_chars", text.chars().count() as u64);
                Ok(CanonicalText { text, report })
            }
        }
    }
}

/// Canonicalizes with the default UTF-8 / NFC settings.
pub fn canonicalize(
    name: &str,
    input: RawInput<'_>,
    expected: InputKind,
) -> Result<String, CanonicalizationError> {
    Canonicalizer::default().canonicalize(name, input, expected)
}
