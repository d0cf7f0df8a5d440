//! Response envelope validation.

use scrybound_canonical::{ContentType, MEDIA_TYPE_KEY};

use crate::errors::ValidationError;
use crate::schema::{MappingRule, ScalarRule, ScalarType, SchemaNode};

const CONTENT_TYPE: &str = "Content-Type";

/// Checks a parsed Content-Type against the one accepted media type and
/// charset. Any other parameter is an unknown key.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseValidator {
    media_type: String,
    charset: String,
    rule: SchemaNode,
}

impl ResponseValidator {
    /// Accepts exactly `media_type` with exactly `charset`.
    pub fn new(media_type: impl Into<String>, charset: impl Into<String>) -> Self {
        let media_type = media_type.into().to_ascii_lowercase();
        let charset = charset.into();
        let rule = MappingRule::new()
            .require(
                MEDIA_TYPE_KEY,
                ScalarRule::new(ScalarType::Text).one_of([media_type.as_str()]),
            )
            .require(
                "charset",
                ScalarRule::new(ScalarType::Text).one_of([charset.as_str()]),
            )
            .into();
        Self {
            media_type,
            charset,
            rule,
        }
    }

    /// Accepted media type.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Accepted charset.
    pub fn charset(&self) -> &str {
        &self.charset
    }

    /// Validates `content_type`; errors are named `Content-Type:<key>`.
    pub fn validate(&self, content_type: &ContentType) -> Result<(), ValidationError> {
        self.rule.validate(&content_type.to_value(), CONTENT_TYPE)
    }
}

impl Default for ResponseValidator {
    fn default() -> Self {
        Self::new("application/json", "utf-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrybound_canonical::parse_content_type;

    #[test]
    fn default_accepts_json_utf8() {
        let ct = parse_content_type("application/json; charset=utf-8").unwrap();
        assert!(ResponseValidator::default().validate(&ct).is_ok());
    }

    #[test]
    fn wrong_media_type_names_the_key() {
        let ct = parse_content_type("text/html; charset=utf-8").unwrap();
        let err = ResponseValidator::default().validate(&ct).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Content-Type:mediatype does not match a value in list."
        );
    }

    #[test]
    fn missing_charset_is_a_missing_key() {
        let ct = parse_content_type("application/json").unwrap();
        let err = ResponseValidator::default().validate(&ct).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Content-Type is missing required key(s): charset."
        );
    }
}
