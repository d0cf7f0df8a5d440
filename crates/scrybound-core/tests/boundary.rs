use serde_json::json;
use std::cell::Cell;
use std::io;
use std::sync::Arc;

use scrybound_canonical::NormalizationForm;
use scrybound_core::{
    Binding, BindingRegistry, BoundaryConfig, BoundaryError, ConfigError, ErrorKind,
    MappingRule, RawResponse, ScalarRule, ScalarType, SchemaNode, TrustBoundary, UrlRule,
};

const JSON_UTF8: &str = "application/json; charset=utf-8";

fn set_rule() -> Arc<SchemaNode> {
    let text = || ScalarRule::new(ScalarType::Text);
    Arc::new(
        MappingRule::new()
            .require("object", text().one_of(["set"]))
            .require("code", text().minlen(2).maxlen(6))
            .require("name", text())
            .require("card_count", ScalarRule::new(ScalarType::Integer))
            .optional("released_at", text().pattern("[12][0-9]{3}-[01][0-9]-[0123][0-9]").unwrap())
            .into(),
    )
}

fn boundary() -> TrustBoundary {
    let set = set_rule();
    let registry = BindingRegistry::builder()
        .bind("sets", Binding::new(SchemaNode::sequence_of(set.clone())).keyfilter("data"))
        .unwrap()
        .bind("set", Binding::new(set))
        .unwrap()
        .bind(
            "person",
            Binding::new(
                MappingRule::new()
                    .require("name", ScalarRule::new(ScalarType::Text))
                    .require(
                        "type",
                        ScalarRule::new(ScalarType::Text).one_of(["animal", "mineral", "vegetable"]),
                    )
                    .require(
                        "score",
                        ScalarRule::new(ScalarType::Integer).min(50.0).max(100.0),
                    ),
            ),
        )
        .unwrap()
        .build();
    TrustBoundary::new(registry)
}

#[test]
fn empty_list_is_returned_as_empty_sequence() {
    let raw = RawResponse::new(JSON_UTF8, r#"{"object":"list","has_more":false,"data":[]}"#);
    let value = boundary().validate("sets", &raw).unwrap();
    assert_eq!(value, json!([]));
}

#[test]
fn missing_keyfilter_is_a_format_error() {
    let raw = RawResponse::new(JSON_UTF8, r#"{"object":"list","has_more":false}"#);
    let err = boundary().validate("sets", &raw).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(err.to_string(), "sets must have a key named data.");
}

#[test]
fn html_is_rejected_before_the_body_is_read() {
    let raw = RawResponse::new("text/html; charset=utf-8", vec![0xff, 0xfe]);
    let err = boundary().validate("sets", &raw).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
    assert_eq!(
        err.to_string(),
        "Content-Type:mediatype does not match a value in list."
    );
}

#[test]
fn set_missing_code_names_the_key() {
    let raw = RawResponse::new(
        JSON_UTF8,
        r#"{"object":"set","name":"Kaldheim","card_count":285}"#,
    );
    let err = boundary().validate("set", &raw).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Key);
    assert_eq!(err.to_string(), "set is missing required key(s): code.");
}

#[test]
fn set_with_extra_key_names_the_key() {
    let raw = RawResponse::new(
        JSON_UTF8,
        r#"{"object":"set","code":"khm","name":"Kaldheim","card_count":285,
            "released_at":"2021-02-05","foo":1}"#,
    );
    let err = boundary().validate("set", &raw).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Key);
    assert_eq!(err.to_string(), "set contains an invalid key: foo.");
}

#[test]
fn nested_failure_is_named_by_path() {
    let raw = RawResponse::new(
        JSON_UTF8,
        r#"{"object":"list","has_more":false,"data":[
            {"object":"set","code":"khm","name":"Kaldheim","card_count":285},
            {"object":"set","code":"k","name":"Bad","card_count":1}
        ]}"#,
    );
    let err = boundary().validate("sets", &raw).unwrap_err();
    assert_eq!(err.to_string(), "sets:1:code must be longer than 2.");
}

#[test]
fn url_scheme_is_checked_per_component() {
    let rule: SchemaNode = UrlRule::host("https", "api.example.com").into();
    let err = rule
        .validate(&json!("http://api.example.com/x"), "uri")
        .unwrap_err();
    assert_eq!(err.to_string(), "uri:scheme has invalid value.");
    assert!(rule
        .validate(&json!("https://api.example.com/x"), "uri")
        .is_ok());
}

#[test]
fn whole_document_is_returned_when_no_keyfilter() {
    let raw = RawResponse::new(
        JSON_UTF8,
        "{\n  \"name\": \"Terry Jones\",\n  \"type\": \"animal\",\n  \"score\": 98\n}",
    );
    let value = boundary().validate("person", &raw).unwrap();
    assert_eq!(
        value,
        json!({"name": "Terry Jones", "type": "animal", "score": 98})
    );
}

#[test]
fn invalid_utf8_body_is_a_format_error() {
    let raw = RawResponse::new(JSON_UTF8, vec![b'{', 0xc3, 0x28, b'}']);
    let err = boundary().validate("person", &raw).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(err.to_string(), "person was not valid utf-8.");
}

#[test]
fn malformed_body_is_a_format_error() {
    let raw = RawResponse::new(JSON_UTF8, "{not json");
    let err = boundary().validate("person", &raw).unwrap_err();
    assert_eq!(err.to_string(), "person must be valid JSON.");
}

#[test]
fn malformed_header_is_a_format_error() {
    let raw = RawResponse::new("application/json; utf-8", "{}");
    let err = boundary().validate("person", &raw).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn decoded_body_is_normalized_before_validation() {
    let registry = BindingRegistry::builder()
        .bind(
            "name",
            Binding::new(ScalarRule::new(ScalarType::Text).one_of(["\u{e9}"])),
        )
        .unwrap()
        .build();
    let boundary = TrustBoundary::new(registry);
    let raw = RawResponse::new(JSON_UTF8, "\"e\u{301}\"");
    assert_eq!(boundary.validate("name", &raw).unwrap(), json!("\u{e9}"));
}

#[test]
fn binding_form_overrides_nfc() {
    let registry = BindingRegistry::builder()
        .bind(
            "name",
            Binding::new(ScalarRule::new(ScalarType::Text)).form(NormalizationForm::Nfd),
        )
        .unwrap()
        .build();
    let raw = RawResponse::new(JSON_UTF8, "\"\u{e9}\"");
    let value = TrustBoundary::new(registry).validate("name", &raw).unwrap();
    assert_eq!(value, json!("e\u{301}"));
}

#[test]
fn call_returns_validated_structure() {
    let value = boundary()
        .call("sets", || {
            Ok::<_, io::Error>(RawResponse::new(
                JSON_UTF8,
                r#"{"object":"list","has_more":false,"data":[
                    {"object":"set","code":"khm","name":"Kaldheim","card_count":285}
                ]}"#,
            ))
        })
        .unwrap();
    assert_eq!(value[0]["code"], "khm");
}

#[test]
fn unbound_operation_fails_before_running() {
    let ran = Cell::new(false);
    let err = boundary()
        .call("rulings", || {
            ran.set(true);
            Ok::<_, io::Error>(RawResponse::new(JSON_UTF8, "[]"))
        })
        .unwrap_err();
    assert!(!ran.get());
    assert_eq!(err.kind(), ErrorKind::Config);
    assert_eq!(err.to_string(), "No validator configured for rulings.");
}

#[test]
fn operation_failure_is_a_transport_error() {
    let err = boundary()
        .call("sets", || {
            Err::<RawResponse, _>(io::Error::new(io::ErrorKind::Other, "connection reset"))
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(matches!(err, BoundaryError::Operation { .. }));
}

#[test]
fn duplicate_binding_is_rejected() {
    let err = BindingRegistry::builder()
        .bind("sets", Binding::new(set_rule()))
        .unwrap()
        .bind("sets", Binding::new(set_rule()))
        .unwrap_err();
    assert_eq!(err, ConfigError::DuplicateBinding("sets".into()));
}

#[test]
fn require_reports_the_first_unbound_operation() {
    let registry = boundary().registry().clone();
    assert!(registry.require(&["sets", "set"]).is_ok());
    assert_eq!(
        registry.require(&["sets", "cards"]),
        Err(ConfigError::Unbound("cards".into()))
    );
}

#[test]
fn config_changes_accepted_charset() {
    let registry = BindingRegistry::builder()
        .bind("name", Binding::new(ScalarRule::new(ScalarType::Text)))
        .unwrap()
        .build();
    let config = BoundaryConfig {
        charset: "iso-8859-1".into(),
        ..BoundaryConfig::default()
    };
    let boundary = TrustBoundary::with_config(registry, &config);
    let raw = RawResponse::new("application/json; charset=iso-8859-1", vec![b'"', 0xe9, b'"']);
    assert_eq!(boundary.validate("name", &raw).unwrap(), json!("\u{e9}"));

    let utf8 = RawResponse::new(JSON_UTF8, "\"x\"");
    assert_eq!(
        boundary.validate("name", &utf8).unwrap_err().kind(),
        ErrorKind::Value
    );
}

#[test]
fn boundary_config_deserializes_with_defaults() {
    let config: BoundaryConfig = serde_json::from_str(r#"{"form":"NFKC"}"#).unwrap();
    assert_eq!(config.media_type, "application/json");
    assert_eq!(config.charset, "utf-8");
    assert_eq!(config.form, NormalizationForm::Nfkc);
}
