use proptest::prelude::*;
use serde_json::{json, Value};

use scrybound_core::ErrorKind;
use scrybound_schemas::{
    mana_cost_pattern, CatalogSchemas, SchemaError, SchemaRegistry, MANA_SYMBOLS,
};

const SETS: &str = include_str!("../../../fixtures/sets.json");
const CARDS: &str = include_str!("../../../fixtures/cards.json");
const SET_RNA: &str = include_str!("../../../fixtures/set_rna.json");
const CARDS_SEARCH: &str = include_str!("../../../fixtures/cards_search.json");

fn catalog() -> CatalogSchemas {
    CatalogSchemas::build().unwrap()
}

fn load(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

fn rna() -> Value {
    load(SET_RNA)
}

#[test]
fn set_list_fixture_validates() {
    assert!(catalog().set_list.validate(&load(SETS), "sets").is_ok());
}

#[test]
fn card_list_fixture_validates() {
    let c = catalog();
    assert!(c.card_list.validate(&load(CARDS), "cards").is_ok());
    assert!(c.card_list.validate(&load(CARDS_SEARCH), "cards_search").is_ok());
}

#[test]
fn data_of_each_list_validates_as_a_sequence() {
    let c = catalog();
    assert!(c.sets.validate(&load(SETS)["data"], "sets").is_ok());
    assert!(c.cards.validate(&load(CARDS)["data"], "cards").is_ok());
}

#[test]
fn single_set_validates() {
    assert!(catalog().set.validate(&rna(), "set").is_ok());
}

#[test]
fn set_missing_code_is_a_key_error() {
    let mut set = rna();
    set.as_object_mut().unwrap().remove("code");
    let err = catalog().set.validate(&set, "set").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Key);
    assert_eq!(err.to_string(), "set is missing required key(s): code.");
}

#[test]
fn set_with_extra_key_is_a_key_error() {
    let mut set = rna();
    set["foo"] = json!(1);
    let err = catalog().set.validate(&set, "set").unwrap_err();
    assert_eq!(err.to_string(), "set contains an invalid key: foo.");
}

#[test]
fn set_icon_must_be_on_the_image_host() {
    let mut set = rna();
    set["icon_svg_uri"] = json!("https://api.scryfall.com/sets/rna.svg");
    let err = catalog().set.validate(&set, "set").unwrap_err();
    assert_eq!(err.to_string(), "set:icon_svg_uri:netloc has invalid value.");
}

#[test]
fn set_code_length_is_bounded() {
    let mut set = rna();
    set["code"] = json!("toolong1");
    let err = catalog().set.validate(&set, "set").unwrap_err();
    assert_eq!(err.to_string(), "set:code must be shorter than 6.");
}

#[test]
fn set_release_date_must_match_pattern() {
    let mut set = rna();
    set["released_at"] = json!("Jan 25 2019");
    let err = catalog().set.validate(&set, "set").unwrap_err();
    assert!(err
        .to_string()
        .starts_with("set:released_at must match pattern"));
}

#[test]
fn card_color_identity_error_names_the_index() {
    let mut cards = load(CARDS);
    cards["data"][2]["color_identity"] = json!(["G", "U", "P"]);
    let err = catalog().card_list.validate(&cards, "cards").unwrap_err();
    assert_eq!(
        err.to_string(),
        "cards:data:2:color_identity:2 does not match a value in list."
    );
}

#[test]
fn card_legalities_are_closed() {
    let mut cards = load(CARDS);
    cards["data"][0]["legalities"]["oathbreaker"] = json!("legal");
    let err = catalog().card_list.validate(&cards, "cards").unwrap_err();
    assert_eq!(
        err.to_string(),
        "cards:data:0:legalities contains an invalid key: oathbreaker."
    );
}

#[test]
fn related_card_uri_must_be_on_the_api_host() {
    let mut cards = load(CARDS_SEARCH);
    cards["data"][0]["all_parts"][1]["uri"] = json!("https://scryfall.com/card/emn/1");
    let err = catalog().card_list.validate(&cards, "cards").unwrap_err();
    assert_eq!(
        err.to_string(),
        "cards:data:0:all_parts:1:uri:netloc has invalid value."
    );
}

#[test]
fn cmc_accepts_integer_and_float_but_not_text() {
    let c = catalog();
    let mut cards = load(CARDS);
    cards["data"][0]["cmc"] = json!(2.5);
    assert!(c.card_list.validate(&cards, "cards").is_ok());
    cards["data"][0]["cmc"] = json!("2");
    let err = c.card_list.validate(&cards, "cards").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn boolean_field_rejects_integer() {
    let mut cards = load(CARDS);
    cards["data"][1]["foil"] = json!(1);
    let err = catalog().card_list.validate(&cards, "cards").unwrap_err();
    assert_eq!(
        err.to_string(),
        "cards:data:1:foil must be of type boolean. Was integer."
    );
}

#[test]
fn list_without_data_is_missing_data() {
    let err = catalog()
        .set_list
        .validate(&json!({"object": "list", "has_more": false}), "sets")
        .unwrap_err();
    assert_eq!(err.to_string(), "sets is missing required key(s): data.");
}

#[test]
fn negative_total_cards_is_rejected() {
    let mut cards = load(CARDS_SEARCH);
    cards["total_cards"] = json!(-1);
    let err = catalog().card_list.validate(&cards, "cards").unwrap_err();
    assert_eq!(err.to_string(), "cards:total_cards must be at least 0.");
    assert_eq!(err.kind(), ErrorKind::Value);
}

#[test]
fn empty_set_has_zero_card_count() {
    let mut set = rna();
    set["card_count"] = json!(0);
    assert!(catalog().set.validate(&set, "set").is_ok());
    set["card_count"] = json!(-21);
    let err = catalog().set.validate(&set, "set").unwrap_err();
    assert_eq!(err.to_string(), "set:card_count must be at least 0.");
}

#[test]
fn card_face_requires_mana_cost() {
    let face = json!({
        "object": "card_face",
        "name": "Fire",
        "type_line": "Instant",
    });
    let err = catalog().card_face.validate(&face, "face").unwrap_err();
    assert_eq!(err.to_string(), "face is missing required key(s): mana_cost.");
}

#[test]
fn mana_cost_accepts_symbols_and_split_costs() {
    let rule = catalog().leaves.mana_cost;
    for cost in ["", "{G}", "{X}{G}{G}", "{1}{R} // {2}{U}", "{W/P}{½}{∞}"] {
        assert!(rule.validate(&json!(cost), "mana_cost").is_ok(), "{}", cost);
    }
}

#[test]
fn mana_cost_rejects_unknown_symbols() {
    let rule = catalog().leaves.mana_cost;
    for cost in ["{K}", "{G}{Q/W}", "G", "{1}{R} / {2}"] {
        assert!(rule.validate(&json!(cost), "mana_cost").is_err(), "{}", cost);
    }
}

#[test]
fn mana_cost_pattern_lists_every_symbol() {
    let pattern = mana_cost_pattern();
    assert!(pattern.contains(r"\{CHAOS\}"));
    assert!(pattern.ends_with('$'));
}

#[test]
fn registry_resolves_names() {
    let registry = SchemaRegistry::catalog().unwrap();
    for name in ["boolean", "code", "color", "date", "id", "set", "card", "card_list", "url_api"] {
        assert!(registry.get(name).is_some(), "{}", name);
    }
    let set = registry.require("set").unwrap();
    assert!(set.validate(&rna(), "set").is_ok());
}

#[test]
fn registry_rejects_unknown_names() {
    let registry = SchemaRegistry::catalog().unwrap();
    assert_eq!(
        registry.require("planeswalker").unwrap_err(),
        SchemaError::Unknown("planeswalker".into())
    );
}

#[test]
fn registry_names_are_sorted() {
    let registry = SchemaRegistry::catalog().unwrap();
    let names: Vec<_> = registry.names().collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(names.contains(&"set_list"));
}

proptest! {
    #[test]
    fn any_run_of_symbols_is_a_valid_cost(
        picks in prop::collection::vec(0..MANA_SYMBOLS.len(), 0..8),
    ) {
        let cost: String = picks.iter().map(|&i| MANA_SYMBOLS[i]).collect();
        let rule = catalog().leaves.mana_cost;
        prop_assert!(rule.validate(&json!(cost), "mana_cost").is_ok());
    }

    #[test]
    fn every_color_letter_is_accepted(letter in prop::sample::select(vec!["W", "U", "B", "R", "G"])) {
        let color = catalog().leaves.color;
        prop_assert!(color.validate(&json!(letter), "color").is_ok());
    }

    #[test]
    fn lowercase_colors_are_rejected(letter in "[wubrg]") {
        let color = catalog().leaves.color;
        let err = color.validate(&json!(letter), "color").unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Value);
    }
}
