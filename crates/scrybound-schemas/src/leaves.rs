//! Leaf rules shared by every catalog object.

use std::sync::Arc;

use scrybound_core::{ConfigError, ScalarRule, ScalarType, SchemaNode, UrlRule};

use crate::mana::mana_cost_pattern;

/// `YYYY-MM-DD`.
pub const DATE_PATTERN: &str = "[12][0-9]{3}-[01][0-9]-[0123][0-9]";
/// Lower-case hyphenated UUID.
pub const ID_PATTERN: &str = "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}";
/// Host serving the catalog API.
pub const API_HOST: &str = "api.scryfall.com";
/// Signed integer modifier such as `+1` or `-3`.
pub const MODIFIER_PATTERN: &str = "[+-]{1}[0-9]+";

/// Primitive value rules.
#[derive(Debug, Clone)]
pub struct Leaves {
    /// `true`/`false`.
    pub boolean: Arc<SchemaNode>,
    /// Whole number.
    pub integer: Arc<SchemaNode>,
    /// Non-negative whole number.
    pub count: Arc<SchemaNode>,
    /// Whole or fractional number.
    pub decimal: Arc<SchemaNode>,
    /// Free text.
    pub text: Arc<SchemaNode>,
    /// Border colour.
    pub border: Arc<SchemaNode>,
    /// Set or block code, 2 to 6 characters.
    pub code: Arc<SchemaNode>,
    /// Single colour letter.
    pub color: Arc<SchemaNode>,
    /// Role of a related card.
    pub component: Arc<SchemaNode>,
    /// Calendar date.
    pub date: Arc<SchemaNode>,
    /// Frame effect.
    pub effect: Arc<SchemaNode>,
    /// Frame edition.
    pub frame: Arc<SchemaNode>,
    /// Game a printing exists in.
    pub games: Arc<SchemaNode>,
    /// UUID.
    pub id: Arc<SchemaNode>,
    /// Printed language.
    pub lang: Arc<SchemaNode>,
    /// Card layout.
    pub layout: Arc<SchemaNode>,
    /// Format legality.
    pub legality: Arc<SchemaNode>,
    /// Complete mana cost.
    pub mana_cost: Arc<SchemaNode>,
    /// Hand or life modifier.
    pub modifier: Arc<SchemaNode>,
    /// Object discriminator.
    pub object: Arc<SchemaNode>,
    /// Printing rarity.
    pub rarity: Arc<SchemaNode>,
    /// Set classification.
    pub set_type: Arc<SchemaNode>,
}

fn text() -> ScalarRule {
    ScalarRule::new(ScalarType::Text)
}

fn choice(values: &[&str]) -> Arc<SchemaNode> {
    text().one_of(values.iter().copied()).into()
}

impl Leaves {
    /// Builds every leaf rule.
    pub fn build() -> Result<Self, ConfigError> {
        Ok(Self {
            boolean: ScalarRule::new(ScalarType::Boolean).into(),
            integer: ScalarRule::new(ScalarType::Integer).into(),
            count: ScalarRule::new(ScalarType::Integer).min(0.0).into(),
            decimal: ScalarRule::any_of([ScalarType::Float, ScalarType::Integer]).into(),
            text: text().into(),
            border: choice(&["black", "borderless", "gold", "silver", "white"]),
            code: text().minlen(2).maxlen(6).into(),
            color: choice(&["W", "U", "B", "R", "G"]),
            component: choice(&["token", "meld_part", "meld_result", "combo_piece"]),
            date: text().pattern(DATE_PATTERN)?.into(),
            effect: choice(&[
                "",
                "legendary",
                "miracle",
                "nyxtouched",
                "draft",
                "devoid",
                "tombstone",
                "colorshifted",
                "sunmoondfc",
                "compasslanddfc",
                "originpwdfc",
                "mooneldrazidfc",
            ]),
            frame: choice(&["1993", "1997", "2003", "2015", "future"]),
            games: choice(&["paper", "arena", "mtgo"]),
            id: text().pattern(ID_PATTERN)?.into(),
            lang: choice(&[
                "en", "es", "fr", "de", "it", "pt", "ja", "ko", "ru", "zhs", "zht", "he", "la",
                "grc", "ar", "sa", "px",
            ]),
            layout: choice(&[
                "normal",
                "split",
                "flip",
                "transform",
                "meld",
                "leveler",
                "saga",
                "planar",
                "scheme",
                "vanguard",
                "token",
                "double_faced_token",
                "emblem",
                "augment",
                "host",
            ]),
            legality: choice(&["legal", "not_legal", "restricted", "banned"]),
            mana_cost: text().pattern(mana_cost_pattern())?.into(),
            modifier: text().pattern(MODIFIER_PATTERN)?.into(),
            object: choice(&["card", "card_face", "related_card", "set", "list"]),
            rarity: choice(&["common", "uncommon", "rare", "mythic"]),
            set_type: choice(&[
                "core",
                "expansion",
                "masters",
                "masterpiece",
                "from_the_vault",
                "spellbook",
                "premium_deck",
                "duel_deck",
                "draft_innovation",
                "treasure_chest",
                "commander",
                "planechase",
                "archenemy",
                "vanguard",
                "funny",
                "starter",
                "box",
                "promo",
                "token",
                "memorabilia",
            ]),
        })
    }
}

/// URL shapes, one per host the catalog links to.
#[derive(Debug, Clone)]
pub struct UrlShapes {
    /// `https://api.scryfall.com`.
    pub api: Arc<SchemaNode>,
    /// `https://img.scryfall.com`.
    pub img: Arc<SchemaNode>,
    /// `https://scryfall.com`.
    pub scry: Arc<SchemaNode>,
    /// `https://shop.tcgplayer.com`.
    pub tcgplayer: Arc<SchemaNode>,
    /// `https://www.cardmarket.com`.
    pub cardmarket: Arc<SchemaNode>,
    /// `https://www.cardhoarder.com`.
    pub cardhoarder: Arc<SchemaNode>,
    /// `http://gatherer.wizards.com`.
    pub gatherer: Arc<SchemaNode>,
    /// `https://decks.tcgplayer.com`.
    pub tcgplayer_decks: Arc<SchemaNode>,
    /// `http://edhrec.com`.
    pub edhrec: Arc<SchemaNode>,
    /// `http://mtgtop8.com`.
    pub mtgtop8: Arc<SchemaNode>,
}

impl UrlShapes {
    /// Builds the URL shapes.
    pub fn build() -> Self {
        let host = |scheme: &str, netloc: &str| -> Arc<SchemaNode> {
            UrlRule::host(scheme, netloc).into()
        };
        Self {
            api: host("https", API_HOST),
            img: host("https", "img.scryfall.com"),
            scry: host("https", "scryfall.com"),
            tcgplayer: host("https", "shop.tcgplayer.com"),
            cardmarket: host("https", "www.cardmarket.com"),
            cardhoarder: host("https", "www.cardhoarder.com"),
            gatherer: host("http", "gatherer.wizards.com"),
            tcgplayer_decks: host("https", "decks.tcgplayer.com"),
            edhrec: host("http", "edhrec.com"),
            mtgtop8: host("http", "mtgtop8.com"),
        }
    }
}
