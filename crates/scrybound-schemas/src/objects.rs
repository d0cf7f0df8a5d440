//! Composite catalog objects, built bottom-up from the leaf rules.

use std::sync::Arc;

use scrybound_core::{ConfigError, MappingRule, SchemaNode};

use crate::leaves::{Leaves, UrlShapes};

fn seq(element: &Arc<SchemaNode>) -> Arc<SchemaNode> {
    Arc::new(SchemaNode::sequence_of(element.clone()))
}

fn node(rule: MappingRule) -> Arc<SchemaNode> {
    rule.into()
}

/// Every catalog object shape.
#[derive(Debug, Clone)]
pub struct CatalogSchemas {
    /// Primitive rules.
    pub leaves: Leaves,
    /// URL rules.
    pub urls: UrlShapes,
    /// Image links of a card or face.
    pub image_uris: Arc<SchemaNode>,
    /// One face of a multi-faced card.
    pub card_face: Arc<SchemaNode>,
    /// Token, meld part or combo piece linked from a card.
    pub related_card: Arc<SchemaNode>,
    /// Legality in every format.
    pub legalities: Arc<SchemaNode>,
    /// Storefront links.
    pub purchase_uris: Arc<SchemaNode>,
    /// Third-party reference links.
    pub related_uris: Arc<SchemaNode>,
    /// Set object.
    pub set: Arc<SchemaNode>,
    /// Card object.
    pub card: Arc<SchemaNode>,
    /// Sequence of sets.
    pub sets: Arc<SchemaNode>,
    /// Sequence of cards.
    pub cards: Arc<SchemaNode>,
    /// Paginated list envelope of sets.
    pub set_list: Arc<SchemaNode>,
    /// Paginated list envelope of cards.
    pub card_list: Arc<SchemaNode>,
}

impl CatalogSchemas {
    /// Builds every shape, leaves first.
    pub fn build() -> Result<Self, ConfigError> {
        let l = Leaves::build()?;
        let u = UrlShapes::build();

        let image_uris = node(
            MappingRule::new()
                .optional("small", u.img.clone())
                .optional("normal", u.img.clone())
                .optional("large", u.img.clone())
                .optional("png", u.img.clone())
                .optional("art_crop", u.img.clone())
                .optional("border_crop", u.img.clone()),
        );

        let card_face = node(
            MappingRule::new()
                .require("name", l.text.clone())
                .require("object", l.object.clone())
                .require("type_line", l.text.clone())
                .require("mana_cost", l.mana_cost.clone())
                .optional("artist", l.text.clone())
                .optional("flavor_text", l.text.clone())
                .optional("illustration_id", l.id.clone())
                .optional("loyalty", l.text.clone())
                .optional("oracle_text", l.text.clone())
                .optional("power", l.text.clone())
                .optional("printed_name", l.text.clone())
                .optional("printed_text", l.text.clone())
                .optional("printed_type_line", l.text.clone())
                .optional("toughness", l.text.clone())
                .optional("watermark", l.text.clone())
                .optional("color_indicator", seq(&l.color))
                .optional("colors", seq(&l.color))
                .optional("image_uris", image_uris.clone()),
        );

        let related_card = node(
            MappingRule::new()
                .require("id", l.id.clone())
                .require("object", l.object.clone())
                .require("component", l.component.clone())
                .require("name", l.text.clone())
                .require("type_line", l.text.clone())
                .require("uri", u.api.clone()),
        );

        let legalities = node(
            [
                "standard",
                "future",
                "frontier",
                "modern",
                "legacy",
                "pauper",
                "vintage",
                "penny",
                "commander",
                "1v1",
                "duel",
                "brawl",
            ]
            .into_iter()
            .fold(MappingRule::new(), |rule, format| {
                rule.require(format, l.legality.clone())
            }),
        );

        let purchase_uris = node(
            MappingRule::new()
                .require("tcgplayer", u.tcgplayer.clone())
                .require("cardmarket", u.cardmarket.clone())
                .require("cardhoarder", u.cardhoarder.clone()),
        );

        let related_uris = node(
            MappingRule::new()
                .optional("gatherer", u.gatherer.clone())
                .optional("tcgplayer_decks", u.tcgplayer_decks.clone())
                .optional("edhrec", u.edhrec.clone())
                .optional("mtgtop8", u.mtgtop8.clone()),
        );

        let set = node(
            MappingRule::new()
                .require("object", l.object.clone())
                .require("id", l.id.clone())
                .require("code", l.code.clone())
                .require("name", l.text.clone())
                .require("set_type", l.set_type.clone())
                .require("card_count", l.count.clone())
                .require("digital", l.boolean.clone())
                .require("foil_only", l.boolean.clone())
                .require("icon_svg_uri", u.img.clone())
                .require("search_uri", u.api.clone())
                .optional("tcgplayer_id", l.integer.clone())
                .optional("released_at", l.date.clone())
                .optional("block_code", l.code.clone())
                .optional("block", l.text.clone())
                .optional("parent_set_code", l.code.clone())
                .optional("mtgo_code", l.code.clone())
                .optional("uri", u.api.clone())
                .optional("scryfall_uri", u.scry.clone()),
        );

        let card = node(
            MappingRule::new()
                .require("id", l.id.clone())
                .require("lang", l.lang.clone())
                .require("object", l.object.clone())
                .require("oracle_id", l.id.clone())
                .require("cmc", l.decimal.clone())
                .require("foil", l.boolean.clone())
                .require("layout", l.layout.clone())
                .require("name", l.text.clone())
                .require("nonfoil", l.boolean.clone())
                .require("oversized", l.boolean.clone())
                .require("reserved", l.boolean.clone())
                .require("type_line", l.text.clone())
                .require("border_color", l.border.clone())
                .require("collector_number", l.text.clone())
                .require("digital", l.boolean.clone())
                .require("frame", l.frame.clone())
                .require("frame_effect", l.effect.clone())
                .require("full_art", l.boolean.clone())
                .require("highres_image", l.boolean.clone())
                .require("promo", l.boolean.clone())
                .require("rarity", l.rarity.clone())
                .require("released_at", l.date.clone())
                .require("reprint", l.boolean.clone())
                .require("set", l.code.clone())
                .require("set_name", l.text.clone())
                .require("story_spotlight", l.boolean.clone())
                .require("color_identity", seq(&l.color))
                .require("prints_search_uri", u.api.clone())
                .require("rulings_uri", u.api.clone())
                .require("scryfall_uri", u.scry.clone())
                .require("uri", u.api.clone())
                .require("purchase_uris", purchase_uris.clone())
                .require("related_uris", related_uris.clone())
                .require("scryfall_set_uri", u.scry.clone())
                .require("set_search_uri", u.api.clone())
                .require("games", seq(&l.games))
                .require("set_uri", u.api.clone())
                .optional("arena_id", l.integer.clone())
                .optional("mtgo_id", l.integer.clone())
                .optional("mtgo_foil_id", l.integer.clone())
                .optional("tcgplayer_id", l.integer.clone())
                .optional("edhrec_rank", l.integer.clone())
                .optional("hand_modifier", l.modifier.clone())
                .optional("life_modifier", l.modifier.clone())
                .optional("loyalty", l.text.clone())
                .optional("oracle_text", l.text.clone())
                .optional("power", l.text.clone())
                .optional("toughness", l.text.clone())
                .optional("artist", l.text.clone())
                .optional("eur", l.text.clone())
                .optional("flavor_text", l.text.clone())
                .optional("illustration_id", l.id.clone())
                .optional("printed_name", l.text.clone())
                .optional("printed_text", l.text.clone())
                .optional("printed_type_line", l.text.clone())
                .optional("tix", l.text.clone())
                .optional("usd", l.text.clone())
                .optional("watermark", l.text.clone())
                .optional("timeshifted", l.boolean.clone())
                .optional("colorshifted", l.boolean.clone())
                .optional("futureshifted", l.boolean.clone())
                .optional("multiverse_ids", seq(&l.integer))
                .optional("all_parts", seq(&related_card))
                .optional("card_faces", seq(&card_face))
                .optional("colors", seq(&l.color))
                .optional("color_indicator", seq(&l.color))
                .optional("legalities", legalities.clone())
                .optional("mana_cost", l.mana_cost.clone())
                .optional("image_uris", image_uris.clone()),
        );

        let sets = seq(&set);
        let cards = seq(&card);
        let set_list = node(list_envelope(&l, &u, sets.clone()));
        let card_list = node(list_envelope(&l, &u, cards.clone()));

        Ok(Self {
            leaves: l,
            urls: u,
            image_uris,
            card_face,
            related_card,
            legalities,
            purchase_uris,
            related_uris,
            set,
            card,
            sets,
            cards,
            set_list,
            card_list,
        })
    }
}

/// Paginated list envelope around `data`.
pub fn list_envelope(l: &Leaves, u: &UrlShapes, data: Arc<SchemaNode>) -> MappingRule {
    MappingRule::new()
        .require("object", l.object.clone())
        .require("has_more", l.boolean.clone())
        .require("data", data)
        .optional("total_cards", l.count.clone())
        .optional("next_page", u.api.clone())
        .optional("warnings", seq(&l.text))
}
