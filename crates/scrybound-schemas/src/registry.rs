//! Schemas by name.

use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

use scrybound_core::{ConfigError, SchemaNode};

use crate::objects::CatalogSchemas;

/// Registry lookup failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// No schema is registered under the name.
    #[error("unknown schema: {0}")]
    Unknown(String),
    /// A rule could not be built.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Read-only map from name to schema.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: BTreeMap<&'static str, Arc<SchemaNode>>,
}

impl SchemaRegistry {
    /// Registry of every catalog shape, leaf and URL rule.
    pub fn catalog() -> Result<Self, SchemaError> {
        Ok(Self::from_catalog(&CatalogSchemas::build()?))
    }

    /// Registry naming the shapes of an already built catalog.
    pub fn from_catalog(c: &CatalogSchemas) -> Self {
        let l = &c.leaves;
        let u = &c.urls;
        let entries = [
            ("boolean", &l.boolean),
            ("integer", &l.integer),
            ("count", &l.count),
            ("decimal", &l.decimal),
            ("text", &l.text),
            ("border", &l.border),
            ("code", &l.code),
            ("color", &l.color),
            ("component", &l.component),
            ("date", &l.date),
            ("effect", &l.effect),
            ("frame", &l.frame),
            ("games", &l.games),
            ("id", &l.id),
            ("lang", &l.lang),
            ("layout", &l.layout),
            ("legality", &l.legality),
            ("mana_cost", &l.mana_cost),
            ("modifier", &l.modifier),
            ("object", &l.object),
            ("rarity", &l.rarity),
            ("set_type", &l.set_type),
            ("url_api", &u.api),
            ("url_img", &u.img),
            ("url_scry", &u.scry),
            ("url_tcgplayer", &u.tcgplayer),
            ("url_cardmarket", &u.cardmarket),
            ("url_cardhoarder", &u.cardhoarder),
            ("url_gatherer", &u.gatherer),
            ("url_tcgplayer_decks", &u.tcgplayer_decks),
            ("url_edhrec", &u.edhrec),
            ("url_mtgtop8", &u.mtgtop8),
            ("image_uris", &c.image_uris),
            ("card_face", &c.card_face),
            ("related_card", &c.related_card),
            ("legalities", &c.legalities),
            ("purchase_uris", &c.purchase_uris),
            ("related_uris", &c.related_uris),
            ("set", &c.set),
            ("card", &c.card),
            ("sets", &c.sets),
            ("cards", &c.cards),
            ("set_list", &c.set_list),
            ("card_list", &c.card_list),
        ];
        let schemas = entries
            .into_iter()
            .map(|(name, node)| (name, node.clone()))
            .collect();
        Self { schemas }
    }

    /// Schema registered as `name`.
    pub fn get(&self, name: &str) -> Option<&Arc<SchemaNode>> {
        self.schemas.get(name)
    }

    /// Schema registered as `name`, or [`SchemaError::Unknown`].
    pub fn require(&self, name: &str) -> Result<Arc<SchemaNode>, SchemaError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| SchemaError::Unknown(name.to_string()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schemas.keys().copied()
    }
}
