//! Catalog operations behind the trust boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use scrybound_core::{
    Binding, BindingRegistry, BoundaryConfig, BoundaryError, ConfigError, SchemaNode,
    TrustBoundary,
};
use scrybound_schemas::CatalogSchemas;

use crate::error::ClientError;
use crate::transport::Transport;

/// Names under which the catalog operations are bound.
pub mod ops {
    /// All sets.
    pub const SETS: &str = "sets";
    /// One page of all cards.
    pub const CARDS: &str = "cards";
    /// One set by code.
    pub const SET: &str = "set";
    /// Full-text card search.
    pub const CARDS_SEARCH: &str = "cards_search";
    /// One page of all cards with its list envelope.
    pub const CARDS_PAGE: &str = "cards_page";

    /// Every operation the client performs.
    pub const ALL: &[&str] = &[SETS, CARDS, SET, CARDS_SEARCH, CARDS_PAGE];
}

/// Binds every catalog operation to its schema.
pub fn catalog_bindings(
    schemas: &CatalogSchemas,
    config: &BoundaryConfig,
) -> Result<BindingRegistry, ConfigError> {
    let bind = |schema: Arc<SchemaNode>| Binding::new(schema).form(config.form);
    let registry = BindingRegistry::builder()
        .bind(ops::SETS, bind(schemas.sets.clone()).keyfilter("data"))?
        .bind(ops::CARDS, bind(schemas.cards.clone()).keyfilter("data"))?
        .bind(ops::SET, bind(schemas.set.clone()))?
        .bind(ops::CARDS_SEARCH, bind(schemas.cards.clone()).keyfilter("data"))?
        .bind(ops::CARDS_PAGE, bind(schemas.card_list.clone()))?
        .build();
    registry.require(ops::ALL)?;
    Ok(registry)
}

/// Full-text search fragment restricting results to one set.
///
/// `Some("rna")` gives `"set:rna "`; `None` gives an empty query.
pub fn build_query(set_code: Option<&str>) -> String {
    match set_code {
        Some(code) => format!("set:{} ", code),
        None => String::new(),
    }
}

/// One page of a paginated list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Whether another page follows.
    pub has_more: bool,
    /// URL of the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    /// Total results across every page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cards: Option<u64>,
    /// Validated items on this page.
    pub data: Vec<Value>,
    /// Server warnings about the request.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Client for the card catalog. Nothing it returns has skipped validation.
#[derive(Debug)]
pub struct CatalogClient<T> {
    transport: T,
    boundary: TrustBoundary,
    schemas: CatalogSchemas,
}

impl<T: Transport> CatalogClient<T> {
    /// Client with the default boundary settings.
    pub fn new(transport: T) -> Result<Self, ClientError> {
        Self::with_config(transport, &BoundaryConfig::default())
    }

    /// Client with explicit boundary settings.
    pub fn with_config(transport: T, config: &BoundaryConfig) -> Result<Self, ClientError> {
        let schemas = CatalogSchemas::build()?;
        let registry = catalog_bindings(&schemas, config)?;
        Ok(Self {
            transport,
            boundary: TrustBoundary::with_config(registry, config),
            schemas,
        })
    }

    /// Transport in use.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Schemas in use.
    pub fn schemas(&self) -> &CatalogSchemas {
        &self.schemas
    }

    /// Every set.
    pub fn sets(&self) -> Result<Vec<Value>, ClientError> {
        into_items(self.fetch(ops::SETS, "/sets", &[])?)
    }

    /// Cards on `page` (the first page when `None`).
    pub fn cards(&self, page: Option<u32>) -> Result<Vec<Value>, ClientError> {
        let page = page.map(|p| p.to_string());
        let query: Vec<(&str, &str)> = page.iter().map(|p| ("page", p.as_str())).collect();
        into_items(self.fetch(ops::CARDS, "/cards", &query)?)
    }

    /// The set with `code`.
    pub fn set_by_code(&self, code: &str) -> Result<Value, ClientError> {
        self.schemas
            .leaves
            .code
            .validate(&Value::String(code.to_string()), "code")
            .map_err(BoundaryError::from)?;
        let path = format!("/sets/{}", code.to_ascii_lowercase());
        self.fetch(ops::SET, &path, &[])
    }

    /// Cards matching a full-text `query`.
    pub fn cards_search(&self, query: &str) -> Result<Vec<Value>, ClientError> {
        into_items(self.fetch(ops::CARDS_SEARCH, "/cards/search", &[("q", query)])?)
    }

    /// `page` of all cards with its pagination fields.
    pub fn cards_page(&self, page: u32) -> Result<Page, ClientError> {
        let page = page.to_string();
        let envelope = self.fetch(ops::CARDS_PAGE, "/cards", &[("page", page.as_str())])?;
        serde_json::from_value(envelope).map_err(ClientError::Page)
    }

    fn fetch(
        &self,
        operation: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, ClientError> {
        debug!(operation = %operation, path = %path, "catalog request");
        let value = self
            .boundary
            .call(operation, || self.transport.get(path, query))?;
        Ok(value)
    }
}

/// Items of a validated sequence; anything else is a page-shape error.
fn into_items(value: Value) -> Result<Vec<Value>, ClientError> {
    serde_json::from_value(value).map_err(ClientError::Page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrybound_core::ErrorKind;
    use serde_json::json;

    #[test]
    fn sequence_becomes_items() {
        let items = into_items(json!([{"object": "set"}, {"object": "set"}])).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn non_sequence_is_a_page_error() {
        let err = into_items(json!({"object": "set"})).unwrap_err();
        assert!(matches!(err, ClientError::Page(_)));
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
