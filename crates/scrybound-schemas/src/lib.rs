//! Catalog object schemas for the scrybound trust boundary.
//!
//! Shapes are built once, leaves first, and shared by reference: the UUID
//! rule used by a card's `id` is the same node used by a set's `id`. After
//! construction nothing here is mutated.

#![deny(missing_docs)]

/// Primitive and URL rules.
pub mod leaves;
/// Mana cost symbols.
pub mod mana;
/// Composite catalog objects.
pub mod objects;
/// Schemas by name.
pub mod registry;

pub use leaves::{Leaves, UrlShapes, API_HOST, DATE_PATTERN, ID_PATTERN, MODIFIER_PATTERN};
pub use mana::{mana_cost_pattern, FACE_SEPARATOR, MANA_SYMBOLS};
pub use objects::{list_envelope, CatalogSchemas};
pub use registry::{SchemaError, SchemaRegistry};
