//! Catalog API client for scrybound.
//!
//! Requests go through a [`Transport`]; every response then crosses the
//! trust boundary before a caller sees it. [`HttpTransport`] talks to the
//! live service, [`FixtureTransport`] serves canned responses offline.
//!
#![deny(missing_docs)]

/// Catalog operations and their bindings.
pub mod client;
/// Client configuration.
pub mod config;
/// Transport and client errors.
pub mod error;
/// HTTP and fixture transports.
pub mod transport;

pub use client::{build_query, catalog_bindings, ops, CatalogClient, Page};
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use error::{ClientError, TransportError};
pub use transport::{request_key, FixtureTransport, HttpTransport, Transport, JSON_CONTENT_TYPE};
