//! Client configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

use scrybound_core::BoundaryConfig;

use crate::error::ClientError;

/// Base URL of the public catalog API.
pub const DEFAULT_API_URL: &str = "https://api.scryfall.com";

/// Settings for [`crate::CatalogClient`] and [`crate::HttpTransport`].
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```json
/// { "api_url": "http://127.0.0.1:5000", "boundary": { "form": "NFKC" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL requests are sent to.
    pub api_url: Url,
    /// `User-Agent` header; defaults to `scrybound/<version>`.
    pub user_agent: Option<String>,
    /// Accepted media type, charset and normalization form.
    pub boundary: BoundaryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            user_agent: None,
            boundary: BoundaryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Loads a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ClientError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ClientError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces the base URL.
    pub fn with_api_url(mut self, url: &str) -> Result<Self, ClientError> {
        self.api_url = Url::parse(url).map_err(|source| ClientError::ApiUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(self)
    }

    /// `User-Agent` sent with every request.
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("scrybound/{}", env!("CARGO_PKG_VERSION")))
    }
}
