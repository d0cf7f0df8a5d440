//! Subcommand implementations.

pub mod canonicalize;
pub mod cards;
pub mod schemas;
pub mod search;
pub mod set;
pub mod sets;
pub mod validate;

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use scrybound_client::{CatalogClient, ClientConfig, ClientError, HttpTransport};

/// Flags shared by every subcommand.
pub struct Options {
    pub api_url: Option<String>,
    pub config: Option<PathBuf>,
    pub json: bool,
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
}

impl Options {
    /// Config file (if any) with `--api-url` applied on top.
    pub fn client_config(&self) -> Result<ClientConfig, ClientError> {
        let config = match &self.config {
            Some(path) => ClientConfig::from_path(path)?,
            None => ClientConfig::default(),
        };
        match &self.api_url {
            Some(url) => config.with_api_url(url),
            None => Ok(config),
        }
    }

    /// HTTP-backed client for the configured API.
    pub fn client(&self) -> Result<CatalogClient<HttpTransport>, Box<dyn std::error::Error>> {
        let config = self.client_config()?;
        debug!(api_url = %config.api_url, "connecting");
        let transport = HttpTransport::new(&config)?;
        Ok(CatalogClient::with_config(transport, &config.boundary)?)
    }
}

/// Reads `path`, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>, InputError> {
    match path {
        Some(path) => std::fs::read(path).map_err(|source| InputError::File {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .map_err(InputError::Stdin)?;
            Ok(buffer)
        }
    }
}
