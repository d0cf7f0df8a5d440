use std::path::PathBuf;
use thiserror::Error;

use scrybound_core::{BoundaryError, ConfigError, ErrorKind};
use scrybound_schemas::SchemaError;

/// Failures before a response reaches the trust boundary.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The server answered 4xx.
    #[error("{status}: {reason}")]
    Client {
        /// HTTP status code.
        status: u16,
        /// Upper-cased reason phrase.
        reason: String,
    },
    /// The server answered 5xx.
    #[error("{status}: {reason}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Upper-cased reason phrase.
        reason: String,
    },
    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Request {
        /// Requested URL.
        url: String,
        /// Underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },
    /// The Content-Type header is not visible ASCII.
    #[error("invalid Content-Type header from {url}: {source}")]
    Header {
        /// Requested URL.
        url: String,
        /// Header conversion error.
        #[source]
        source: reqwest::header::ToStrError,
    },
    /// The request URL could not be built.
    #[error("invalid request URL {url}: {source}")]
    Url {
        /// Offending URL text.
        url: String,
        /// Parser diagnostic.
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl TransportError {
    /// Maps an error status to `Client` or `Server`; `None` for success codes.
    pub fn from_status(status: u16, reason: &str) -> Option<Self> {
        let reason = reason.to_ascii_uppercase();
        match status {
            400..=499 => Some(TransportError::Client { status, reason }),
            500..=599 => Some(TransportError::Server { status, reason }),
            _ => None,
        }
    }

    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Client { status, .. } | TransportError::Server { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Errors returned by the catalog client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The response was rejected or the request failed.
    #[error(transparent)]
    Boundary(#[from] BoundaryError),
    /// Bindings could not be registered.
    #[error(transparent)]
    Binding(#[from] ConfigError),
    /// Schemas could not be built or looked up.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// A configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path of the file.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A configuration file is not valid JSON for [`crate::ClientConfig`].
    #[error("invalid config {path}: {source}")]
    ConfigParse {
        /// Path of the file.
        path: PathBuf,
        /// Parser diagnostic.
        #[source]
        source: serde_json::Error,
    },
    /// An API base URL could not be parsed.
    #[error("invalid API URL {url}: {source}")]
    ApiUrl {
        /// Offending URL text.
        url: String,
        /// Parser diagnostic.
        #[source]
        source: url::ParseError,
    },
    /// A validated payload does not have the page or item-list shape.
    #[error("unexpected page shape: {0}")]
    Page(#[source] serde_json::Error),
}

impl ClientError {
    /// Error class of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Boundary(err) => err.kind(),
            ClientError::Page(_) => ErrorKind::Format,
            ClientError::Binding(_)
            | ClientError::Schema(_)
            | ClientError::ConfigRead { .. }
            | ClientError::ConfigParse { .. }
            | ClientError::ApiUrl { .. } => ErrorKind::Config,
        }
    }

    /// The transport failure, if the request itself failed.
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            ClientError::Boundary(BoundaryError::Operation { source, .. }) => {
                source.downcast_ref::<TransportError>()
            }
            _ => None,
        }
    }
}
