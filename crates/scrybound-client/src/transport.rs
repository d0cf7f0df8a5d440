//! Transports: where raw responses come from.
//!
//! A transport only moves bytes. It never interprets the body; that is the
//! trust boundary's job.

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::{debug, info};
use url::{form_urlencoded, Url};

use scrybound_core::RawResponse;

use crate::config::ClientConfig;
use crate::error::TransportError;

/// Header value used by [`FixtureTransport::with_json`].
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Source of raw responses for catalog requests.
pub trait Transport {
    /// Performs `GET path?query` and returns the header and body untouched.
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse, TransportError> {
        (**self).get(path, query)
    }
}

/// `path?query` with the query form-encoded; the key fixtures are stored under.
pub fn request_key(path: &str, query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        return path.to_string();
    }
    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query)
        .finish();
    format!("{}?{}", path, encoded)
}

/// Blocking HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base: Url,
}

impl HttpTransport {
    /// Transport for `config.api_url`.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent())
            .build()
            .map_err(TransportError::Build)?;
        Ok(Self {
            client,
            base: config.api_url.clone(),
        })
    }

    /// Base URL.
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, TransportError> {
        let text = format!("{}{}", self.base.as_str().trim_end_matches('/'), path);
        let mut url = Url::parse(&text).map_err(|source| TransportError::Url {
            url: text.clone(),
            source,
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse, TransportError> {
        let url = self.url(path, query)?;
        info!(url = %url, "GET");

        let request_error = |source| TransportError::Request {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url.clone()).send().map_err(request_error)?;

        let status = response.status();
        if let Some(err) =
            TransportError::from_status(status.as_u16(), status.canonical_reason().unwrap_or(""))
        {
            return Err(err);
        }

        let content_type = content_type_header(response.headers(), &url)?;
        let body = response.bytes().map_err(request_error)?.to_vec();
        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        Ok(RawResponse { content_type, body })
    }
}

/// Content-Type header text; absent is empty and left for the boundary to reject.
fn content_type_header(headers: &HeaderMap, url: &Url) -> Result<String, TransportError> {
    match headers.get(CONTENT_TYPE) {
        Some(value) => value
            .to_str()
            .map(str::to_owned)
            .map_err(|source| TransportError::Header {
                url: url.to_string(),
                source,
            }),
        None => Ok(String::new()),
    }
}

/// Offline transport serving canned responses keyed by [`request_key`].
///
/// Unknown requests answer `404: NOT FOUND`, like the live service.
#[derive(Debug, Default)]
pub struct FixtureTransport {
    responses: BTreeMap<String, Result<RawResponse, (u16, String)>>,
    requests: RefCell<Vec<String>>,
}

impl FixtureTransport {
    /// Empty transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `response` for `key`.
    pub fn with(mut self, key: impl Into<String>, response: RawResponse) -> Self {
        self.responses.insert(key.into(), Ok(response));
        self
    }

    /// Serves `body` as `application/json; charset=utf-8` for `key`.
    pub fn with_json(self, key: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.with(key, RawResponse::new(JSON_CONTENT_TYPE, body))
    }

    /// Answers `key` with an error status.
    pub fn with_status(mut self, key: impl Into<String>, status: u16, reason: &str) -> Self {
        self.responses
            .insert(key.into(), Err((status, reason.to_string())));
        self
    }

    /// Every request key served so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for FixtureTransport {
    fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse, TransportError> {
        let key = request_key(path, query);
        debug!(key = %key, "fixture request");
        self.requests.borrow_mut().push(key.clone());
        match self.responses.get(&key) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err((status, reason))) => Err(TransportError::from_status(*status, reason)
                .unwrap_or(TransportError::Server {
                    status: *status,
                    reason: reason.to_ascii_uppercase(),
                })),
            None => Err(TransportError::Client {
                status: 404,
                reason: "NOT FOUND".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn request_key_encodes_query() {
        assert_eq!(request_key("/sets", &[]), "/sets");
        assert_eq!(
            request_key("/cards/search", &[("q", "set:rna ")]),
            "/cards/search?q=set%3Arna+"
        );
    }

    #[test]
    fn content_type_header_is_read_verbatim() {
        let url = Url::parse("https://api.scryfall.com/sets").unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(content_type_header(&headers, &url).unwrap(), "");

        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        assert_eq!(content_type_header(&headers, &url).unwrap(), JSON_CONTENT_TYPE);
    }

    #[test]
    fn non_ascii_content_type_is_an_error() {
        let url = Url::parse("https://api.scryfall.com/sets").unwrap();
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_bytes(b"application/json; charset=\xff").unwrap();
        headers.insert(CONTENT_TYPE, value);
        let err = content_type_header(&headers, &url).unwrap_err();
        assert!(matches!(err, TransportError::Header { .. }));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn http_url_keeps_base_path() {
        let config = ClientConfig::default()
            .with_api_url("http://127.0.0.1:5000/mirror/")
            .unwrap();
        let transport = HttpTransport::new(&config).unwrap();
        let url = transport.url("/cards", &[("page", "2")]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/mirror/cards?page=2");
    }
}
