//! URL decomposition.
//!
//! Splits a string into its components without percent-decoding anything.
//! Only the scheme is normalized (to lowercase); every other component is
//! exactly what the server sent.

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// RFC 3986, appendix B.
const URI_REFERENCE: &str = r"^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$";

/// Raw components of a URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlParts<'a> {
    /// Lowercased scheme without `:`.
    pub scheme: Cow<'a, str>,
    /// Authority (userinfo, host and port) without `//`.
    pub netloc: &'a str,
    /// Path without the parameters of its last segment.
    pub path: &'a str,
    /// Parameters of the last path segment, without `;`.
    pub params: &'a str,
    /// Query without `?`.
    pub query: &'a str,
    /// Fragment without `#`.
    pub fragment: &'a str,
}

fn uri_reference() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(URI_REFERENCE).expect("invalid regex"))
}

/// Splits `s` into scheme, netloc, path, params, query and fragment.
/// Absent components are empty strings.
pub fn split_url(s: &str) -> UrlParts<'_> {
    let Some(caps) = uri_reference().captures(s) else {
        return UrlParts {
            path: s,
            ..UrlParts::default()
        };
    };
    let group = |i| caps.get(i).map_or("", |m| m.as_str());

    let full_path = group(3);
    let last_segment = full_path.rfind('/').map_or(0, |i| i + 1);
    let (path, params) = match full_path[last_segment..].find(';') {
        Some(i) => (
            &full_path[..last_segment + i],
            &full_path[last_segment + i + 1..],
        ),
        None => (full_path, ""),
    };

    let scheme = group(1);
    let scheme = if scheme.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(scheme.to_ascii_lowercase())
    } else {
        Cow::Borrowed(scheme)
    };

    UrlParts {
        scheme,
        netloc: group(2),
        path,
        params,
        query: group(4),
        fragment: group(5),
    }
}
