//! Base URL validation and request URL assembly.
//!
//! Query strings are canonical: keys come out sorted because filters are a
//! `BTreeMap`, and both keys and values are percent-encoded. Two calls with
//! the same filters always yield the same URL.

use std::collections::BTreeMap;

use url::Url;

use crate::error::ApiError;

/// Query parameters for list requests, e.g. `filter[country] => GB`.
pub type Filters = BTreeMap<String, String>;

/// Check that `base_url` is a usable absolute URL and return its normalised
/// form with trailing slashes stripped.
///
/// The returned string is the parser's serialisation, so every request URL is
/// built from exactly what was validated. Performs no network access.
pub fn validate_base_url(base_url: &str) -> Result<String, ApiError> {
    let base_url = base_url.trim();
    if base_url.is_empty() {
        return Err(ApiError::EmptyBaseUrl);
    }
    let invalid = |reason: &str| ApiError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: reason.to_string(),
    };
    // The URL parser silently drops tabs and newlines.
    if base_url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid("URL contains whitespace or control characters"));
    }
    let parsed = Url::parse(base_url).map_err(|e| invalid(&e.to_string()))?;
    if parsed.cannot_be_a_base() || !parsed.has_host() {
        return Err(invalid("URL has no host"));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("URL carries a query or fragment"));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

/// `host + path`, followed by `?k=v&k=v` when `query` is non-empty.
pub fn build_url(host: &str, path: &str, query: &BTreeMap<String, String>) -> String {
    let mut url = format!("{host}{path}");
    if !query.is_empty() {
        url.push('?');
        url.push_str(&encode_query(query));
    }
    url
}

/// Percent-encode a caller-supplied path segment such as an account id.
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

fn encode_query(query: &BTreeMap<String, String>) -> String {
    query
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
