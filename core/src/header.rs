//! Multi-valued HTTP headers and their map form.
//!
//! # Design
//! Requests and responses carry headers as an ordered `Vec<Header>` so that
//! request options can append without clobbering earlier entries. Transports
//! work with the grouped `HeaderMap` form instead. When several entries share
//! a key, `to_map` concatenates their values in order rather than keeping
//! only the last one, so headers like `Set-Cookie` survive the conversion.

use std::collections::BTreeMap;

/// Header values grouped by key.
pub type HeaderMap = BTreeMap<String, Vec<String>>;

/// A header key with one or more values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    key: String,
    values: Vec<String>,
}

impl Header {
    pub fn new(key: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }

    /// A header carrying exactly one value.
    pub fn single(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, vec![value.into()])
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Group headers by key, concatenating the values of repeated keys.
pub fn to_map(headers: &[Header]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for header in headers {
        map.entry(header.key.clone())
            .or_default()
            .extend(header.values.iter().cloned());
    }
    map
}

/// Flatten a map into one `Header` per key.
pub fn from_map(map: HeaderMap) -> Vec<Header> {
    map.into_iter()
        .map(|(key, values)| Header { key, values })
        .collect()
}

/// Look up all values for `key`, ignoring ASCII case.
pub fn find<'a>(headers: &'a [Header], key: &str) -> Vec<&'a str> {
    headers
        .iter()
        .filter(|h| h.key.eq_ignore_ascii_case(key))
        .flat_map(|h| h.values.iter().map(String::as_str))
        .collect()
}

/// Canonical form of a header name: the first letter and every letter after
/// a hyphen upper-cased, the rest lower-cased (`content-type` becomes
/// `Content-Type`). Names containing anything but token characters are
/// returned unchanged.
pub fn canonical_key(key: &str) -> String {
    if !key.bytes().all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)) {
        return key.to_string();
    }
    let mut out = String::with_capacity(key.len());
    let mut upper = true;
    for c in key.chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    out
}
