//! Flat key/value parsing for urlencoded bodies and query strings.

use std::collections::BTreeMap;
use url::form_urlencoded;

/// Parse an `application/x-www-form-urlencoded` body.
///
/// Keys that repeat keep their last value.
pub fn parse_form(body: &[u8]) -> BTreeMap<String, String> {
    form_urlencoded::parse(body).into_owned().collect()
}

/// Parse a raw query string (without the leading `?`).
pub fn parse_query(query: &str) -> BTreeMap<String, String> {
    parse_form(query.as_bytes())
}
