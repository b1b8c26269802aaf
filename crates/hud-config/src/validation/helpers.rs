//! Shared format checks used by the section validators.

use std::sync::LazyLock;

use regex::Regex;

/// `scheme://host[:port]` with no path.
static ORIGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[A-Za-z0-9.\-]+(:[0-9]{1,5})?$").unwrap());

/// An http(s) URL with an optional path.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[A-Za-z0-9.\-]+(:[0-9]{1,5})?(/\S*)?$").unwrap());

/// Push an error if `value` is not a bare origin.
pub(crate) fn validate_origin(errors: &mut Vec<String>, name: &str, value: &str) {
    if !ORIGIN_RE.is_match(value) {
        errors.push(format!("{name} = {value:?} is not an origin (scheme://host[:port])"));
    }
}

/// Push an error if `value` is not an http(s) URL.
pub(crate) fn validate_url(errors: &mut Vec<String>, name: &str, value: &str) {
    if !URL_RE.is_match(value) {
        errors.push(format!("{name} = {value:?} is not an http(s) URL"));
    }
}
