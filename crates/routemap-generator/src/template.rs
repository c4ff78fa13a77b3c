//! Route template expansion.
//!
//! Dynamic routes mark parameters with a `$` sigil, e.g. `/posts/$slug`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use routemap_core::RouteParams;

/// Marks a parameter placeholder in a route pattern.
pub const PARAM_SIGIL: char = '$';

/// Characters left unescaped in parameter values. Matches the set kept by
/// ECMAScript `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Whether the route contains a parameter placeholder.
pub fn is_dynamic(route: &str) -> bool {
    route.contains(PARAM_SIGIL)
}

/// Substitute each binding into the template.
///
/// Every key replaces the first occurrence of `$key` with its percent-encoded
/// value, in binding order. Placeholders with no binding are left as they are.
pub fn build_dynamic_url(template: &str, params: &RouteParams) -> String {
    let mut url = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{PARAM_SIGIL}{key}");
        let encoded = utf8_percent_encode(value, COMPONENT).to_string();
        url = url.replacen(&placeholder, &encoded, 1);
    }
    url
}

/// Names of the placeholders declared in a route pattern, in order.
///
/// A name runs from the sigil to the next `/` or sigil.
pub fn placeholders(route: &str) -> Vec<&str> {
    route
        .split(PARAM_SIGIL)
        .skip(1)
        .map(|segment| segment.split('/').next().unwrap_or_default())
        .filter(|name| !name.is_empty())
        .collect()
}
