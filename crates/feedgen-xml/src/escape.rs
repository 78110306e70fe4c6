//! Escaping for URL-bearing values and printed markup.
//!
//! [`sanitize`] is applied by renderers to URL fields before they land in an
//! attribute or a URL-shaped text node. The printer escapes again on output,
//! but treats an existing `&amp;` as a plain `&` first, so sanitized values are
//! never double-escaped.

use std::borrow::Cow;

use quick_xml::escape::{escape, partial_escape};

/// Replace every literal `&` with `&amp;`.
///
/// # Examples
///
/// ```
/// use feedgen_xml::sanitize;
///
/// assert_eq!(sanitize("https://example.com/?a=1&b=2"), "https://example.com/?a=1&amp;b=2");
/// ```
#[must_use]
pub fn sanitize(url: &str) -> String {
    url.replace('&', "&amp;")
}

/// [`sanitize`] lifted over an optional value.
#[must_use]
pub fn sanitize_opt(url: Option<&str>) -> Option<String> {
    url.map(sanitize)
}

/// Escape character data for a text node (`&`, `<`, `>`).
pub(crate) fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let collapsed = text.replace("&amp;", "&");
    Cow::Owned(partial_escape(collapsed.as_str()).into_owned())
}

/// Escape an attribute value (`&`, `<`, `>`, quotes).
pub(crate) fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let collapsed = value.replace("&amp;", "&");
    Cow::Owned(escape(collapsed.as_str()).into_owned())
}
