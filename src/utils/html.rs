//! HTML utility functions.
//!
//! Provides the markup pieces the renderer needs:
//! - `escape_attr()` - HTML entity escaping of attribute values
//! - `Attrs` - ordered attribute list
//! - `element()`, `tags()` - void and container element serialization

use std::borrow::Cow;

// =============================================================================
// HTML Escaping
// =============================================================================

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML attribute values.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_with(s, &ESCAPE_CHARS)
}

/// Internal: escape with specified character set.
#[inline]
fn escape_with<'a>(s: &'a str, chars: &[char]) -> Cow<'a, str> {
    if !s.contains(chars) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

// =============================================================================
// Element Serialization
// =============================================================================

/// Ordered `name="value"` pairs. Insertion order is output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs(Vec<(&'static str, String)>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute (builder style).
    pub fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        self.set(name, value);
        self
    }

    /// Set an attribute, replacing an existing value in place.
    pub fn set(&mut self, name: &'static str, value: impl ToString) {
        let value = value.to_string();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    fn write_to(&self, out: &mut String) {
        for (name, value) in &self.0 {
            out.push_str(&format!(" {name}=\"{}\"", escape_attr(value)));
        }
    }
}

/// Serialize a void element: `<img a="b" />`.
pub fn element(tag: &str, attrs: &Attrs) -> String {
    let mut out = String::with_capacity(64);
    out.push('<');
    out.push_str(tag);
    attrs.write_to(&mut out);
    out.push_str(" />");
    out
}

/// Serialize a container element around already-serialized `inner` markup.
pub fn tags(tag: &str, attrs: &Attrs, inner: &str) -> String {
    let mut out = String::with_capacity(inner.len() + 64);
    out.push('<');
    out.push_str(tag);
    attrs.write_to(&mut out);
    out.push('>');
    out.push_str(inner);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    out
}

// =============================================================================
// Tests
// =============================================================================
