//! Cache keys for link-wrapped SVGs.
//!
//! A rewritten SVG depends only on what gets baked into it: the link target,
//! its title and the output size. Those four fields are checksummed so the
//! same request always lands on the same file name, across restarts too.

use std::fmt;

/// Marker separating linked rewrites from plain scaled thumbnails.
const LINKED_MARKER: &str = "linked";

/// CRC32 fingerprint of `(href, title, width, height)`.
///
/// Not a security boundary, only a cache-busting name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkCacheKey(u32);

impl LinkCacheKey {
    /// Fields are joined with `\0` so `("ab", "c")` and `("a", "bc")` differ.
    pub fn new(href: &str, title: &str, width: u32, height: u32) -> Self {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(href.as_bytes());
        hasher.update(b"\0");
        hasher.update(title.as_bytes());
        hasher.update(b"\0");
        hasher.update(width.to_string().as_bytes());
        hasher.update(b"\0");
        hasher.update(height.to_string().as_bytes());
        Self(hasher.finalize())
    }

    #[inline]
    pub const fn checksum(&self) -> u32 {
        self.0
    }

    /// `{stem}-linked-{crc}.svg`
    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}-{self}.svg")
    }
}

impl fmt::Display for LinkCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LINKED_MARKER}-{}", self.0)
    }
}
