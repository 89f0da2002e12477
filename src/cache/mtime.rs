//! Mtime-based freshness detection for rewritten SVGs.
//!
//! Both the cached rewrite and its source are files we can stat, so
//! timestamps are enough: a rewrite is stale once the source is newer.

use std::path::Path;
use std::time::SystemTime;

/// Check if a cached output stamped `cached` is still valid for a source
/// last modified at `source`.
///
/// Returns `false` when the cache has no timestamp. An unknown source
/// timestamp trusts any existing cache entry.
pub fn is_fresh(cached: Option<SystemTime>, source: Option<SystemTime>) -> bool {
    match (cached, source) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(cached), Some(source)) => cached >= source,
    }
}

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}
