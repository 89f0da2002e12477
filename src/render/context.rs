//! Per-request render state.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

/// State shared by all renders of one logical request.
///
/// Remembers which cache paths were already rewritten so a page embedding
/// the same thumbnail twice rewrites it once. Create one per request and
/// drop it afterwards; nothing carries over between requests.
#[derive(Debug, Default)]
pub struct RenderContext {
    processed: FxHashSet<PathBuf>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if `path` was already written during this request.
    #[inline]
    pub fn is_processed(&self, path: &Path) -> bool {
        self.processed.contains(path)
    }

    /// Record a written path. Returns `false` if it was already recorded.
    #[inline]
    pub fn mark_processed(&mut self, path: PathBuf) -> bool {
        self.processed.insert(path)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.processed.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }
}
