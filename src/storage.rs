//! Persisting rewritten SVGs and mapping them to URLs.
//!
//! Writes are whole-file replacements: content goes to a temp file in the
//! destination directory and is renamed into place, so concurrent readers
//! see either the old or the new document, never a partial one.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tempfile::NamedTempFile;

use crate::cache::{LinkCacheKey, get_mtime};

/// Characters escaped inside a URL path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/');

/// Where rewritten documents are published.
pub trait StoragePublisher {
    /// Replace `dest` with `bytes`, visible only once complete.
    fn atomic_write(&self, bytes: &[u8], dest: &Path) -> io::Result<()>;

    /// Modification time of a stored document, `None` if absent.
    fn modification_time(&self, path: &Path) -> Option<SystemTime>;

    /// Public URL of a stored document.
    fn resolve_url(&self, path: &Path) -> String;
}

/// Filesystem storage rooted at `root`, served under `base_url`.
#[derive(Debug, Clone)]
pub struct FsStorage {
    pub root: PathBuf,
    pub base_url: String,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }
}

impl StoragePublisher for FsStorage {
    fn atomic_write(&self, bytes: &[u8], dest: &Path) -> io::Result<()> {
        let dir = dest.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(dest).map_err(|e| e.error)?;
        Ok(())
    }

    fn modification_time(&self, path: &Path) -> Option<SystemTime> {
        get_mtime(path)
    }

    fn resolve_url(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        let mut url = self.base_url.trim_end_matches('/').to_string();
        for part in rel.components() {
            url.push('/');
            let segment = part.as_os_str().to_string_lossy();
            url.extend(utf8_percent_encode(&segment, SEGMENT));
        }
        url
    }
}

/// A cache location as both filesystem path and URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePath {
    pub path: PathBuf,
    pub url: String,
}

/// Thumbnail directory of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbPaths {
    pub base_path: PathBuf,
    pub base_url: String,
}

impl ThumbPaths {
    pub fn new(base_path: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            base_url: base_url.into(),
        }
    }

    /// `{base}/{stem}-linked-{crc}.svg`
    pub fn linked(&self, stem: &str, key: LinkCacheKey) -> CachePath {
        let name = key.file_name(stem);
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            utf8_percent_encode(&name, SEGMENT)
        );
        CachePath {
            path: self.base_path.join(&name),
            url,
        }
    }
}
