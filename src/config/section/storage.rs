//! `[storage]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [storage]
//! thumb_dir = "thumbs"          # rewritten SVGs land here
//! thumb_url = "/thumbs"         # public URL of thumb_dir
//! max_decompressed = "32MB"     # SVGZ inflate limit
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;
use crate::utils::size::parse_size;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory rewritten SVGs are written to (relative to the config file).
    pub thumb_dir: PathBuf,

    /// URL prefix `thumb_dir` is served under.
    pub thumb_url: String,

    /// Largest accepted inflated size for SVGZ sources.
    /// Supports suffixes: B, KB, MB (e.g., "512KB", "32MB").
    pub max_decompressed: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            thumb_dir: PathBuf::from("thumbs"),
            thumb_url: "/thumbs".to_string(),
            max_decompressed: "32MB".to_string(),
        }
    }
}

impl StorageConfig {
    /// Inflate limit in bytes. Falls back to the default when unparsable.
    pub fn max_decompressed_bytes(&self) -> usize {
        parse_size(&self.max_decompressed).unwrap_or(32 * 1024 * 1024)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match parse_size(&self.max_decompressed) {
            None => diag.error(
                "storage.max_decompressed",
                format!("`{}` is not a size (e.g. \"32MB\")", self.max_decompressed),
            ),
            Some(0) => diag.error("storage.max_decompressed", "must be greater than 0"),
            Some(_) => {}
        }
    }
}
