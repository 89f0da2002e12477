//! Configuration management for `svgthumb.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── render     # [render]
//! │   └── storage    # [storage]
//! ├── error          # ConfigError, ConfigDiagnostics
//! └── mod.rs         # ThumbConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                               |
//! |-------------|-------------------------------------------------------|
//! | `[render]`  | Link base, render-later, scale tolerance, size clamp  |
//! | `[storage]` | Thumb directory/URL, SVGZ inflate limit               |

mod error;
pub mod section;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use section::{RenderConfig, StorageConfig};

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::debug;

/// Default config file name.
pub const CONFIG_FILE: &str = "svgthumb.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing svgthumb.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThumbConfig {
    /// Directory of the config file; relative paths resolve against it
    /// (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Rendering behavior
    #[serde(default)]
    pub render: RenderConfig,

    /// Where rewritten SVGs are stored and served
    #[serde(default)]
    pub storage: StorageConfig,
}

impl ThumbConfig {
    /// Load and validate configuration.
    ///
    /// A missing file yields the defaults rooted at the current directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_path(path)?
        } else {
            debug!("config"; "{} not found, using defaults", path.display());
            Self::default()
        };

        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        config.finalize(&root);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Resolve relative paths against the config directory.
    fn finalize(&mut self, root: &Path) {
        self.root = root.to_path_buf();
        if self.storage.thumb_dir.is_relative() {
            self.storage.thumb_dir = root.join(&self.storage.thumb_dir);
        }
    }

    /// Validate all sections, reporting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.render.validate(&mut diag);
        self.storage.validate(&mut diag);
        diag.into_result()
    }
}

/// Parse a config snippet in tests.
#[cfg(test)]
pub(crate) fn test_parse_config(content: &str) -> ThumbConfig {
    ThumbConfig::from_str(content).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ThumbConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.root, dir.path());
        assert_eq!(config.storage.thumb_dir, dir.path().join("thumbs"));
    }

    #[test]
    fn test_load_resolves_thumb_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[storage]\nthumb_dir = \"out/t\"\n[render]\nlater = true").unwrap();

        let config = ThumbConfig::load(&path).unwrap();
        assert!(config.render.later);
        assert_eq!(config.storage.thumb_dir, dir.path().join("out/t"));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[render]\nscale_tolerance = 2.0").unwrap();
        assert!(matches!(
            ThumbConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        fs::write(&path, "[render\n").unwrap();
        assert!(matches!(ThumbConfig::load(&path), Err(ConfigError::Toml(_))));
    }
}
