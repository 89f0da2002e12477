//! `[render]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [render]
//! server = "https://wiki.example.org"  # base for root-relative link targets
//! later = true                          # trust cached rewrites when fresh
//! scale_tolerance = 0.01                # no scale wrapper within 1 ± tolerance
//! max_size = 4096                       # clamp the smaller requested side (0 = off)
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ConfigDiagnostics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Origin prepended to link targets starting with `/`.
    ///
    /// Links inside an SVG opened through `<object>` resolve against the
    /// SVG's own URL, so site-relative targets must be made absolute.
    pub server: Option<String>,

    /// Render-later mode: reuse a cached rewrite while it is newer than
    /// the source. When off, every needed rewrite is regenerated.
    pub later: bool,

    /// Scale factors within `1 ± scale_tolerance` skip the transform wrapper.
    pub scale_tolerance: f64,

    /// Upper bound for the smaller requested side. 0 disables the clamp.
    pub max_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            server: None,
            later: false,
            scale_tolerance: 0.01,
            max_size: 0,
        }
    }
}

impl RenderConfig {
    /// Parsed `server`, if set and valid.
    pub fn server_url(&self) -> Option<Url> {
        self.server.as_deref().and_then(|s| Url::parse(s).ok())
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !(0.0..1.0).contains(&self.scale_tolerance) {
            diag.error(
                "render.scale_tolerance",
                format!("must be in [0, 1), got {}", self.scale_tolerance),
            );
        }
        if let Some(server) = &self.server
            && let Err(e) = Url::parse(server)
        {
            diag.error("render.server", format!("`{server}` is not a valid URL: {e}"));
        }
    }
}
