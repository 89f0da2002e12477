//! SVG document rewriting.
//!
//! Rescales a finished SVG and optionally makes the whole picture a
//! hyperlink, working on the raw bytes instead of a parsed tree.
//!
//! # Modules
//!
//! - [`scale`]: numeric token scaling of `width` / `height` / `viewBox`
//! - [`rewrite`]: opening/closing tag location and wrapper injection
//!
//! # Architecture
//!
//! ```text
//! source bytes
//!      │
//!      ▼
//! ┌────────────┐
//! │ find tags  │ ──► <svg ...> span + last </svg
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │   scale    │ ──► width / height / viewBox × factors
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │    wrap    │ ──► <g transform=scale(..)> and/or <a xlink:href=..>
//! └────────────┘
//! ```

mod rewrite;
mod scale;

pub use rewrite::{OpeningTagSpan, RewriteOptions, find_tags, rewrite};
pub use scale::{format_number, scale_param};

use thiserror::Error;

/// Namespace URI that `xlink:href` / `xlink:title` live in.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Namespace URI of SVG elements.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Requested-to-source ratio along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub width: f64,
    pub height: f64,
}

impl ScaleFactors {
    /// No scaling.
    pub const IDENTITY: Self = Self {
        width: 1.0,
        height: 1.0,
    };

    /// Check if either factor lies outside `[1 - tolerance, 1 + tolerance]`.
    ///
    /// The bounds themselves count as unscaled.
    pub fn exceeds(&self, tolerance: f64) -> bool {
        let lo = 1.0 - tolerance;
        let hi = 1.0 + tolerance;
        self.width < lo || self.width > hi || self.height < lo || self.height > hi
    }
}

/// Hyperlink injected around the drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgLink {
    pub href: String,
    pub title: String,
}

/// Why a document could not be rewritten.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    #[error("malformed SVG: {0}")]
    MalformedDocument(&'static str),
}
