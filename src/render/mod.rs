//! Thumbnail rendering.
//!
//! One call turns a source SVG plus requested size and link options into
//! embeddable markup, rewriting the SVG into the thumb directory when its
//! size or link differs from the original.
//!
//! # Modules
//!
//! | Module    | Purpose                                           |
//! |-----------|---------------------------------------------------|
//! | `link`    | Pick the link target from the link options        |
//! | `request` | Validate sizes, clamp, make hrefs absolute        |
//! | `planner` | Original, cached or freshly rewritten SVG         |
//! | `markup`  | `<object>` / `<a>` / `<img>` assembly             |
//! | `context` | Per-request "already rewritten" guard             |
//!
//! # Failure policy
//!
//! Only an invalid request aborts. Anything going wrong while producing the
//! rewrite (unreadable source, malformed document, failed publish) falls
//! back to the original SVG and is reported in [`RenderOutcome::skipped`].

mod context;
mod error;
mod link;
mod markup;
mod planner;
mod request;

pub use context::RenderContext;
pub use error::{RenderError, SkipReason};
pub use link::{LinkAttribs, LinkOptions, TitleLink};
pub use markup::assemble;
pub use planner::PlanState;
pub use request::{RenderParams, RenderRequest, absolutize, clamp_to_max};

use std::path::PathBuf;
use std::time::SystemTime;

use crate::config::RenderConfig;
use crate::source::SourceReader;
use crate::storage::{StoragePublisher, ThumbPaths};

/// Host-side metadata of the image being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name, also the stem of cached rewrites.
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Where the SVG rendition is read from.
    pub svg_path: PathBuf,
    pub svg_url: String,
    /// Raster fallback for browsers without SVG support.
    pub raster_url: String,
    pub file_url: String,
    pub desc_url: String,
    /// Thumb directory of this file.
    pub thumbs: ThumbPaths,
    /// `None` if unknown.
    pub modified: Option<SystemTime>,
}

/// Collaborators of a render.
#[derive(Clone, Copy)]
pub struct RenderEnv<'a> {
    pub reader: &'a dyn SourceReader,
    pub storage: &'a dyn StoragePublisher,
    pub config: &'a RenderConfig,
}

/// Result of one render.
#[derive(Debug)]
pub struct RenderOutcome {
    pub html: String,
    pub state: PlanState,
    /// SVG the markup references.
    pub svg_url: String,
    /// Why a needed rewrite fell back to the original.
    pub skipped: Option<SkipReason>,
}

/// Render `source` at the requested size.
///
/// Errors only with [`RenderError::InvalidRequest`].
pub fn render(
    ctx: &mut RenderContext,
    env: &RenderEnv<'_>,
    source: &SourceFile,
    params: &RenderParams,
    link: &LinkOptions,
) -> Result<RenderOutcome, RenderError> {
    let attribs = link.select(source);
    let request = RenderRequest::new(source, params, &attribs, env.config)?;

    let plan = planner::plan(ctx, env, source, &request);
    let html = markup::assemble(&request, &attribs, &plan.svg_url, &source.raster_url);

    Ok(RenderOutcome {
        html,
        state: plan.state,
        svg_url: plan.svg_url,
        skipped: plan.skipped,
    })
}
