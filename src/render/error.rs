//! Render error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::source::SourceError;
use crate::svg::RewriteError;

/// Errors that abort a render.
///
/// Only caller contract violations end up here; document problems degrade
/// to serving the original SVG (see [`SkipReason`]).
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid render request: {0}")]
    InvalidRequest(String),
}

/// Why a needed rewrite was skipped and the original SVG served instead.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error("failed to publish `{0}`")]
    Publish(PathBuf, #[source] io::Error),
}
