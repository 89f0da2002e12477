//! Choosing which SVG the markup points at.
//!
//! ```text
//! needs rewrite? ──no──► NoRewriteNeeded (original URL)
//!      │ yes
//!      ▼
//!  CacheCheck ──done this request / fresh──► CacheHit (cache URL)
//!      │ stale or render-later off
//!      ▼
//!   Rewrite ──ok──► Rewritten (cache URL)
//!      │ any failure
//!      ▼
//!  SkipRewrite (original URL)
//! ```

use super::{RenderContext, RenderEnv, RenderRequest, SkipReason, SourceFile};
use crate::cache::{LinkCacheKey, is_fresh};
use crate::debug;
use crate::storage::CachePath;
use crate::svg::{self, RewriteOptions, SvgLink};

/// Terminal state of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanState {
    /// Size matches and nothing is linked: the original is served.
    NoRewriteNeeded,
    /// A rewrite from this request or a fresh cached one is reused.
    CacheHit,
    /// The rewrite was produced and published by this render.
    Rewritten,
    /// A rewrite was needed but failed; the original is served.
    SkipRewrite,
}

/// Outcome of planning.
#[derive(Debug)]
pub struct Plan {
    pub state: PlanState,
    pub svg_url: String,
    pub skipped: Option<SkipReason>,
}

/// Non-terminal states.
enum Step {
    CacheCheck(CachePath),
    Rewrite(CachePath),
}

pub fn plan(
    ctx: &mut RenderContext,
    env: &RenderEnv<'_>,
    source: &SourceFile,
    request: &RenderRequest,
) -> Plan {
    if !request.needs_rewrite() {
        return Plan::original(PlanState::NoRewriteNeeded, source, None);
    }

    let key = LinkCacheKey::new(
        request.link_href.as_deref().unwrap_or_default(),
        request.link_title.as_deref().unwrap_or_default(),
        request.requested_width,
        request.requested_height,
    );
    let mut step = Step::CacheCheck(source.thumbs.linked(&source.name, key));

    loop {
        step = match step {
            Step::CacheCheck(cache) => {
                if ctx.is_processed(&cache.path) {
                    debug!("cache"; "already rewritten: {}", cache.path.display());
                    return Plan::cached(PlanState::CacheHit, cache);
                }
                if env.config.later
                    && is_fresh(env.storage.modification_time(&cache.path), source.modified)
                {
                    debug!("cache"; "fresh: {}", cache.path.display());
                    return Plan::cached(PlanState::CacheHit, cache);
                }
                Step::Rewrite(cache)
            }
            Step::Rewrite(cache) => {
                return match rewrite_into(env, source, request, &cache) {
                    Ok(len) => {
                        debug!("render"; "wrote {} ({len} bytes)", cache.path.display());
                        ctx.mark_processed(cache.path.clone());
                        Plan::cached(PlanState::Rewritten, cache)
                    }
                    Err(reason) => {
                        debug!("render"; "serving original `{}`: {reason}", source.name);
                        Plan::original(PlanState::SkipRewrite, source, Some(reason))
                    }
                };
            }
        };
    }
}

/// Read, rewrite and publish. Returns the written size.
fn rewrite_into(
    env: &RenderEnv<'_>,
    source: &SourceFile,
    request: &RenderRequest,
    cache: &CachePath,
) -> Result<usize, SkipReason> {
    let doc = env.reader.read(&source.svg_path)?;

    let link = request
        .link_href
        .as_ref()
        .filter(|href| !href.is_empty())
        .map(|href| SvgLink {
            href: href.clone(),
            title: request.link_title.clone().unwrap_or_default(),
        });
    let opts = RewriteOptions {
        tolerance: env.config.scale_tolerance,
    };
    let out = svg::rewrite(&doc, request.scale_factors(), link.as_ref(), &opts)?;

    env.storage
        .atomic_write(&out, &cache.path)
        .map_err(|e| SkipReason::Publish(cache.path.clone(), e))?;
    Ok(out.len())
}

impl Plan {
    fn original(state: PlanState, source: &SourceFile, skipped: Option<SkipReason>) -> Self {
        Self {
            state,
            svg_url: source.svg_url.clone(),
            skipped,
        }
    }

    fn cached(state: PlanState, cache: CachePath) -> Self {
        Self {
            state,
            svg_url: cache.url,
            skipped: None,
        }
    }
}
