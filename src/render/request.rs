//! Validated render parameters.

use url::Url;

use super::{LinkAttribs, RenderError, SourceFile};
use crate::config::RenderConfig;
use crate::svg::ScaleFactors;

/// What the caller asks for, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderParams {
    pub width: u32,
    pub height: u32,
    pub alt: String,
    pub css_class: Option<String>,
    pub valign: Option<String>,
}

/// A single render, fully resolved.
///
/// All four dimensions are positive; construction fails otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub requested_width: u32,
    pub requested_height: u32,
    pub source_width: u32,
    pub source_height: u32,
    /// Absolute link target baked into the SVG, if any.
    pub link_href: Option<String>,
    pub link_title: Option<String>,
    pub alt: String,
    pub css_class: Option<String>,
    pub valign: Option<String>,
}

impl RenderRequest {
    pub fn new(
        source: &SourceFile,
        params: &RenderParams,
        link: &LinkAttribs,
        config: &RenderConfig,
    ) -> Result<Self, RenderError> {
        let (requested_width, requested_height) = clamp_to_max(
            (params.width, params.height),
            (source.width, source.height),
            config.max_size,
        );

        let link_href = link
            .has_target()
            .then(|| absolutize(&link.href, config.server_url().as_ref()));

        let request = Self {
            requested_width,
            requested_height,
            source_width: source.width,
            source_height: source.height,
            link_href,
            link_title: link.title.clone(),
            alt: params.alt.clone(),
            css_class: params.css_class.clone().filter(|s| !s.is_empty()),
            valign: params.valign.clone().filter(|s| !s.is_empty()),
        };
        request.validate()?;
        Ok(request)
    }

    /// Reject any zero dimension.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.source_width == 0 || self.source_height == 0 {
            return Err(RenderError::InvalidRequest(format!(
                "source has no size ({}x{})",
                self.source_width, self.source_height
            )));
        }
        if self.requested_width == 0 || self.requested_height == 0 {
            return Err(RenderError::InvalidRequest(format!(
                "requested size {}x{} is empty",
                self.requested_width, self.requested_height
            )));
        }
        Ok(())
    }

    pub fn scale_factors(&self) -> ScaleFactors {
        ScaleFactors {
            width: f64::from(self.requested_width) / f64::from(self.source_width),
            height: f64::from(self.requested_height) / f64::from(self.source_height),
        }
    }

    /// The source SVG can be served as-is only when nothing is linked and
    /// the size matches exactly.
    pub fn needs_rewrite(&self) -> bool {
        self.link_href.is_some()
            || self.requested_width != self.source_width
            || self.requested_height != self.source_height
    }
}

/// Make a site-relative href absolute against `server`.
///
/// Anything not starting with `/`, or any join failure, passes through.
pub fn absolutize(href: &str, server: Option<&Url>) -> String {
    match server {
        Some(base) if href.starts_with('/') => base
            .join(href)
            .map(String::from)
            .unwrap_or_else(|_| href.to_string()),
        _ => href.to_string(),
    }
}

/// Keep the smaller side within `max`, preserving the source aspect ratio.
///
/// `max == 0` disables the clamp.
pub fn clamp_to_max(requested: (u32, u32), source: (u32, u32), max: u32) -> (u32, u32) {
    let (w, h) = requested;
    let (sw, sh) = source;
    if max == 0 {
        return (w, h);
    }
    if w <= h {
        if w > max {
            return (max, scale_side(sw, sh, max));
        }
    } else if h > max {
        return (scale_side(sh, sw, max), max);
    }
    (w, h)
}

/// `round(other * target / side)`, at least 1.
fn scale_side(side: u32, other: u32, target: u32) -> u32 {
    if side == 0 {
        return target;
    }
    let v = (f64::from(other) * f64::from(target) / f64::from(side)).round();
    (v as u32).max(1)
}
