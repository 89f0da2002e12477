//! Embeddable thumbnail markup.
//!
//! ```text
//! <object type="image/svg+xml" data=SVG ...>   ← browsers with SVG
//!   <a href=LINK>                              ← link fallback
//!     <img src=RASTER ... />                   ← raster fallback
//!   </a>
//! </object>
//! ```

use super::{LinkAttribs, RenderRequest};
use crate::utils::html::{Attrs, element, tags};

/// Assemble the final markup for one render.
pub fn assemble(request: &RenderRequest, link: &LinkAttribs, svg_url: &str, raster_url: &str) -> String {
    let img = element("img", &image_attrs(request, raster_url));
    let linked = tags("a", &link.to_attrs(), &img);

    let object = Attrs::new()
        .with("type", "image/svg+xml")
        .with("data", svg_url)
        .with("style", "overflow: hidden; vertical-align: middle")
        .with("width", request.requested_width)
        .with("height", request.requested_height);
    tags("object", &object, &linked)
}

fn image_attrs(request: &RenderRequest, raster_url: &str) -> Attrs {
    let mut attrs = Attrs::new()
        .with("alt", &request.alt)
        .with("src", raster_url)
        .with("width", request.requested_width)
        .with("height", request.requested_height);
    if let Some(valign) = &request.valign {
        attrs.set("style", format!("vertical-align: {valign}"));
    }
    if let Some(class) = &request.css_class {
        attrs.set("class", class);
    }
    attrs
}
