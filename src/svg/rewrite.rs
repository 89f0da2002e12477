//! Opening/closing tag surgery on a raw SVG buffer.
//!
//! The document is never parsed into a tree. We find the root `<svg ...>`
//! start tag and the last `</svg` marker, rewrite the start tag in place and
//! splice wrapper elements around whatever sits between the two.
//!
//! Inputs are machine-generated SVGs, so the start tag is assumed to be
//! well-formed: attributes in any order, single or double quotes.

use std::sync::LazyLock;

use quick_xml::escape::escape;
use regex::bytes::{Captures, Regex};

use super::{RewriteError, SVG_NS, ScaleFactors, SvgLink, XLINK_NS, scale_param};
use crate::debug;

/// Root start tag: `<svg` or `<svg:svg`, then whitespace, `/` or `>`.
static OPEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)<svg(?::svg)?(?:[\s/][^<>]*)?>").unwrap());

/// Sizing attributes. The leading whitespace keeps `stroke-width` and
/// friends out.
static SIZE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?-u)(\s)(viewBox|width|height)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// `xmlns:<prefix>` bound to the SVG namespace.
static SVG_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r#"(?-u)xmlns:([A-Za-z_][A-Za-z0-9_.-]*)\s*=\s*["']?{}"#,
        regex::escape(SVG_NS)
    );
    Regex::new(&pattern).unwrap()
});

const CLOSE_MARKER: &[u8] = b"</svg";

/// Rewrite tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewriteOptions {
    /// Factors within `1 ± tolerance` get no scale wrapper.
    pub tolerance: f64,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self { tolerance: 0.01 }
    }
}

/// Located root start tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningTagSpan<'a> {
    pub text: &'a [u8],
    pub start: usize,
    pub len: usize,
}

impl OpeningTagSpan<'_> {
    /// Byte offset just past the closing `>`.
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Locate the root start tag and the offset of the last `</svg`.
pub fn find_tags(doc: &[u8]) -> Result<(OpeningTagSpan<'_>, usize), RewriteError> {
    let m = OPEN_TAG
        .find(doc)
        .ok_or(RewriteError::MalformedDocument("opening <svg> tag not found"))?;
    let close = rfind(doc, CLOSE_MARKER)
        .ok_or(RewriteError::MalformedDocument("closing </svg> tag not found"))?;

    let span = OpeningTagSpan {
        text: m.as_bytes(),
        start: m.start(),
        len: m.len(),
    };
    if span.end() > close {
        return Err(RewriteError::MalformedDocument(
            "closing tag precedes opening tag",
        ));
    }
    if span.text.ends_with(b"/>") {
        return Err(RewriteError::MalformedDocument("root <svg> is self-closing"));
    }
    Ok((span, close))
}

/// Produce a rescaled (and optionally hyperlinked) copy of `doc`.
///
/// Applying this twice scales twice; callers must only feed it originals.
pub fn rewrite(
    doc: &[u8],
    factors: ScaleFactors,
    link: Option<&SvgLink>,
    opts: &RewriteOptions,
) -> Result<Vec<u8>, RewriteError> {
    let (span, close) = find_tags(doc)?;
    debug!("rewrite"; "root tag at {}..{}, closing marker at {}", span.start, span.end(), close);

    let mut open = scale_open_tag(span.text, factors);
    if !contains(&open, b"xmlns:xlink") {
        let gt = open.split_off(open.len() - 1);
        open.extend_from_slice(format!(" xmlns:xlink=\"{XLINK_NS}\"").as_bytes());
        open.extend_from_slice(&gt);
    }

    let ns = svg_prefix(&open);
    let mut wrap_open = String::new();
    let mut wrap_close = String::new();

    if factors.exceeds(opts.tolerance) {
        wrap_open.push_str(&format!(
            "<{ns}g transform=\"scale({} {})\">",
            super::format_number(factors.width),
            super::format_number(factors.height),
        ));
        wrap_close.insert_str(0, &format!("</{ns}g>"));
    }
    if let Some(link) = link {
        wrap_open.push_str(&format!(
            "<{ns}a xlink:href=\"{}\" target=\"_parent\" xlink:title=\"{}\">",
            escape(link.href.as_str()),
            escape(link.title.as_str()),
        ));
        wrap_close.insert_str(0, &format!("</{ns}a>"));
    }

    let inner = trim_line_end(&doc[span.end()..close]);

    let mut out = Vec::with_capacity(doc.len() + open.len() + wrap_open.len() + wrap_close.len());
    out.extend_from_slice(&doc[..span.start]);
    out.extend_from_slice(&open);
    out.extend_from_slice(wrap_open.as_bytes());
    out.extend_from_slice(inner);
    out.extend_from_slice(wrap_close.as_bytes());
    out.extend_from_slice(&doc[close..]);
    Ok(out)
}

/// Rewrite `width` / `height` / `viewBox` inside the start tag only.
fn scale_open_tag(tag: &[u8], factors: ScaleFactors) -> Vec<u8> {
    SIZE_ATTR
        .replace_all(tag, |caps: &Captures<'_>| {
            let value = caps.get(3).or_else(|| caps.get(4)).map_or(&b""[..], |m| m.as_bytes());
            let (Ok(name), Ok(value)) = (
                std::str::from_utf8(&caps[2]),
                std::str::from_utf8(value),
            ) else {
                return caps[0].to_vec();
            };

            let mut out = caps[1].to_vec();
            out.extend_from_slice(scale_param(name, value, factors).as_bytes());
            out
        })
        .into_owned()
}

/// Namespace prefix (with trailing `:`) the start tag binds to SVG, if any.
fn svg_prefix(tag: &[u8]) -> String {
    SVG_PREFIX
        .captures(tag)
        .and_then(|c| std::str::from_utf8(&c[1]).ok().map(|p| format!("{p}:")))
        .unwrap_or_default()
}

/// Strip trailing `\t`, `\r` and `\n` only; spaces are kept.
fn trim_line_end(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !matches!(b, b'\t' | b'\r' | b'\n'))
        .map_or(0, |i| i + 1);
    &bytes[..end]
}

#[inline]
fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[inline]
fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" viewBox="0 0 100 100"><rect/></svg>"#;

    fn rewrite_str(doc: &str, w: f64, h: f64, link: Option<&SvgLink>) -> String {
        let out = rewrite(
            doc.as_bytes(),
            ScaleFactors { width: w, height: h },
            link,
            &RewriteOptions::default(),
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn count(hay: &str, needle: &str) -> usize {
        hay.matches(needle).count()
    }

    #[test]
    fn test_scaled_and_linked_square() {
        let link = SvgLink {
            href: "https://example.org".into(),
            title: "Example".into(),
        };
        let out = rewrite_str(SQUARE, 0.5, 0.5, Some(&link));

        assert!(out.contains(r#"width="50""#));
        assert!(out.contains(r#"height="50""#));
        assert!(out.contains(r#"viewBox="0 0 50 50""#));
        assert!(out.contains(r#"<g transform="scale(0.5 0.5)">"#));
        assert!(out.contains(
            r#"<a xlink:href="https://example.org" target="_parent" xlink:title="Example"><rect/></a>"#
        ));
        assert!(out.ends_with("<rect/></a></g></svg>"));
    }

    #[test]
    fn test_exact_output_shape() {
        let out = rewrite_str(
            r#"<?xml version="1.0"?>
<svg width="10" height="20"><path d="M0 0"/></svg>
"#,
            2.0,
            2.0,
            None,
        );
        assert_eq!(
            out,
            r#"<?xml version="1.0"?>
<svg width="20" height="40" xmlns:xlink="http://www.w3.org/1999/xlink"><g transform="scale(2 2)"><path d="M0 0"/></g></svg>
"#
        );
    }

    #[test]
    fn test_xlink_declared_once() {
        let out = rewrite_str(SQUARE, 2.0, 2.0, None);
        assert_eq!(count(&out, r#"xmlns:xlink="http://www.w3.org/1999/xlink""#), 1);

        let already = r#"<svg xmlns:xlink="http://www.w3.org/1999/xlink" width="1"><a/></svg>"#;
        let out = rewrite_str(already, 2.0, 2.0, None);
        assert_eq!(count(&out, "xmlns:xlink"), 1);
    }

    #[test]
    fn test_no_scale_wrapper_within_tolerance() {
        let link = SvgLink {
            href: "/x".into(),
            title: String::new(),
        };
        let out = rewrite_str(SQUARE, 1.005, 0.995, Some(&link));
        assert!(!out.contains("transform="));
        assert!(out.contains(r#"<a xlink:href="/x" target="_parent" xlink:title="">"#));
    }

    #[test]
    fn test_prefixed_svg_namespace() {
        let doc = r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg" width="10" height="10"><svg:rect/></svg:svg>"#;
        let link = SvgLink {
            href: "http://a".into(),
            title: "t".into(),
        };
        let out = rewrite_str(doc, 2.0, 2.0, Some(&link));
        assert!(out.contains(r#"<svg:g transform="scale(2 2)"><svg:a xlink:href="http://a""#));
        assert!(out.ends_with("<svg:rect/></svg:a></svg:g></svg:svg>"));
    }

    #[test]
    fn test_single_quotes_and_attribute_order() {
        let doc = "<svg viewBox='0 0 40 20' height='20' stroke-width='4' width='40'><g/></svg>";
        let out = rewrite_str(doc, 0.5, 2.0, None);
        assert!(out.contains(r#"viewBox="0 0 20 40""#));
        assert!(out.contains(r#"height="40""#));
        assert!(out.contains(r#"width="20""#));
        assert!(out.contains("stroke-width='4'"));
    }

    #[test]
    fn test_only_opening_tag_attributes_scaled() {
        let doc = r#"<svg width="10"><rect width="10" height="10"/></svg>"#;
        let out = rewrite_str(doc, 3.0, 3.0, None);
        assert!(out.starts_with(r#"<svg width="30""#));
        assert!(out.contains(r#"<rect width="10" height="10"/>"#));
    }

    #[test]
    fn test_link_attributes_escaped() {
        let link = SvgLink {
            href: "http://x/?a=1&b=<2>".into(),
            title: r#"say "hi" 'there'"#.into(),
        };
        let out = rewrite_str(SQUARE, 1.0, 1.0, Some(&link));
        assert!(out.contains(r#"xlink:href="http://x/?a=1&amp;b=&lt;2&gt;""#));
        assert!(out.contains(r#"xlink:title="say &quot;hi&quot; &apos;there&apos;""#));
    }

    #[test]
    fn test_uppercase_tag_and_trailing_newlines() {
        let doc = "<SVG width=\"4\">\n<rect/>\r\n</SVG>";
        // Closing marker is matched literally, so uppercase close is malformed
        assert!(rewrite(doc.as_bytes(), ScaleFactors::IDENTITY, None, &RewriteOptions::default()).is_err());

        let doc = "<SVG width=\"4\">\n<rect/>\r\n</svg>";
        let out = rewrite_str(doc, 2.0, 2.0, None);
        assert!(out.ends_with("\n<rect/></g></svg>"));
    }

    #[test]
    fn test_trailing_spaces_kept() {
        let doc = "<svg width=\"4\"><rect/>  \t\n</svg>";
        let out = rewrite_str(doc, 2.0, 2.0, None);
        assert!(out.ends_with("<rect/>  </g></svg>"));
    }

    #[test]
    fn test_malformed_documents() {
        let opts = RewriteOptions::default();
        let f = ScaleFactors { width: 2.0, height: 2.0 };

        let no_close = b"<svg width=\"1\"><rect/>";
        assert!(matches!(
            rewrite(no_close, f, None, &opts),
            Err(RewriteError::MalformedDocument(_))
        ));

        let no_open = b"<html></svg>";
        assert!(rewrite(no_open, f, None, &opts).is_err());

        let backwards = b"</svg><svg width=\"1\">";
        assert!(rewrite(backwards, f, None, &opts).is_err());

        let self_closing = b"<svg width=\"1\"/></svg>";
        assert!(rewrite(self_closing, f, None, &opts).is_err());
    }

    #[test]
    fn test_svgfoo_is_not_a_root_tag() {
        let doc = b"<svgfoo/><svg width=\"2\"></svg>";
        let (span, _) = find_tags(doc).unwrap();
        assert_eq!(span.text, b"<svg width=\"2\">");
        assert_eq!(span.start, 9);
    }

    #[test]
    fn test_double_rewrite_double_scales() {
        let once = rewrite(SQUARE.as_bytes(), ScaleFactors { width: 2.0, height: 2.0 }, None, &RewriteOptions::default()).unwrap();
        let twice = rewrite(&once, ScaleFactors { width: 2.0, height: 2.0 }, None, &RewriteOptions::default()).unwrap();
        let twice = String::from_utf8(twice).unwrap();
        assert!(twice.contains(r#"width="400""#));
        assert_eq!(count(&twice, "transform="), 2);
    }

    #[test]
    fn test_non_utf8_content_passes_through() {
        let mut doc = b"<svg width=\"1\"><text>".to_vec();
        doc.extend_from_slice(&[0xff, 0xfe]);
        doc.extend_from_slice(b"</text></svg>");
        let out = rewrite(&doc, ScaleFactors { width: 2.0, height: 2.0 }, None, &RewriteOptions::default()).unwrap();
        assert!(out.windows(2).any(|w| w == [0xff, 0xfe]));
    }
}
