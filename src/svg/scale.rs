//! Numeric scaling of sizing attribute values.
//!
//! Only the numbers change; units, separators and signs around them are
//! copied verbatim:
//!
//! ```text
//! width="10.5px"          ×2        → width="21px"
//! viewBox="0 0 100 50"    ×(2, 3)   → viewBox="0 0 200 150"
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::ScaleFactors;

/// Unsigned decimal with optional fraction. Signs stay in the surrounding text.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)[0-9]+(?:\.[0-9]+)?").unwrap());

/// Fractional digits kept after scaling.
const PRECISION: usize = 9;

/// Which scale factor a token is multiplied by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    fn flip(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// Scale every numeric token of an attribute value, returning `name="value"`.
///
/// `viewBox` tokens alternate X/Y starting with X (`minX minY width height`).
/// A `height` attribute uses the height factor for every token; anything else
/// uses the width factor.
pub fn scale_param(name: &str, value: &str, factors: ScaleFactors) -> String {
    let alternate = name == "viewBox";
    let mut axis = if name == "height" { Axis::Y } else { Axis::X };

    let mut out = String::with_capacity(name.len() + value.len() + 3);
    out.push_str(name);
    out.push_str("=\"");

    let mut last = 0;
    for m in NUMBER.find_iter(value) {
        out.push_str(&value[last..m.start()]);

        // The regex only matches well-formed decimals
        let n: f64 = m.as_str().parse().unwrap_or(0.0);
        let factor = match axis {
            Axis::X => factors.width,
            Axis::Y => factors.height,
        };
        out.push_str(&format_number(n * factor));

        last = m.end();
        if alternate {
            axis = axis.flip();
        }
    }
    out.push_str(&value[last..]);
    out.push('"');
    out
}

/// Format as a plain decimal: no exponent, no trailing zeros.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "0".to_string();
    }
    let s = format!("{n:.prec$}", prec = PRECISION);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-0" => "0".to_string(),
        _ => s.to_string(),
    }
}
