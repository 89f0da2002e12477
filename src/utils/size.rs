//! Human-readable byte sizes (`"512B"`, `"64KB"`, `"32MB"`).

/// Parse a size string to bytes. Suffixes are case-insensitive; a bare
/// number is bytes. Returns `None` for anything unparsable.
pub fn parse_size(s: &str) -> Option<usize> {
    let s = s.trim().to_uppercase();
    let (digits, unit) = if let Some(n) = s.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('B') {
        (n, 1)
    } else {
        (s.as_str(), 1)
    };
    digits.trim().parse::<usize>().ok()?.checked_mul(unit)
}
