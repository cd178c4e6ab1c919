//! Free-text numeric input normalization.

/// Normalize arbitrary text into a non-negative decimal string.
///
/// Keeps only ASCII digits and `.`. Every `.` after the first is dropped so the
/// remaining digit groups collapse into the fractional part, and a leading `.`
/// gets a `0` prepended. Signs are stripped, so negative numbers cannot be
/// entered through this path.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 1);
    let mut seen_point = false;
    for c in input.chars() {
        if c.is_ascii_digit() {
            out.push(c);
        } else if c == '.' && !seen_point {
            seen_point = true;
            out.push(c);
        }
    }
    if out.starts_with('.') {
        out.insert(0, '0');
    }
    out
}

/// Sanitize `input` and parse it, returning `None` when nothing numeric remains.
pub fn parse_number(input: &str) -> Option<f64> {
    let cleaned = sanitize(input);
    if cleaned.is_empty() {
        return None;
    }
    // "0." is a valid prefix while typing; f64::from_str accepts it.
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
