//! Defensive conversions for leaf text.
//!
//! Every conversion returns `None` instead of failing. [`store`] applies a
//! conversion result to a record field and leaves the field untouched on
//! `None`, reporting the rejected text through `tracing` only.

use tracing::debug;

/// Parse a decimal integer: optional sign, digits, nothing else.
///
/// Surrounding whitespace is rejected, as is anything outside `i32`.
#[inline]
pub fn parse_int(text: &str) -> Option<i32> {
    text.parse().ok()
}

/// Parse fractional seconds and truncate toward zero.
///
/// Leading and trailing whitespace/control characters are ignored.
/// Values beyond `i64` saturate; NaN becomes 0.
pub fn parse_seconds(text: &str) -> Option<i64> {
    let value: f64 = text.trim_matches(|c: char| c <= ' ').parse().ok()?;
    Some(value as i64)
}

/// Parse an integer flag (`0` is false, any other integer true) or a
/// literal `true`/`false` in any case.
pub fn parse_flag(text: &str) -> Option<bool> {
    if let Some(n) = parse_int(text) {
        return Some(n != 0);
    }
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Flag whose presence alone means "set" (`<have_credentials/>`).
///
/// An explicit false value clears it; any other content sets it.
pub fn presence_flag(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || parse_flag(text).unwrap_or(true)
}

/// Store a converted value, keeping the previous one on failure.
#[inline]
pub fn store<T>(slot: &mut T, parsed: Option<T>, field: &str, text: &str) {
    match parsed {
        Some(value) => *slot = value,
        None => debug!(field, text, "ignoring unparseable numeric value"),
    }
}
