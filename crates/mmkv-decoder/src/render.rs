//! Text renderings shared by the classifier rules.

use std::fmt::Write as _;

/// Default number of bytes shown by [`hex_preview`] before truncating.
pub const DEFAULT_HEX_PREVIEW_LIMIT: usize = 100;

/// Rendering used for zero-length values.
pub const EMPTY_RENDERING: &str = "(empty)";

/// Marker appended to a truncated hex preview.
pub const TRUNCATION_MARKER: &str = "...";

/// Render bytes as space-separated uppercase hex pairs.
///
/// Only the first `limit` bytes are shown; if there are more, the
/// preview ends with [`TRUNCATION_MARKER`].
///
/// ```text
/// [0xDE, 0xAD, 0xBE, 0xEF]  →  "DE AD BE EF"
/// ```
pub fn hex_preview(bytes: &[u8], limit: usize) -> String {
    let shown = &bytes[..bytes.len().min(limit)];
    let mut out = shown
        .iter()
        .fold(String::with_capacity(shown.len() * 3), |mut s, b| {
            if !s.is_empty() {
                s.push(' ');
            }
            let _ = write!(s, "{b:02X}");
            s
        });

    if bytes.len() > limit {
        out.push_str(TRUNCATION_MARKER);
    }
    out
}

pub fn bool_text(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Render an `f32` in general format (scientific from 1E+07 upward).
pub fn general_f32(value: f32) -> String {
    if value.is_nan() || value.is_infinite() {
        return non_finite(value.is_nan(), value.is_sign_negative());
    }
    general(format!("{value}"), &format!("{value:e}"), 7)
}

/// Render an `f64` in general format (scientific from 1E+15 upward).
pub fn general_f64(value: f64) -> String {
    if value.is_nan() || value.is_infinite() {
        return non_finite(value.is_nan(), value.is_sign_negative());
    }
    general(format!("{value}"), &format!("{value:e}"), 15)
}

fn non_finite(nan: bool, negative: bool) -> String {
    match (nan, negative) {
        (true, _) => "NaN",
        (false, true) => "-Infinity",
        (false, false) => "Infinity",
    }
    .to_string()
}

/// Pick fixed or scientific notation from the shortest round-trip digits.
///
/// `display` is the fixed rendering and `lower_exp` the `{:e}` rendering
/// of the same value, e.g. `"-1.5e20"`. Scientific output uses an upper
/// case `E`, an explicit sign and at least two exponent digits.
fn general(display: String, lower_exp: &str, precision: i32) -> String {
    let Some((mantissa, exponent)) = lower_exp.split_once('e') else {
        return display;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return display;
    };

    if exponent >= precision || exponent < -4 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}E{sign}{:02}", exponent.unsigned_abs())
    } else {
        display
    }
}
