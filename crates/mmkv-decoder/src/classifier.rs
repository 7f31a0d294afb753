use mmkv_types::{TypeHint, TypeLabel};
use mmkv_wire::WireError;
use mmkv_wire::varint::{decode_varint32, decode_varint64};

use crate::render::{
    DEFAULT_HEX_PREVIEW_LIMIT, EMPTY_RENDERING, bool_text, general_f32, general_f64, hex_preview,
};

/// Upper bound (exclusive) on `|i32|` for the auto `Int32` rule.
const INT32_PLAUSIBLE_LIMIT: u32 = 1_000_000_000;

/// Upper bound (exclusive) on `|i64|` for the auto `Int64` rule.
const INT64_PLAUSIBLE_LIMIT: u64 = 1_000_000_000_000_000;

/// A rendered value and the branch that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classified {
    pub rendered: String,
    pub label: TypeLabel,
}

impl Classified {
    fn new(rendered: impl Into<String>, label: TypeLabel) -> Self {
        Self {
            rendered: rendered.into(),
            label,
        }
    }
}

/// One heuristic in the auto-detection chain.
struct Rule {
    name: &'static str,
    apply: fn(&[u8]) -> Option<Classified>,
}

/// Auto-detection rules in priority order. The first rule that returns
/// `Some` wins; if none do, the value is rendered as hex.
///
/// ```text
/// ┌───┬─────────────────┬───────────────────────────────────────────────┐
/// │ # │ Rule            │ Matches when                                  │
/// ├───┼─────────────────┼───────────────────────────────────────────────┤
/// │ 1 │ bool            │ exactly one byte, 0x00 or 0x01                │
/// │ 2 │ prefixed_string │ varint len > 0, prefix + len == value length, │
/// │   │                 │ payload is valid UTF-8                        │
/// │ 3 │ plain_string    │ whole value is valid UTF-8 with no control    │
/// │   │                 │ characters besides \t \n \r                   │
/// │ 4 │ int32           │ 4 bytes, |LE i32| < 10^9                      │
/// │ 5 │ int64           │ 8 bytes, |LE i64| < 10^15                     │
/// │ 6 │ varint          │ whole value is exactly one varint             │
/// └───┴─────────────────┴───────────────────────────────────────────────┘
/// ```
const AUTO_RULES: &[Rule] = &[
    Rule {
        name: "bool",
        apply: bool_byte,
    },
    Rule {
        name: "prefixed_string",
        apply: prefixed_string,
    },
    Rule {
        name: "plain_string",
        apply: plain_string,
    },
    Rule {
        name: "int32",
        apply: plausible_int32,
    },
    Rule {
        name: "int64",
        apply: plausible_int64,
    },
    Rule {
        name: "varint",
        apply: whole_varint,
    },
];

/// Name reported by [`Classifier::matching_rule`] when only the hex
/// fallback applies.
pub const HEX_FALLBACK_RULE: &str = "hex";

/// Infers a display type for a raw value slice.
///
/// The classifier holds no per-value state; one instance can classify
/// any number of values, from any thread.
#[derive(Clone, Copy, Debug)]
pub struct Classifier {
    hex_preview_limit: usize,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_HEX_PREVIEW_LIMIT)
    }
}

impl Classifier {
    pub fn new(hex_preview_limit: usize) -> Self {
        Self { hex_preview_limit }
    }

    /// Render `value` and label it.
    ///
    /// Empty values are always `("(empty)", Empty)`. With
    /// [`TypeHint::Auto`] the rules in [`AUTO_RULES`] run in order; any
    /// other hint renders with that hint's fixed rule and falls back to
    /// hex if the bytes cannot be read that way.
    pub fn classify(&self, value: &[u8], hint: TypeHint) -> Classified {
        if value.is_empty() {
            return Classified::new(EMPTY_RENDERING, TypeLabel::Empty);
        }

        match hint {
            TypeHint::Auto => self.auto_detect(value),
            forced => self
                .render_forced(value, forced)
                .unwrap_or_else(|_| self.hex(value)),
        }
    }

    /// Name of the auto rule that would claim `value`.
    ///
    /// Returns [`HEX_FALLBACK_RULE`] when no rule matches and `"empty"`
    /// for a zero-length value.
    pub fn matching_rule(value: &[u8]) -> &'static str {
        if value.is_empty() {
            return "empty";
        }
        AUTO_RULES
            .iter()
            .find(|rule| (rule.apply)(value).is_some())
            .map_or(HEX_FALLBACK_RULE, |rule| rule.name)
    }

    fn auto_detect(&self, value: &[u8]) -> Classified {
        AUTO_RULES
            .iter()
            .find_map(|rule| (rule.apply)(value))
            .unwrap_or_else(|| self.hex(value))
    }

    fn hex(&self, value: &[u8]) -> Classified {
        Classified::new(hex_preview(value, self.hex_preview_limit), TypeLabel::Bytes)
    }

    fn render_forced(&self, value: &[u8], hint: TypeHint) -> Result<Classified, WireError> {
        let classified = match hint {
            TypeHint::Auto => self.auto_detect(value),
            TypeHint::String => Classified::new(forced_string(value), TypeLabel::String),
            TypeHint::Int32 => Classified::new(forced_int32(value)?.to_string(), TypeLabel::Int32),
            TypeHint::Int64 => Classified::new(forced_int64(value)?.to_string(), TypeLabel::Int64),
            TypeHint::Float => Classified::new(forced_float(value), TypeLabel::Float),
            TypeHint::Double => Classified::new(forced_double(value), TypeLabel::Double),
            TypeHint::Bool => Classified::new(bool_text(value[0] != 0), TypeLabel::Bool),
            TypeHint::Bytes => self.hex(value),
        };
        Ok(classified)
    }
}

/// Classify with the default hex preview limit.
pub fn classify(value: &[u8], hint: TypeHint) -> Classified {
    Classifier::default().classify(value, hint)
}

// ── Auto rules ────────────────────────────────────────────────────────────────

fn bool_byte(value: &[u8]) -> Option<Classified> {
    match value {
        [byte @ (0 | 1)] => Some(Classified::new(bool_text(*byte == 1), TypeLabel::Bool)),
        _ => None,
    }
}

fn prefixed_string(value: &[u8]) -> Option<Classified> {
    let (payload, end) = length_prefixed(value)?;
    if end != value.len() {
        return None;
    }
    let text = String::from_utf8_lossy(payload);
    (!text.contains(char::REPLACEMENT_CHARACTER))
        .then(|| Classified::new(text.into_owned(), TypeLabel::String))
}

fn plain_string(value: &[u8]) -> Option<Classified> {
    let text = String::from_utf8_lossy(value);
    let clean = !text.contains(char::REPLACEMENT_CHARACTER)
        && !text
            .chars()
            .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'));
    clean.then(|| Classified::new(text.into_owned(), TypeLabel::String))
}

fn plausible_int32(value: &[u8]) -> Option<Classified> {
    let bytes: [u8; 4] = value.try_into().ok()?;
    let number = i32::from_le_bytes(bytes);
    (number.unsigned_abs() < INT32_PLAUSIBLE_LIMIT)
        .then(|| Classified::new(number.to_string(), TypeLabel::Int32))
}

fn plausible_int64(value: &[u8]) -> Option<Classified> {
    let bytes: [u8; 8] = value.try_into().ok()?;
    let number = i64::from_le_bytes(bytes);
    (number.unsigned_abs() < INT64_PLAUSIBLE_LIMIT)
        .then(|| Classified::new(number.to_string(), TypeLabel::Int64))
}

/// Reads the whole value as one varint, bits past 63 wrapping into the
/// sign. A value that ends mid-varint still counts as consumed whole.
fn whole_varint(value: &[u8]) -> Option<Classified> {
    let (raw, consumed) = decode_varint64(value).ok()?;
    #[allow(clippy::cast_possible_wrap)]
    let number = raw as i64;
    (consumed == value.len()).then(|| Classified::new(number.to_string(), TypeLabel::Varint))
}

// ── Forced renderings ─────────────────────────────────────────────────────────

/// Split a `[varint len][payload]` value.
///
/// Returns the payload and the offset just past it when the length is
/// positive and the payload fits inside `value`; trailing bytes are
/// allowed and left to the caller to judge.
fn length_prefixed(value: &[u8]) -> Option<(&[u8], usize)> {
    let (raw_len, prefix) = decode_varint32(value).ok()?;
    // A length with bit 31 set is negative on the wire.
    let len = usize::try_from(i32::try_from(raw_len).ok()?).ok()?;
    if len == 0 {
        return None;
    }
    let end = prefix.checked_add(len)?;
    value.get(prefix..end).map(|payload| (payload, end))
}

fn forced_string(value: &[u8]) -> String {
    let text = length_prefixed(value).map_or(value, |(payload, _)| payload);
    String::from_utf8_lossy(text).into_owned()
}

fn forced_int32(value: &[u8]) -> Result<i32, WireError> {
    if let Some(bytes) = value.first_chunk::<4>() {
        return Ok(i32::from_le_bytes(*bytes));
    }
    let (raw, _) = decode_varint32(value)?;
    #[allow(clippy::cast_possible_wrap)]
    let number = raw as i32;
    Ok(number)
}

fn forced_int64(value: &[u8]) -> Result<i64, WireError> {
    if let Some(bytes) = value.first_chunk::<8>() {
        return Ok(i64::from_le_bytes(*bytes));
    }
    let (raw, _) = decode_varint64(value)?;
    #[allow(clippy::cast_possible_wrap)]
    let number = raw as i64;
    Ok(number)
}

fn forced_float(value: &[u8]) -> String {
    value
        .first_chunk::<4>()
        .map_or_else(|| "0".to_string(), |bytes| general_f32(f32::from_le_bytes(*bytes)))
}

fn forced_double(value: &[u8]) -> String {
    if let Some(bytes) = value.first_chunk::<8>() {
        return general_f64(f64::from_le_bytes(*bytes));
    }
    if let Some(bytes) = value.first_chunk::<4>() {
        return general_f64(f64::from(f32::from_le_bytes(*bytes)));
    }
    "0".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto(value: &[u8]) -> (String, TypeLabel) {
        let c = classify(value, TypeHint::Auto);
        (c.rendered, c.label)
    }

    fn forced(value: &[u8], hint: TypeHint) -> (String, TypeLabel) {
        let c = classify(value, hint);
        (c.rendered, c.label)
    }

    // ── Auto mode ─────────────────────────────────────────────────────────────

    #[test]
    fn empty_value_ignores_hint() {
        for hint in TypeHint::ALL {
            assert_eq!(forced(&[], hint), ("(empty)".into(), TypeLabel::Empty));
        }
    }

    #[test]
    fn single_zero_and_one_are_bools() {
        assert_eq!(auto(&[0x00]), ("False".into(), TypeLabel::Bool));
        assert_eq!(auto(&[0x01]), ("True".into(), TypeLabel::Bool));
    }

    #[test]
    fn single_two_falls_through_to_varint() {
        assert_eq!(Classifier::matching_rule(&[0x02]), "varint");
        assert_eq!(auto(&[0x02]), ("2".into(), TypeLabel::Varint));
    }

    #[test]
    fn prefixed_utf8_is_string() {
        assert_eq!(auto(b"\x05hello"), ("hello".into(), TypeLabel::String));
        assert_eq!(Classifier::matching_rule(b"\x05hello"), "prefixed_string");
    }

    #[test]
    fn prefixed_string_allows_control_characters() {
        assert_eq!(auto(b"\x02a\x07"), ("a\u{7}".into(), TypeLabel::String));
    }

    #[test]
    fn prefix_with_trailing_bytes_is_not_prefixed_string() {
        // len 2 but 3 bytes follow: plain UTF-8 wins instead, prefix included.
        assert_eq!(auto(b"\x02abc").1, TypeLabel::Bytes);
        assert_eq!(auto(b"4abc"), ("4abc".into(), TypeLabel::String));
    }

    #[test]
    fn plain_text_is_string() {
        assert_eq!(
            auto("tab\tnew\nline\r".as_bytes()),
            ("tab\tnew\nline\r".into(), TypeLabel::String)
        );
        assert_eq!(auto("日本語".as_bytes()), ("日本語".into(), TypeLabel::String));
    }

    #[test]
    fn invalid_utf8_is_not_string() {
        assert_eq!(Classifier::matching_rule(&[0xC3, 0x28, 0x41]), HEX_FALLBACK_RULE);
    }

    #[test]
    fn four_byte_small_int() {
        assert_eq!(auto(&42i32.to_le_bytes()), ("42".into(), TypeLabel::Int32));
        assert_eq!(auto(&(-7i32).to_le_bytes()), ("-7".into(), TypeLabel::Int32));
    }

    #[test]
    fn four_byte_float_bits_read_as_int_when_small() {
        // 1.0f32 = 0x3F800000, which is above 10^9 as an integer.
        let bits = 1.0f32.to_le_bytes();
        assert_ne!(auto(&bits).1, TypeLabel::Int32);
        // 1e-45f32 (smallest subnormal) is integer 1.
        let tiny = f32::from_bits(1).to_le_bytes();
        assert_eq!(auto(&tiny), ("1".into(), TypeLabel::Int32));
    }

    #[test]
    fn int32_min_fails_plausibility() {
        let bytes = i32::MIN.to_le_bytes();
        assert_eq!(auto(&bytes), ("00 00 00 80".into(), TypeLabel::Bytes));
    }

    #[test]
    fn eight_byte_small_int() {
        let bytes = 1_700_000_000_000i64.to_le_bytes();
        assert_eq!(auto(&bytes), ("1700000000000".into(), TypeLabel::Int64));
    }

    #[test]
    fn eight_byte_large_int_falls_to_hex() {
        let bytes = 2.5f64.to_le_bytes();
        assert_eq!(auto(&bytes).1, TypeLabel::Bytes);
    }

    #[test]
    fn multi_byte_varint() {
        // 300 = [0xAC, 0x02]; not UTF-8 and not 4/8 bytes long
        assert_eq!(auto(&[0xAC, 0x02]), ("300".into(), TypeLabel::Varint));
    }

    #[test]
    fn varint_renders_signed() {
        let mut buf = [0xFF; 10];
        buf[9] = 0x01;
        assert_eq!(auto(&buf), ("-1".into(), TypeLabel::Varint));
    }

    #[test]
    fn varint_cut_short_keeps_partial_value() {
        assert_eq!(auto(&[0xFF, 0xFF]), ("16383".into(), TypeLabel::Varint));
        assert_eq!(auto(&[0x80]), ("0".into(), TypeLabel::Varint));
        assert_eq!(auto(&[0x80, 0x80]), ("0".into(), TypeLabel::Varint));
    }

    #[test]
    fn eleven_continuation_bytes_are_hex() {
        assert_eq!(Classifier::matching_rule(&[0xFE; 11]), HEX_FALLBACK_RULE);
    }

    #[test]
    fn hex_fallback_respects_limit() {
        // A leading 0x00 ends the varint after one byte.
        let c = Classifier::new(2).classify(&[0x00, 0xFE, 0xFE], TypeHint::Auto);
        assert_eq!(c.rendered, "00 FE...");
        assert_eq!(c.label, TypeLabel::Bytes);
    }

    // ── Forced hints ──────────────────────────────────────────────────────────

    #[test]
    fn forced_string_prefers_prefix_and_allows_trailing_bytes() {
        assert_eq!(forced(b"\x02hiXYZ", TypeHint::String), ("hi".into(), TypeLabel::String));
    }

    #[test]
    fn forced_string_without_prefix_reads_whole_value() {
        assert_eq!(forced(b"\x00abc", TypeHint::String), ("\0abc".into(), TypeLabel::String));
        assert_eq!(
            forced(&[0x41, 0xFF], TypeHint::String),
            ("A\u{FFFD}".into(), TypeLabel::String)
        );
    }

    #[test]
    fn forced_int32_reads_fixed_width_or_varint() {
        assert_eq!(
            forced(&i32::MIN.to_le_bytes(), TypeHint::Int32),
            (i32::MIN.to_string(), TypeLabel::Int32)
        );
        assert_eq!(forced(&[0xAC, 0x02], TypeHint::Int32), ("300".into(), TypeLabel::Int32));
    }

    #[test]
    fn forced_integers_read_cut_short_varints() {
        assert_eq!(forced(&[0x80], TypeHint::Int32), ("0".into(), TypeLabel::Int32));
        assert_eq!(forced(&[0xFF, 0xFF], TypeHint::Int32), ("16383".into(), TypeLabel::Int32));
        assert_eq!(forced(&[0x85, 0x80], TypeHint::Int64), ("5".into(), TypeLabel::Int64));
    }

    #[test]
    fn forced_int64_reads_fixed_width_or_varint() {
        assert_eq!(
            forced(&(-5i64).to_le_bytes(), TypeHint::Int64),
            ("-5".into(), TypeLabel::Int64)
        );
        assert_eq!(forced(&[0x7F], TypeHint::Int64), ("127".into(), TypeLabel::Int64));
    }

    #[test]
    fn forced_float_and_double() {
        assert_eq!(
            forced(&1.5f32.to_le_bytes(), TypeHint::Float),
            ("1.5".into(), TypeLabel::Float)
        );
        assert_eq!(forced(&[0x01, 0x02], TypeHint::Float), ("0".into(), TypeLabel::Float));
        assert_eq!(
            forced(&(-0.25f64).to_le_bytes(), TypeHint::Double),
            ("-0.25".into(), TypeLabel::Double)
        );
        assert_eq!(
            forced(&2.5f32.to_le_bytes(), TypeHint::Double),
            ("2.5".into(), TypeLabel::Double)
        );
        assert_eq!(forced(&[0x01], TypeHint::Double), ("0".into(), TypeLabel::Double));
    }

    #[test]
    fn forced_bool_tests_first_byte() {
        assert_eq!(forced(&[0x02, 0x00], TypeHint::Bool), ("True".into(), TypeLabel::Bool));
        assert_eq!(forced(&[0x00, 0x01], TypeHint::Bool), ("False".into(), TypeLabel::Bool));
    }

    #[test]
    fn forced_bytes_skips_heuristics() {
        assert_eq!(forced(&[0x01], TypeHint::Bytes), ("01".into(), TypeLabel::Bytes));
    }
}
