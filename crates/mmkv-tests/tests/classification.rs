//! Value classification as seen through the decoder.
//!
//! Each test builds a dump with the fixture builder, decodes it, and checks
//! the rendering and label the classifier chose. Auto mode covers the rule
//! order; the forced-hint tests cover every hint, including the fallbacks
//! for values too short for the requested width.

use mmkv_decoder::{Classifier, DecoderConfig, MmkvDecoder, classify};
use mmkv_tests::{DumpBuilder, length_prefixed, varint};
use mmkv_types::{Entry, TypeHint, TypeLabel};

fn single(value: &[u8], hint: TypeHint) -> Entry {
    let payload = DumpBuilder::new().add_raw("k", value).build();
    let mut entries = MmkvDecoder::decode_buffer(&payload, hint);
    assert_eq!(entries.len(), 1, "expected one entry for {value:02X?}");
    entries.remove(0)
}

fn auto(value: &[u8]) -> (String, TypeLabel) {
    let entry = single(value, TypeHint::Auto);
    (entry.rendered_value, entry.type_label)
}

fn forced(value: &[u8], hint: TypeHint) -> (String, TypeLabel) {
    let entry = single(value, hint);
    (entry.rendered_value, entry.type_label)
}

// ── Auto rules ────────────────────────────────────────────────────────────────

#[test]
fn bool_rule_takes_only_zero_and_one() {
    assert_eq!(auto(&[0x00]), ("False".into(), TypeLabel::Bool));
    assert_eq!(auto(&[0x01]), ("True".into(), TypeLabel::Bool));

    let (_, label) = auto(&[0x02]);
    assert_ne!(label, TypeLabel::Bool);
}

#[test]
fn four_byte_forty_two_is_int32() {
    assert_eq!(auto(&42i32.to_le_bytes()), ("42".into(), TypeLabel::Int32));
}

#[test]
fn prefixed_hello_is_string() {
    assert_eq!(auto(b"\x05hello"), ("hello".into(), TypeLabel::String));
    assert_eq!(auto(&length_prefixed("héllo".as_bytes())), ("héllo".into(), TypeLabel::String));
}

#[test]
fn prefixed_string_with_trailing_bytes_is_hex() {
    assert_eq!(
        auto(b"\x05hello\x00"),
        ("05 68 65 6C 6C 6F 00".into(), TypeLabel::Bytes)
    );
}

#[test]
fn plain_text_with_line_breaks_is_string() {
    assert_eq!(
        auto(b"line1\nline2\r\n\tend"),
        ("line1\nline2\r\n\tend".into(), TypeLabel::String)
    );
}

#[test]
fn int32_plausibility_bound_is_exclusive() {
    assert_eq!(
        auto(&(-999_999_999i32).to_le_bytes()),
        ("-999999999".into(), TypeLabel::Int32)
    );
    assert_eq!(
        auto(&1_000_000_000i32.to_le_bytes()),
        ("00 CA 9A 3B".into(), TypeLabel::Bytes)
    );
}

#[test]
fn eight_byte_timestamp_is_int64() {
    assert_eq!(
        auto(&1_700_000_000_000i64.to_le_bytes()),
        ("1700000000000".into(), TypeLabel::Int64)
    );
}

#[test]
fn multi_byte_varint_is_signed() {
    assert_eq!(auto(&varint(300)), ("300".into(), TypeLabel::Varint));
    assert_eq!(auto(&varint(u64::MAX)), ("-1".into(), TypeLabel::Varint));
}

#[test]
fn value_ending_mid_varint_is_still_varint() {
    assert_eq!(auto(&[0xFF, 0xFF]), ("16383".into(), TypeLabel::Varint));
    assert_eq!(auto(&[0x80]), ("0".into(), TypeLabel::Varint));
}

#[test]
fn rule_names_follow_priority() {
    assert_eq!(Classifier::matching_rule(&[0x01]), "bool");
    assert_eq!(Classifier::matching_rule(b"\x03abc"), "prefixed_string");
    assert_eq!(Classifier::matching_rule(b"abc"), "plain_string");
    assert_eq!(Classifier::matching_rule(&7i32.to_le_bytes()), "int32");
    assert_eq!(Classifier::matching_rule(&7i64.to_le_bytes()), "int64");
    assert_eq!(Classifier::matching_rule(&[0x80, 0x01]), "varint");
    assert_eq!(Classifier::matching_rule(&[0xFF, 0xFF]), "varint");
    assert_eq!(Classifier::matching_rule(&[0x00, 0xFF]), "hex");
    assert_eq!(Classifier::matching_rule(&[]), "empty");
}

// ── Empty values ──────────────────────────────────────────────────────────────

#[test]
fn empty_value_is_empty_under_every_hint() {
    for hint in TypeHint::ALL {
        assert_eq!(
            forced(&[], hint),
            ("(empty)".into(), TypeLabel::Empty),
            "hint {hint}"
        );
    }
}

// ── Forced hints ──────────────────────────────────────────────────────────────

#[test]
fn forced_string_prefers_length_prefix() {
    assert_eq!(forced(b"\x03abcXYZ", TypeHint::String), ("abc".into(), TypeLabel::String));
}

#[test]
fn forced_string_without_usable_prefix_decodes_whole_slice() {
    assert_eq!(
        forced(&1024i32.to_le_bytes(), TypeHint::String),
        ("\0\u{4}\0\0".into(), TypeLabel::String)
    );
    assert_eq!(
        forced(&[b'o', b'k', 0xFF], TypeHint::String),
        ("ok\u{FFFD}".into(), TypeLabel::String)
    );
}

#[test]
fn forced_int32_reads_first_four_bytes() {
    assert_eq!(
        forced(b"\x05alice", TypeHint::Int32),
        ("1768710405".into(), TypeLabel::Int32)
    );
    assert_eq!(
        forced(&(-5i32).to_le_bytes(), TypeHint::Int32),
        ("-5".into(), TypeLabel::Int32)
    );
}

#[test]
fn forced_integers_fall_back_to_varint_when_short() {
    assert_eq!(forced(&varint(300), TypeHint::Int32), ("300".into(), TypeLabel::Int32));
    assert_eq!(forced(&[0x7F], TypeHint::Int64), ("127".into(), TypeLabel::Int64));
}

#[test]
fn forced_integers_read_what_a_cut_short_varint_holds() {
    assert_eq!(forced(&[0x80], TypeHint::Int32), ("0".into(), TypeLabel::Int32));
    assert_eq!(forced(&[0xFF], TypeHint::Int32), ("127".into(), TypeLabel::Int32));
    assert_eq!(forced(&[0x80, 0x80], TypeHint::Int64), ("0".into(), TypeLabel::Int64));
}

#[test]
fn forced_floats() {
    assert_eq!(forced(&1.5f32.to_le_bytes(), TypeHint::Float), ("1.5".into(), TypeLabel::Float));
    assert_eq!(forced(&1e10f32.to_le_bytes(), TypeHint::Float), ("1E+10".into(), TypeLabel::Float));
    assert_eq!(forced(&[0x01, 0x02], TypeHint::Float), ("0".into(), TypeLabel::Float));
}

#[test]
fn forced_double_widens_four_byte_values() {
    assert_eq!(forced(&0.5f64.to_le_bytes(), TypeHint::Double), ("0.5".into(), TypeLabel::Double));
    assert_eq!(forced(&1.5f32.to_le_bytes(), TypeHint::Double), ("1.5".into(), TypeLabel::Double));
    assert_eq!(forced(&[0x01, 0x02, 0x03], TypeHint::Double), ("0".into(), TypeLabel::Double));
}

#[test]
fn forced_bool_tests_first_byte() {
    assert_eq!(forced(&[0x02], TypeHint::Bool), ("True".into(), TypeLabel::Bool));
    assert_eq!(forced(&[0x00, 0xFF], TypeHint::Bool), ("False".into(), TypeLabel::Bool));
}

#[test]
fn forced_bytes_is_hex() {
    assert_eq!(
        forced(b"\x05alice", TypeHint::Bytes),
        ("05 61 6C 69 63 65".into(), TypeLabel::Bytes)
    );
}

// ── Hex preview ───────────────────────────────────────────────────────────────

#[test]
fn hex_preview_limit_is_configurable() {
    // Too long for any varint, so the value falls through to hex.
    let payload = DumpBuilder::new().add_raw("blob", &[0x9C; 12]).build();
    let config = DecoderConfig {
        hex_preview_limit: 4,
        ..DecoderConfig::default()
    };
    let dump = MmkvDecoder::decode(&payload, &config);
    assert_eq!(dump.entries[0].rendered_value, "9C 9C 9C 9C...");
}

#[test]
fn default_preview_shows_one_hundred_bytes() {
    let rendered = classify(&[0xAB; 150], TypeHint::Bytes).rendered;
    assert_eq!(rendered.matches("AB").count(), 100);
    assert!(rendered.ends_with("AB..."));
}
