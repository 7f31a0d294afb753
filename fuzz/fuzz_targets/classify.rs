#![no_main]

use libfuzzer_sys::fuzz_target;
use mmkv_decoder::classify;
use mmkv_types::{TypeHint, TypeLabel};

// Fuzz target: value classification.
//
// Input format:
//   byte 0: hint selector (mod 8)
//   bytes 1..: value slice
fuzz_target!(|data: &[u8]| {
    let Some((&selector, value)) = data.split_first() else {
        return;
    };
    let hint = TypeHint::ALL[usize::from(selector) % TypeHint::ALL.len()];

    let classified = classify(value, hint);
    if value.is_empty() {
        assert_eq!(classified.label, TypeLabel::Empty);
    }
});
