#![no_main]

use libfuzzer_sys::fuzz_target;
use mmkv_decoder::{DecoderConfig, MmkvDecoder};
use mmkv_types::TypeHint;

// Fuzz target: full dump decode under every hint.
//
// The decoder must never panic, and a scan must end inside the buffer.
fuzz_target!(|data: &[u8]| {
    for hint in TypeHint::ALL {
        let dump = MmkvDecoder::decode(data, &DecoderConfig::with_hint(hint));
        assert!(dump.outcome.offset() <= data.len());
        assert!(dump.payload_end <= data.len());
    }
});
