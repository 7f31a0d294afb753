#![no_main]

use libfuzzer_sys::fuzz_target;
use mmkv_wire::kv_frame::KvFrame;

// Fuzz target: KvFrame::read_from at every offset.
//
// Catches bugs in:
// - Negative lengths from bit 31
// - Fields running past the buffer end
// - Offset arithmetic near usize::MAX lengths
fuzz_target!(|data: &[u8]| {
    for offset in 0..=data.len() {
        if let Ok((frame, next)) = KvFrame::read_from(data, offset) {
            assert!(!frame.key.is_empty());
            assert!(next <= data.len());
        }
    }
});
