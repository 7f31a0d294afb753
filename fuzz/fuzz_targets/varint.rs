#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: both varint decoders on raw input.
//
// Catches bugs in:
// - Continuation past 5 / 10 bytes
// - Zero-length input
// - Fifth-byte bits above bit 31
fuzz_target!(|data: &[u8]| {
    let _ = mmkv_wire::varint::decode_varint32(data);
    let _ = mmkv_wire::varint::decode_varint64(data);
});
