#![no_main]

use libfuzzer_sys::fuzz_target;
use mmkv_wire::varint::{decode_varint32, decode_varint64, encode_varint};

// Fuzz target: varint encode->decode roundtrip.
//
// Reads a u64 from the first 8 bytes, encodes it, and checks that the
// 64-bit decoder returns it unchanged. Values that fit in a u32 must
// also survive the 32-bit decoder.
fuzz_target!(|data: &[u8]| {
    let Some(bytes) = data.first_chunk::<8>() else {
        return;
    };
    let value = u64::from_le_bytes(*bytes);

    let mut buf = [0u8; 10];
    let len = encode_varint(value, &mut buf);

    assert_eq!(decode_varint64(&buf[..len]), Ok((value, len)));
    if let Ok(small) = u32::try_from(value) {
        assert_eq!(decode_varint32(&buf[..len]), Ok((small, len)));
    }
});
