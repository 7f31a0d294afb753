use crate::error::WireError;

/// Maximum number of bytes a `u64` varint can occupy.
/// ceil(64 / 7) = 10 bytes.
pub const MAX_VARINT_BYTES: usize = 10;

/// Maximum number of bytes a `u32` varint can occupy.
/// ceil(32 / 7) = 5 bytes.
pub const MAX_VARINT32_BYTES: usize = 5;

/// Encode a `u64` value as an unsigned LEB128 varint into the provided buffer.
///
/// # Returns
///
/// The number of bytes written (1–10).
///
/// # Panics
///
/// Panics if `buf` is shorter than the required encoding length.
/// A 10-byte buffer is always sufficient for any `u64`.
///
/// # Wire format examples
///
/// | Value   | Encoded bytes        | Length |
/// |---------|----------------------|--------|
/// | 0       | `[0x00]`             | 1      |
/// | 127     | `[0x7F]`             | 1      |
/// | 128     | `[0x80, 0x01]`       | 2      |
/// | 300     | `[0xAC, 0x02]`       | 2      |
/// | 16384   | `[0x80, 0x80, 0x01]` | 3      |
pub fn encode_varint(mut value: u64, buf: &mut [u8]) -> usize {
    let mut i = 0;
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;

        if value > 0 {
            byte |= 0x80;
        }

        buf[i] = byte;
        i += 1;

        if value == 0 {
            break;
        }
    }
    i
}

/// Decode an unsigned varint whose target integer is 32 bits wide.
///
/// Length prefixes in an MMKV dump are read this way. Data bits that land
/// above bit 31 on the fifth byte are discarded, so the result always fits
/// in a `u32`; framing code reinterprets it as `i32` where a sign matters.
///
/// # Returns
///
/// `(decoded_value, bytes_consumed)` on success. A slice that ends while
/// the continuation bit is still set yields the bits read so far, with
/// `bytes_consumed == buf.len()`; an empty slice yields `(0, 0)`.
///
/// # Errors
///
/// Returns [`WireError::VarintTooLong`] if the fifth byte still carries the
/// continuation bit.
pub fn decode_varint32(buf: &[u8]) -> Result<(u32, usize), WireError> {
    let (value, consumed) = decode_with_limit(buf, 32, MAX_VARINT32_BYTES)?;
    // Truncation to the low 32 bits is the defined behaviour here.
    #[allow(clippy::cast_possible_truncation)]
    let value = value as u32;
    Ok((value, consumed))
}

/// Decode an unsigned LEB128 varint into a `u64`.
///
/// # Returns
///
/// `(decoded_value, bytes_consumed)` on success.
///
/// Running out of input is not an error; see [`decode_varint32`].
///
/// # Errors
///
/// Returns [`WireError::VarintTooLong`] if the tenth byte still carries the
/// continuation bit.
pub fn decode_varint64(buf: &[u8]) -> Result<(u64, usize), WireError> {
    decode_with_limit(buf, 64, MAX_VARINT_BYTES)
}

fn decode_with_limit(
    buf: &[u8],
    limit_bits: u32,
    max_bytes: usize,
) -> Result<(u64, usize), WireError> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    for (i, &byte) in buf.iter().enumerate() {
        // shift is always < 64 here: the limit check below fires first.
        let data = u64::from(byte & 0x7F);
        result |= data << shift;

        if byte & 0x80 == 0 {
            return Ok((result, i + 1));
        }

        shift += 7;
        if shift >= limit_bits {
            return Err(WireError::VarintTooLong { max_bytes });
        }
    }

    // Input ran out mid-varint: keep what was read.
    Ok((result, buf.len()))
}
