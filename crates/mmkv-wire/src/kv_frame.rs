use crate::error::WireError;
use crate::varint::decode_varint32;

/// One key/value record as it sits on the wire.
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │ key_len    (varint, read as i32, must be > 0)    │
/// │ key        [key_len bytes, UTF-8]                │
/// │ value_len  (varint, read as i32, must be >= 0)   │
/// │ value      [value_len bytes]                     │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// Both slices borrow from the dump buffer; nothing is copied until the
/// decoder renders the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KvFrame<'a> {
    pub key: &'a [u8],
    pub value: &'a [u8],
}

impl<'a> KvFrame<'a> {
    /// Read a frame starting at `offset` within `buf`.
    ///
    /// Field bounds are checked against the whole buffer, not against the
    /// header's declared payload region.
    ///
    /// # Returns
    ///
    /// `(frame, next_offset)` where `next_offset` is the absolute offset
    /// of the byte following the value.
    ///
    /// # Errors
    ///
    /// - [`WireError::InvalidKeyLength`] if the key length is `<= 0`.
    /// - [`WireError::InvalidValueLength`] if the value length is negative.
    /// - [`WireError::UnexpectedEof`] if the key or value runs past the end
    ///   of the buffer.
    /// - [`WireError::VarintTooLong`] if a length prefix is malformed.
    ///
    /// A length prefix cut short by the end of the buffer is not an error by
    /// itself: it reads as the bits present, so a key that ends the buffer
    /// gets a zero value length and an empty value.
    pub fn read_from(buf: &'a [u8], offset: usize) -> Result<(Self, usize), WireError> {
        let mut cursor = offset;

        // 1. Key length
        let (raw_key_len, n) = read_length(buf, cursor)?;
        let key_len = match usize::try_from(raw_key_len) {
            Ok(len) if len > 0 => len,
            _ => {
                return Err(WireError::InvalidKeyLength {
                    offset: cursor,
                    length: raw_key_len,
                });
            }
        };
        cursor += n;

        // 2. Key bytes
        let key = take(buf, cursor, key_len)?;
        cursor += key_len;

        // 3. Value length
        let (raw_value_len, n) = read_length(buf, cursor)?;
        let Ok(value_len) = usize::try_from(raw_value_len) else {
            return Err(WireError::InvalidValueLength {
                offset: cursor,
                length: raw_value_len,
            });
        };
        cursor += n;

        // 4. Value bytes
        let value = take(buf, cursor, value_len)?;
        cursor += value_len;

        Ok((Self { key, value }, cursor))
    }
}

/// Read a varint length prefix at `cursor`, reinterpreting it as `i32`.
///
/// A cursor at or past the end of `buf` reads as length 0.
fn read_length(buf: &[u8], cursor: usize) -> Result<(i32, usize), WireError> {
    let tail = buf.get(cursor..).unwrap_or_default();
    let (raw, n) = decode_varint32(tail)?;

    // Lengths are signed on the wire; values with bit 31 set are negative.
    #[allow(clippy::cast_possible_wrap)]
    let length = raw as i32;
    Ok((length, n))
}

fn take(buf: &[u8], start: usize, len: usize) -> Result<&[u8], WireError> {
    start
        .checked_add(len)
        .and_then(|end| buf.get(start..end))
        .ok_or(WireError::UnexpectedEof { offset: buf.len() })
}
