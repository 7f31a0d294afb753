/// Framing errors raised while walking an MMKV dump.
///
/// None of these reach the caller of the decoder as a failure: the
/// decoder treats any of them as "stop the scan here" and records the
/// variant alongside the offset so tooling can explain a short result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// Varint encoding ran past the width of its target integer.
    #[error("varint too long: exceeded {max_bytes}-byte limit")]
    VarintTooLong { max_bytes: usize },

    /// Input ended before the header or a key/value field could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A key length prefix decoded to zero or a negative number.
    #[error("invalid key length {length} at offset {offset}")]
    InvalidKeyLength { offset: usize, length: i32 },

    /// A value length prefix decoded to a negative number.
    #[error("invalid value length {length} at offset {offset}")]
    InvalidValueLength { offset: usize, length: i32 },
}
