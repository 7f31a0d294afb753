use crate::error::WireError;

/// Total header size in bytes (fixed).
pub const HEADER_SIZE: usize = 4;

/// MMKV dump header: the first 4 bytes of every data file.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────────────┐
/// │ Offset │ Size    │ Description                              │
/// ├────────┼─────────┼──────────────────────────────────────────┤
/// │ 0x00   │ 4 bytes │ Declared payload length N (i32, LE)      │
/// │ 0x04   │ N bytes │ Key/value frames (see `kv_frame`)        │
/// └────────┴─────────┴──────────────────────────────────────────┘
/// ```
///
/// The declared length is advisory. Files are often preallocated or
/// truncated, so the header may claim more payload than the buffer holds;
/// [`payload_end`](Self::payload_end) clamps it to what is really there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DumpHeader {
    pub declared_len: i32,
}

impl DumpHeader {
    /// Parse the header from the first 4 bytes of the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if the buffer is shorter than
    /// [`HEADER_SIZE`].
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        let Some(&[b0, b1, b2, b3]) = buf.get(..HEADER_SIZE) else {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        };

        Ok(Self {
            declared_len: i32::from_le_bytes([b0, b1, b2, b3]),
        })
    }

    /// Absolute offset one past the last payload byte the scan may visit.
    ///
    /// The declared length is clamped to `buffer_len - HEADER_SIZE`. A
    /// negative declared length leaves an empty payload region.
    pub fn payload_end(self, buffer_len: usize) -> usize {
        let available = buffer_len.saturating_sub(HEADER_SIZE);
        let declared = usize::try_from(self.declared_len).unwrap_or(0);
        HEADER_SIZE + declared.min(available)
    }

    /// Whether the header claims more payload than the buffer holds.
    pub fn is_clamped(self, buffer_len: usize) -> bool {
        let available = buffer_len.saturating_sub(HEADER_SIZE);
        usize::try_from(self.declared_len).is_ok_and(|declared| declared > available)
    }
}
