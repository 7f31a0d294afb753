use crate::error::WireError;
use crate::header::{DumpHeader, HEADER_SIZE};
use crate::kv_frame::KvFrame;

/// Cursor over one MMKV dump buffer.
///
/// Holds the scan position and the clamped end of the declared payload.
/// A reader is created per decode call and advanced through `&mut self`;
/// it only moves forward when a whole frame has been read, so a failed
/// read leaves `position` at the start of the offending frame.
#[derive(Debug)]
pub struct FrameReader<'a> {
    buf: &'a [u8],
    position: usize,
    payload_end: usize,
}

impl<'a> FrameReader<'a> {
    /// Parse the header and position the cursor on the first frame.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if the buffer is shorter than
    /// the 4-byte header.
    pub fn new(buf: &'a [u8]) -> Result<(Self, DumpHeader), WireError> {
        let header = DumpHeader::read_from(buf)?;
        let reader = Self {
            buf,
            position: HEADER_SIZE,
            payload_end: header.payload_end(buf.len()),
        };
        Ok((reader, header))
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Clamped end of the payload region.
    pub fn payload_end(&self) -> usize {
        self.payload_end
    }

    /// Whether the cursor is still inside both the payload region and the
    /// buffer.
    pub fn has_remaining(&self) -> bool {
        self.position < self.payload_end && self.position < self.buf.len()
    }

    /// Read the frame under the cursor and advance past it.
    ///
    /// # Errors
    ///
    /// Any [`WireError`] from [`KvFrame::read_from`]. The cursor does not
    /// move on error.
    pub fn next_frame(&mut self) -> Result<KvFrame<'a>, WireError> {
        let (frame, next) = KvFrame::read_from(self.buf, self.position)?;
        self.position = next;
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_frames_until_payload_end() {
        let buf = [
            0x06, 0x00, 0x00, 0x00, // declared 6
            0x01, b'a', 0x01, 0x01, // a = [01]
            0x01, b'b', 0x00, // b = [] (outside declared region)
        ];
        let (mut reader, header) = FrameReader::new(&buf).unwrap();
        assert_eq!(header.declared_len, 6);
        assert_eq!(reader.payload_end(), 10);

        let first = reader.next_frame().unwrap();
        assert_eq!(first.key, b"a");
        assert_eq!(reader.position(), 8);
        assert!(reader.has_remaining());

        let second = reader.next_frame().unwrap();
        assert_eq!(second.key, b"b");
        assert!(!reader.has_remaining());
    }

    #[test]
    fn failed_read_keeps_position() {
        let buf = [0x10, 0x00, 0x00, 0x00, 0x00];
        let (mut reader, _) = FrameReader::new(&buf).unwrap();
        assert!(reader.next_frame().is_err());
        assert_eq!(reader.position(), HEADER_SIZE);
    }

    #[test]
    fn short_buffer_has_no_reader() {
        assert!(FrameReader::new(&[0x00, 0x00]).is_err());
    }
}
