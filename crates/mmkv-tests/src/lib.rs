//! Fixture builder for MMKV dump bytes.
//!
//! ```text
//! DumpBuilder::new()
//!     .add_string("name", "alice")   → [05 6E 61 6D 65] [06 05 61 6C 69 63 65]
//!     .add_int32("age", 30)          → [03 61 67 65]    [04 1E 00 00 00]
//!     .build()                       → [len:i32 LE] + frames
//! ```
//!
//! Values are encoded the way the store writes them: strings carry their
//! own varint length inside the value, fixed-width numbers are
//! little-endian. The header declares the payload length unless
//! overridden with [`DumpBuilder::declare_len`].

use mmkv_wire::varint::{MAX_VARINT_BYTES, encode_varint};

/// Encode `value` as a standalone varint.
pub fn varint(value: u64) -> Vec<u8> {
    let mut buf = [0u8; MAX_VARINT_BYTES];
    let n = encode_varint(value, &mut buf);
    buf[..n].to_vec()
}

/// Prefix `bytes` with their varint length.
pub fn length_prefixed(bytes: &[u8]) -> Vec<u8> {
    let mut out = varint(bytes.len() as u64);
    out.extend_from_slice(bytes);
    out
}

#[derive(Default)]
pub struct DumpBuilder {
    payload: Vec<u8>,
    declared_len: Option<i32>,
}

impl DumpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame with the given raw value bytes.
    pub fn add_raw(&mut self, key: &str, value: &[u8]) -> &mut Self {
        self.payload.extend(length_prefixed(key.as_bytes()));
        self.payload.extend(length_prefixed(value));
        self
    }

    /// Append a string value in the store's prefixed form.
    pub fn add_string(&mut self, key: &str, text: &str) -> &mut Self {
        self.add_raw(key, &length_prefixed(text.as_bytes()))
    }

    pub fn add_int32(&mut self, key: &str, value: i32) -> &mut Self {
        self.add_raw(key, &value.to_le_bytes())
    }

    pub fn add_int64(&mut self, key: &str, value: i64) -> &mut Self {
        self.add_raw(key, &value.to_le_bytes())
    }

    pub fn add_f32(&mut self, key: &str, value: f32) -> &mut Self {
        self.add_raw(key, &value.to_le_bytes())
    }

    pub fn add_f64(&mut self, key: &str, value: f64) -> &mut Self {
        self.add_raw(key, &value.to_le_bytes())
    }

    pub fn add_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.add_raw(key, &[u8::from(value)])
    }

    /// Append bytes to the payload verbatim, outside any frame.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.payload.extend_from_slice(bytes);
        self
    }

    /// Override the length written into the header.
    pub fn declare_len(&mut self, len: i32) -> &mut Self {
        self.declared_len = Some(len);
        self
    }

    /// Current payload length, i.e. the offset the next frame would start
    /// at minus the 4-byte header.
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Header plus payload.
    ///
    /// # Panics
    ///
    /// Panics if the payload is longer than `i32::MAX` and no length was
    /// declared explicitly.
    pub fn build(&self) -> Vec<u8> {
        let declared = self.declared_len.unwrap_or_else(|| {
            i32::try_from(self.payload.len()).expect("payload exceeds i32::MAX")
        });
        let mut out = declared.to_le_bytes().to_vec();
        out.extend_from_slice(&self.payload);
        out
    }
}
