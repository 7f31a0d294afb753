use std::fs;
use std::path::Path;

use mmkv_types::{Entry, TypeHint};
use mmkv_wire::WireError;
use mmkv_wire::header::{DumpHeader, HEADER_SIZE};
use mmkv_wire::kv_frame::KvFrame;
use mmkv_wire::reader::FrameReader;
use tracing::{debug, trace};

use crate::classifier::Classifier;
use crate::config::DecoderConfig;
use crate::error::DecodeError;

/// How a scan over the payload region ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The cursor reached the clamped end of the declared payload.
    Complete { offset: usize },

    /// A frame at `offset` could not be read. Entries before it were kept;
    /// nothing at or after it was decoded.
    Stopped { offset: usize, reason: WireError },
}

impl ScanOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// Offset at which the scan ended.
    pub fn offset(&self) -> usize {
        match self {
            Self::Complete { offset } | Self::Stopped { offset, .. } => *offset,
        }
    }
}

/// The result of scanning an MMKV dump.
///
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │ DecodedDump                                          │
/// │   header:      Option<DumpHeader> ← None if < 4 B    │
/// │   payload_end: usize              ← clamped bound    │
/// │   entries:     Vec<Entry>         ← wire order       │
/// │   outcome:     ScanOutcome        ← why it stopped   │
/// └──────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedDump {
    pub header: Option<DumpHeader>,
    pub payload_end: usize,
    pub entries: Vec<Entry>,
    pub outcome: ScanOutcome,
}

/// Synchronous MMKV dump decoder.
///
/// Decoding proceeds in three steps:
///
///   1. **Header**: read the 4-byte little-endian payload length and clamp
///      it to the bytes actually present.
///   2. **Frames**: walk `[varint key_len][key][varint value_len][value]`
///      records until the cursor reaches the clamped payload end.
///   3. **Values**: classify each value slice into a rendering and a
///      [`TypeLabel`](mmkv_types::TypeLabel).
///
/// The first frame that cannot be read ends the scan. Entries decoded up to
/// that point are returned; later frames are not attempted, even if they
/// would be well formed. A value that cannot be rendered the requested way
/// degrades to a hex rendering for that entry only.
///
/// The decoder holds no state. Every call owns its own cursor, so calls on
/// different buffers can run concurrently.
///
/// # Example
///
/// ```rust
/// use mmkv_decoder::MmkvDecoder;
/// use mmkv_types::{TypeHint, TypeLabel};
///
/// // declared 7 bytes: key "n" → value 2A 00 00 00
/// let dump = [0x07, 0, 0, 0, 0x01, b'n', 0x04, 0x2A, 0x00, 0x00, 0x00];
/// let entries = MmkvDecoder::decode_buffer(&dump, TypeHint::Auto);
///
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].rendered_value, "42");
/// assert_eq!(entries[0].type_label, TypeLabel::Int32);
/// ```
pub struct MmkvDecoder;

impl MmkvDecoder {
    /// Decode an in-memory dump into its entries.
    ///
    /// Never fails: a buffer shorter than the header yields no entries, and
    /// malformed framing truncates the result.
    pub fn decode_buffer(buf: &[u8], hint: TypeHint) -> Vec<Entry> {
        Self::decode(buf, &DecoderConfig::with_hint(hint)).entries
    }

    /// Decode an in-memory dump and report how the scan ended.
    pub fn decode(buf: &[u8], config: &DecoderConfig) -> DecodedDump {
        let Ok((mut reader, header)) = FrameReader::new(buf) else {
            debug!(len = buf.len(), "buffer shorter than header; nothing to decode");
            return DecodedDump {
                header: None,
                payload_end: 0,
                entries: Vec::new(),
                outcome: ScanOutcome::Complete { offset: 0 },
            };
        };

        if header.is_clamped(buf.len()) {
            debug!(
                declared = header.declared_len,
                available = buf.len() - HEADER_SIZE,
                "header overstates payload length; clamping"
            );
        }

        let classifier = Classifier::new(config.hex_preview_limit);
        let mut entries = Vec::new();

        let outcome = loop {
            if !reader.has_remaining() {
                break ScanOutcome::Complete {
                    offset: reader.position(),
                };
            }

            let offset = reader.position();
            match reader.next_frame() {
                Ok(frame) => {
                    let entry =
                        Self::decode_entry(entries.len(), frame, config.type_hint, classifier);
                    entries.push(entry);
                }
                Err(reason) => {
                    debug!(
                        offset,
                        %reason,
                        decoded = entries.len(),
                        "malformed frame; stopping scan"
                    );
                    break ScanOutcome::Stopped { offset, reason };
                }
            }
        };

        DecodedDump {
            header: Some(header),
            payload_end: reader.payload_end(),
            entries,
            outcome,
        }
    }

    /// Read and decode an MMKV data file.
    ///
    /// `checksum_path` names the companion `.crc` file. It is accepted so
    /// callers can pass what they have, but its contents are never read.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::NotFound`] if `path` is not an existing file.
    /// - [`DecodeError::MalformedHeader`] if the file is shorter than 4 bytes.
    /// - [`DecodeError::Io`] if reading the file fails.
    pub fn decode_file(
        path: impl AsRef<Path>,
        checksum_path: Option<&Path>,
        hint: TypeHint,
    ) -> Result<Vec<Entry>, DecodeError> {
        Self::decode_file_with_config(path, checksum_path, &DecoderConfig::with_hint(hint))
            .map(|dump| dump.entries)
    }

    /// Same as [`decode_file`](Self::decode_file), returning the full
    /// [`DecodedDump`].
    ///
    /// # Errors
    ///
    /// See [`decode_file`](Self::decode_file).
    pub fn decode_file_with_config(
        path: impl AsRef<Path>,
        checksum_path: Option<&Path>,
        config: &DecoderConfig,
    ) -> Result<DecodedDump, DecodeError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DecodeError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path)?;

        if let Some(checksum) = checksum_path
            && checksum.is_file()
        {
            debug!(checksum = %checksum.display(), "checksum file supplied; not verified");
        }

        if bytes.len() < HEADER_SIZE {
            return Err(DecodeError::MalformedHeader { len: bytes.len() });
        }

        debug!(path = %path.display(), len = bytes.len(), "decoding MMKV file");
        Ok(Self::decode(&bytes, config))
    }

    fn decode_entry(
        index: usize,
        frame: KvFrame<'_>,
        hint: TypeHint,
        classifier: Classifier,
    ) -> Entry {
        let classified = classifier.classify(frame.value, hint);
        let entry = Entry {
            index,
            key: String::from_utf8_lossy(frame.key).into_owned(),
            rendered_value: classified.rendered,
            type_label: classified.label,
            raw_length: frame.value.len(),
        };
        trace!(
            index,
            key = %entry.key,
            label = %entry.type_label,
            raw_length = entry.raw_length,
            "decoded entry"
        );
        entry
    }
}
