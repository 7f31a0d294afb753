use std::path::PathBuf;

/// Errors from the file-reading entry points.
///
/// In-memory decoding never fails: framing problems stop the scan and are
/// reported through [`ScanOutcome`](crate::ScanOutcome) instead. Only the
/// file variant can fail, before any frame is read.
///
/// ```text
///   DecodeError
///   ├── NotFound          ← data path missing or not a regular file
///   ├── MalformedHeader   ← file shorter than the 4-byte length header
///   └── Io(std::io::Error) ← read failed after the file was found
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("MMKV data file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file is too small to hold the 4-byte payload length.
    #[error("malformed MMKV header: file is {len} bytes, need at least 4")]
    MalformedHeader { len: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
