use std::fmt;

use serde::Serialize;

// ── TypeLabel ─────────────────────────────────────────────────────────

/// Which classifier branch produced an entry's rendering.
///
/// This is a statement about how the bytes were read, not about the type
/// the writer originally stored. A 4-byte float that happens to look like
/// a small integer will be labelled `Int32`.
///
/// ```text
/// ┌─────────┬──────────────────────────────────────────────┐
/// │ Label   │ Produced by                                  │
/// ├─────────┼──────────────────────────────────────────────┤
/// │ Empty   │ zero-length value, any hint                  │
/// │ String  │ prefixed or plain UTF-8 text                 │
/// │ Int32   │ 4-byte LE integer, or forced hint            │
/// │ Int64   │ 8-byte LE integer, or forced hint            │
/// │ Float   │ forced hint only                             │
/// │ Double  │ forced hint only                             │
/// │ Bool    │ single 0x00/0x01 byte, or forced hint        │
/// │ Varint  │ whole value is exactly one varint            │
/// │ Bytes   │ hex fallback                                 │
/// └─────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TypeLabel {
  Empty,
  String,
  Int32,
  Int64,
  Float,
  Double,
  Bool,
  Varint,
  Bytes,
}

impl TypeLabel {
  /// Every label, in declaration order.
  pub const ALL: [Self; 9] = [
    Self::Empty,
    Self::String,
    Self::Int32,
    Self::Int64,
    Self::Float,
    Self::Double,
    Self::Bool,
    Self::Varint,
    Self::Bytes,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Empty => "Empty",
      Self::String => "String",
      Self::Int32 => "Int32",
      Self::Int64 => "Int64",
      Self::Float => "Float",
      Self::Double => "Double",
      Self::Bool => "Bool",
      Self::Varint => "Varint",
      Self::Bytes => "Bytes",
    }
  }
}

impl fmt::Display for TypeLabel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ── Entry ─────────────────────────────────────────────────────────────

/// One decoded key/value record.
///
/// Entries are produced in wire order and handed to the caller as an
/// owned `Vec`; the decoder keeps nothing after returning them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Entry {
  /// 0-based position among the entries that decoded successfully.
  pub index: usize,

  /// Key bytes read as UTF-8; invalid sequences become U+FFFD.
  pub key: String,

  /// Human-readable rendering of the value.
  pub rendered_value: String,

  pub type_label: TypeLabel,

  /// Length of the raw value slice before classification.
  pub raw_length: usize,
}
