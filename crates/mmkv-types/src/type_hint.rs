use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// Caller-supplied hint that forces the classifier down one branch.
///
/// `Auto` runs the heuristic rules; every other variant skips them and
/// renders the value with the matching fixed rule. An empty value is still
/// reported as `Empty` whatever the hint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TypeHint {
  #[default]
  Auto,
  String,
  Int32,
  Int64,
  Float,
  Double,
  Bool,
  Bytes,
}

impl TypeHint {
  /// Every hint, in the order a picker should offer them.
  pub const ALL: [Self; 8] = [
    Self::Auto,
    Self::String,
    Self::Int32,
    Self::Int64,
    Self::Float,
    Self::Double,
    Self::Bool,
    Self::Bytes,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "Auto",
      Self::String => "String",
      Self::Int32 => "Int32",
      Self::Int64 => "Int64",
      Self::Float => "Float",
      Self::Double => "Double",
      Self::Bool => "Bool",
      Self::Bytes => "Bytes",
    }
  }
}

impl fmt::Display for TypeHint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for TypeHint {
  type Err = TypeError;

  /// Parse a hint name, ignoring ASCII case.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|hint| hint.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| TypeError::UnknownTypeHint {
        name: s.to_string(),
      })
  }
}
