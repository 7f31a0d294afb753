/// Errors raised when converting user-facing names into typed values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
  /// The name did not match any [`TypeHint`](crate::TypeHint) variant.
  #[error("unknown type hint {name:?} (expected one of: auto, string, int32, int64, float, double, bool, bytes)")]
  UnknownTypeHint { name: String },
}
