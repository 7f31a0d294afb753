use mmkv_types::TypeHint;

use crate::render::DEFAULT_HEX_PREVIEW_LIMIT;

/// Configuration for a decode call.
///
/// ```text
/// ┌───────────────────┬──────────────────────────────────────────────┐
/// │ Field             │ Purpose                                      │
/// ├───────────────────┼──────────────────────────────────────────────┤
/// │ type_hint         │ Auto heuristics, or force one rendering      │
/// │ hex_preview_limit │ Bytes shown in a hex rendering before "..."  │
/// └───────────────────┴──────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub type_hint: TypeHint,
    pub hex_preview_limit: usize,
}

impl DecoderConfig {
    /// Default configuration with the given type hint.
    pub fn with_hint(type_hint: TypeHint) -> Self {
        Self {
            type_hint,
            ..Self::default()
        }
    }
}

impl Default for DecoderConfig {
    /// Auto detection, 100-byte hex previews.
    fn default() -> Self {
        Self {
            type_hint: TypeHint::Auto,
            hex_preview_limit: DEFAULT_HEX_PREVIEW_LIMIT,
        }
    }
}
