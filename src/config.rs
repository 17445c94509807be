// src/config.rs

/// Number of tags reserved for special scripts; raw script lengths are shifted past them.
pub const NUM_SPECIAL_SCRIPTS: u32 = 6;

/// Script Size Limits (DoS Protection)
pub const MAX_SCRIPT_SIZE_BEFORE_GENESIS: u64 = 10_000;
pub const MAX_SCRIPT_SIZE_AFTER_GENESIS: u64 = u32::MAX as u64;

/// Decoder configuration.
///
/// A raw script whose declared length exceeds `max_script_size` is never materialized:
/// the decoder substitutes an always-failing placeholder and skips the declared bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressorConfig {
    pub max_script_size: u64,
}

impl CompressorConfig {
    pub const fn with_max_script_size(max_script_size: u64) -> Self {
        Self { max_script_size }
    }

    /// Limits in force before the Genesis activation.
    pub const fn before_genesis() -> Self {
        Self::with_max_script_size(MAX_SCRIPT_SIZE_BEFORE_GENESIS)
    }

    pub const fn is_oversized(&self, script_len: u64) -> bool {
        script_len > self.max_script_size
    }
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self::with_max_script_size(MAX_SCRIPT_SIZE_AFTER_GENESIS)
    }
}
