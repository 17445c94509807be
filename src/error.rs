// src/error.rs

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompressError {
    /// The data stream ended before a fixed-size payload or a declared script could be read.
    IncompleteData,

    /// A varint did not fit the width of the field it encodes.
    VarIntOverflow,

    /// A tag 4/5 payload is not the X-coordinate of a curve point.
    InvalidPublicKey,

    /// Bytes were left over after a whole-buffer decode (cursor desynchronization).
    TrailingData(usize),
}

// Manual implementation of Display for no_std environments.
impl core::fmt::Display for CompressError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IncompleteData => write!(f, "Incomplete compressed data"),
            Self::VarIntOverflow => write!(f, "VarInt too large for its field"),
            Self::InvalidPublicKey => {
                write!(f, "Compressed public key does not decompress to a curve point")
            }
            Self::TrailingData(n) => write!(f, "Trailing data: {} bytes left after parse", n),
        }
    }
}

// Enable standard Error trait if the "std" feature is on.
#[cfg(feature = "std")]
impl std::error::Error for CompressError {}
