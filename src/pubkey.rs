//! secp256k1 helpers for the pay-to-pubkey special scripts.

use bitcoin::secp256k1::PublicKey;

use crate::error::CompressError;

/// Compressed SEC1 key length (prefix + X).
pub const COMPRESSED_KEY_SIZE: usize = 33;
/// Uncompressed SEC1 key length (prefix + X + Y).
pub const UNCOMPRESSED_KEY_SIZE: usize = 65;

/// True when `key` parses as a secp256k1 point, i.e. it is on the curve and not just
/// the right length with the right prefix.
pub fn is_fully_valid(key: &[u8]) -> bool {
    PublicKey::from_slice(key).is_ok()
}

/// Recovers the uncompressed key for the point with X-coordinate `x` and the given
/// Y parity.
pub fn decompress_point(x: &[u8; 32], odd: bool) -> Result<[u8; UNCOMPRESSED_KEY_SIZE], CompressError> {
    let mut compressed = [0u8; COMPRESSED_KEY_SIZE];
    compressed[0] = if odd { 0x03 } else { 0x02 };
    compressed[1..].copy_from_slice(x);
    PublicKey::from_slice(&compressed)
        .map(|key| key.serialize_uncompressed())
        .map_err(|_| CompressError::InvalidPublicKey)
}
