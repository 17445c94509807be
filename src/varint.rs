//! MSB-first base-128 VarInt used by the compressed TxOut and coin records.
//! Not CompactSize: every continuation byte has bit 7 set and carries an implicit +1,
//! so each value has exactly one encoding.

use alloc::vec::Vec;

use crate::error::CompressError;

/// Longest encoding of a u64 (ceil(64 / 7)).
const MAX_VARINT_LEN: usize = 10;

/// Encodes `n` as VarInt and appends to `buf`.
/// 0–0x7F: 1 byte; 0x80–0x407F: 2 bytes; each further 7 bits adds a byte.
#[inline]
pub fn write_varint(buf: &mut Vec<u8>, mut n: u64) {
    let mut tmp = [0u8; MAX_VARINT_LEN];
    let mut len = 0;
    loop {
        tmp[len] = (n & 0x7f) as u8 | if len > 0 { 0x80 } else { 0x00 };
        if n <= 0x7f {
            break;
        }
        n = (n >> 7) - 1;
        len += 1;
    }
    // Most significant group first.
    buf.extend(tmp[..=len].iter().rev());
}

/// Number of bytes `write_varint` emits for `n`.
#[inline]
pub fn varint_len(mut n: u64) -> usize {
    let mut len = 1;
    while n > 0x7f {
        n = (n >> 7) - 1;
        len += 1;
    }
    len
}

/// Decodes a VarInt from the front of `data`, advancing the cursor.
#[inline]
pub fn read_varint(data: &mut &[u8]) -> Result<u64, CompressError> {
    read_varint_bounded(data, u64::MAX)
}

/// Decodes a VarInt that must fit in 32 bits (script tags, coin codes).
#[inline]
pub fn read_varint_u32(data: &mut &[u8]) -> Result<u32, CompressError> {
    // The bound guarantees the cast is lossless.
    read_varint_bounded(data, u32::MAX as u64).map(|n| n as u32)
}

/// Rejects any encoding whose value would exceed `max` before performing the shift,
/// so hostile input can never wrap the accumulator.
/// On error the cursor is left where it was.
fn read_varint_bounded(data: &mut &[u8], max: u64) -> Result<u64, CompressError> {
    let mut n: u64 = 0;
    let mut pos = 0;
    loop {
        let ch = *data.get(pos).ok_or(CompressError::IncompleteData)?;
        pos += 1;
        if n > (max >> 7) {
            return Err(CompressError::VarIntOverflow);
        }
        n = (n << 7) | (ch & 0x7f) as u64;
        if ch & 0x80 != 0 {
            if n == max {
                return Err(CompressError::VarIntOverflow);
            }
            n += 1;
        } else {
            *data = &data[pos..];
            return Ok(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn encode(n: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        write_varint(&mut buf, n);
        buf
    }

    #[test]
    fn known_encodings() {
        let vectors: &[(u64, &[u8])] = &[
            (0, &[0x00]),
            (0x7f, &[0x7f]),
            (0x80, &[0x80, 0x00]),
            (0x1234, &[0xa3, 0x34]),
            (0xffff, &[0x82, 0xfe, 0x7f]),
            (0x12_3456, &[0xc7, 0xe7, 0x56]),
            (0x8012_3456, &[0x86, 0xff, 0xc7, 0xe7, 0x56]),
            (0xffff_ffff, &[0x8e, 0xfe, 0xfe, 0xfe, 0x7f]),
            (
                u64::MAX,
                &[0x80, 0xfe, 0xfe, 0xfe, 0xfe, 0xfe, 0xfe, 0xfe, 0xfe, 0x7f],
            ),
        ];
        for (n, expected) in vectors {
            assert_eq!(encode(*n).as_slice(), *expected, "encoding of {:#x}", n);
            assert_eq!(varint_len(*n), expected.len(), "length of {:#x}", n);
            let mut cursor: &[u8] = expected;
            assert_eq!(read_varint(&mut cursor), Ok(*n));
            assert!(cursor.is_empty(), "cursor must stop after the varint");
        }
    }

    #[test]
    fn decode_leaves_following_bytes() {
        let mut cursor: &[u8] = &[0x80, 0x00, 0xaa, 0xbb];
        assert_eq!(read_varint(&mut cursor), Ok(0x80));
        assert_eq!(cursor, &[0xaa, 0xbb]);
    }

    #[test]
    fn truncated_input_is_incomplete() {
        let mut cursor: &[u8] = &[0x8e, 0xfe];
        assert_eq!(read_varint(&mut cursor), Err(CompressError::IncompleteData));
        assert_eq!(cursor.len(), 2, "cursor untouched on error");

        let mut empty: &[u8] = &[];
        assert_eq!(read_varint(&mut empty), Err(CompressError::IncompleteData));
    }

    #[test]
    fn u32_bound_is_enforced() {
        let max = encode(u32::MAX as u64);
        let mut cursor = max.as_slice();
        assert_eq!(read_varint_u32(&mut cursor), Ok(u32::MAX));

        let over = encode(u32::MAX as u64 + 1);
        let mut cursor = over.as_slice();
        assert_eq!(read_varint_u32(&mut cursor), Err(CompressError::VarIntOverflow));
    }

    #[test]
    fn u64_overflow_is_rejected() {
        // One more continuation group than u64::MAX needs.
        let mut cursor: &[u8] = &[0x80, 0x80, 0xfe, 0xfe, 0xfe, 0xfe, 0xfe, 0xfe, 0xfe, 0xfe, 0x7f];
        assert_eq!(read_varint(&mut cursor), Err(CompressError::VarIntOverflow));
    }
}
