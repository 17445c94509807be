//! Flat byte-buffer helpers over a `&mut &[u8]` cursor.
//! Every read is bounds-checked up front; a failed read never advances the cursor.

use alloc::vec::Vec;

use crate::error::CompressError;

/// Appends `bytes` verbatim (no length prefix).
#[inline]
pub fn write_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    buf.extend_from_slice(bytes);
}

/// Borrows exactly `n` bytes from the front of `data` and advances past them.
#[inline]
pub fn read_bytes<'a>(data: &mut &'a [u8], n: usize) -> Result<&'a [u8], CompressError> {
    if data.len() < n {
        return Err(CompressError::IncompleteData);
    }
    let (head, tail) = data.split_at(n);
    *data = tail;
    Ok(head)
}

/// Reads a fixed-size array (special-script payloads).
#[inline]
pub fn read_array<const N: usize>(data: &mut &[u8]) -> Result<[u8; N], CompressError> {
    let mut out = [0u8; N];
    out.copy_from_slice(read_bytes(data, N)?);
    Ok(out)
}

/// Advances past `n` bytes without copying them.
#[inline]
pub fn skip(data: &mut &[u8], n: usize) -> Result<(), CompressError> {
    read_bytes(data, n).map(|_| ())
}
