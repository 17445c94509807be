//! Pluggable materialization of raw (non-special) scripts.
//!
//! The script decoder resolves the tag, applies the size limit and then hands the
//! cursor to a [`RawScriptLoader`] to produce the script body. Storage-layer callers
//! that only need the output value can pass [`SkipScript`] and never allocate.

use alloc::vec::Vec;

use bitcoin::ScriptBuf;

use crate::cursor::{read_bytes, skip};
use crate::error::CompressError;

/// Produces the script for a raw tag whose length is within the configured limit.
///
/// Implementations must leave `data` positioned exactly `len` bytes further on success.
pub trait RawScriptLoader {
    fn load(&mut self, data: &mut &[u8], len: usize) -> Result<ScriptBuf, CompressError>;
}

/// Default loader: allocate `len` bytes and copy them.
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyScript;

impl RawScriptLoader for CopyScript {
    fn load(&mut self, data: &mut &[u8], len: usize) -> Result<ScriptBuf, CompressError> {
        let bytes = read_bytes(data, len)?;
        let mut script = Vec::with_capacity(len);
        script.extend_from_slice(bytes);
        Ok(ScriptBuf::from_bytes(script))
    }
}

/// Skips raw script bodies and yields an empty script in their place.
/// The length of the most recently skipped body is kept for the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct SkipScript {
    skipped_len: Option<usize>,
}

impl SkipScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of the last script body skipped, if any.
    pub fn skipped_len(&self) -> Option<usize> {
        self.skipped_len
    }
}

impl RawScriptLoader for SkipScript {
    fn load(&mut self, data: &mut &[u8], len: usize) -> Result<ScriptBuf, CompressError> {
        skip(data, len)?;
        log::trace!("skipped raw script body of {} bytes", len);
        self.skipped_len = Some(len);
        Ok(ScriptBuf::new())
    }
}

impl<F> RawScriptLoader for F
where
    F: FnMut(&mut &[u8], usize) -> Result<ScriptBuf, CompressError>,
{
    fn load(&mut self, data: &mut &[u8], len: usize) -> Result<ScriptBuf, CompressError> {
        self(data, len)
    }
}
