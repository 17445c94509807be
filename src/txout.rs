//! Compact TxOut serialization: `VarInt(compress_amount(value)) || compressed script`.
//! Symmetric encode/decode over `Vec<u8>` sinks and `&mut &[u8]` cursors.

use alloc::vec::Vec;

use bitcoin::{Amount, TxOut};

use crate::amount::{compress_amount, decompress_amount};
use crate::config::CompressorConfig;
use crate::error::CompressError;
use crate::loader::{CopyScript, RawScriptLoader};
use crate::script::{CompressedScript, ScriptCompressor};
use crate::varint::{read_varint, varint_len, write_varint};

/// The TxOut codec.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TxOutCompressor {
    scripts: ScriptCompressor,
}

impl TxOutCompressor {
    pub const fn new(config: CompressorConfig) -> Self {
        Self {
            scripts: ScriptCompressor::new(config),
        }
    }

    pub const fn config(&self) -> &CompressorConfig {
        self.scripts.config()
    }

    /// Appends the compact form of `txout` to `out`.
    pub fn encode(&self, txout: &TxOut, out: &mut Vec<u8>) {
        write_varint(out, compress_amount(txout.value.to_sat()));
        self.scripts.encode(&txout.script_pubkey, out);
    }

    /// Decodes one TxOut from the front of `data`, copying raw script bodies.
    pub fn decode(&self, data: &mut &[u8]) -> Result<TxOut, CompressError> {
        self.decode_with(data, &mut CopyScript)
    }

    /// Decodes one TxOut, handing raw script bodies to `loader`.
    pub fn decode_with<L>(&self, data: &mut &[u8], loader: &mut L) -> Result<TxOut, CompressError>
    where
        L: RawScriptLoader + ?Sized,
    {
        let value = decompress_amount(read_varint(data)?);
        let script_pubkey = self.scripts.decode_with(data, loader)?;
        Ok(TxOut {
            value: Amount::from_sat(value),
            script_pubkey,
        })
    }

    /// Encodes `txout` into a fresh buffer.
    pub fn serialize(&self, txout: &TxOut) -> Vec<u8> {
        let mut out = Vec::with_capacity(compressed_size(txout));
        self.encode(txout, &mut out);
        out
    }

    /// Decodes a buffer holding exactly one compressed TxOut.
    pub fn deserialize(&self, mut data: &[u8]) -> Result<TxOut, CompressError> {
        let txout = self.decode(&mut data)?;
        if !data.is_empty() {
            return Err(CompressError::TrailingData(data.len()));
        }
        Ok(txout)
    }
}

/// Exact length of the compact encoding of `txout`.
pub fn compressed_size(txout: &TxOut) -> usize {
    varint_len(compress_amount(txout.value.to_sat()))
        + CompressedScript::from_script(&txout.script_pubkey).encoded_len()
}
