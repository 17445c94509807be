//! UTXO-set record: an unspent output with the height and coinbase flag of the
//! transaction that created it.
//!
//! Wire format: `VarInt(height * 2 + is_coinbase) || compressed TxOut`.

use alloc::vec::Vec;

use bitcoin::TxOut;

use crate::config::CompressorConfig;
use crate::error::CompressError;
use crate::loader::{CopyScript, RawScriptLoader};
use crate::txout::{compressed_size, TxOutCompressor};
use crate::varint::{read_varint_u32, varint_len, write_varint};

/// Highest height representable in the 32-bit code (one bit goes to the coinbase flag).
pub const MAX_COIN_HEIGHT: u32 = u32::MAX >> 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    pub output: TxOut,
    /// Only the low 31 bits are stored; see [`MAX_COIN_HEIGHT`].
    pub height: u32,
    pub is_coinbase: bool,
}

impl Coin {
    pub fn new(output: TxOut, height: u32, is_coinbase: bool) -> Self {
        Self {
            output,
            height,
            is_coinbase,
        }
    }

    fn code(&self) -> u32 {
        ((self.height & MAX_COIN_HEIGHT) << 1) | u32::from(self.is_coinbase)
    }

    pub fn encode(&self, out: &mut Vec<u8>) {
        write_varint(out, self.code().into());
        // The script limit only affects decoding.
        TxOutCompressor::default().encode(&self.output, out);
    }

    pub fn encoded_len(&self) -> usize {
        varint_len(self.code().into()) + compressed_size(&self.output)
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode(&mut out);
        out
    }

    pub fn decode(data: &mut &[u8], config: CompressorConfig) -> Result<Self, CompressError> {
        Self::decode_with(data, config, &mut CopyScript)
    }

    /// Decodes a coin, handing raw script bodies to `loader` (e.g. [`crate::SkipScript`]
    /// for scans that only need values and heights).
    pub fn decode_with<L>(
        data: &mut &[u8],
        config: CompressorConfig,
        loader: &mut L,
    ) -> Result<Self, CompressError>
    where
        L: RawScriptLoader + ?Sized,
    {
        let code = read_varint_u32(data)?;
        let output = TxOutCompressor::new(config).decode_with(data, loader)?;
        Ok(Self {
            output,
            height: code >> 1,
            is_coinbase: code & 1 == 1,
        })
    }
}
