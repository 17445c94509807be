//! Compact script encoding.
//!
//! Six script shapes get a one-byte tag and a fixed payload; everything else is stored
//! verbatim behind a tag of `len + 6`:
//!
//! | tag  | script                                   | payload          |
//! |------|------------------------------------------|------------------|
//! | 0    | `DUP HASH160 <20> EQUALVERIFY CHECKSIG`  | key hash (20)    |
//! | 1    | `HASH160 <20> EQUAL`                     | script hash (20) |
//! | 2, 3 | `<02/03 X> CHECKSIG`                     | X (32)           |
//! | 4, 5 | `<04 X Y> CHECKSIG`, tag 4 + Y parity    | X (32)           |
//! | 6+   | anything else                            | raw (tag - 6)    |
//!
//! The tag is a VarInt, so raw scripts up to 121 bytes cost one byte of overhead.

use alloc::vec::Vec;

use bitcoin::opcodes::all::{
    OP_CHECKSIG, OP_DUP, OP_EQUAL, OP_EQUALVERIFY, OP_HASH160, OP_PUSHBYTES_0, OP_PUSHBYTES_20,
    OP_PUSHBYTES_33, OP_PUSHBYTES_65, OP_RETURN,
};
use bitcoin::{Script, ScriptBuf};

use crate::config::{CompressorConfig, NUM_SPECIAL_SCRIPTS};
use crate::cursor::{read_bytes, skip, write_bytes};
use crate::error::CompressError;
use crate::loader::{CopyScript, RawScriptLoader};
use crate::pubkey::{
    decompress_point, is_fully_valid, COMPRESSED_KEY_SIZE, UNCOMPRESSED_KEY_SIZE,
};
use crate::varint::{read_varint_u32, varint_len, write_varint};

pub const TAG_KEY_HASH: u32 = 0x00;
pub const TAG_SCRIPT_HASH: u32 = 0x01;
pub const TAG_PUBKEY_EVEN: u32 = 0x02;
pub const TAG_PUBKEY_ODD: u32 = 0x03;
pub const TAG_UNCOMPRESSED_EVEN: u32 = 0x04;
pub const TAG_UNCOMPRESSED_ODD: u32 = 0x05;

/// Substituted for raw scripts over the configured size limit: `OP_FALSE OP_RETURN`.
pub const OVERSIZED_SCRIPT_PLACEHOLDER: [u8; 2] = [OP_PUSHBYTES_0.to_u8(), OP_RETURN.to_u8()];

const DUP: u8 = OP_DUP.to_u8();
const HASH160: u8 = OP_HASH160.to_u8();
const EQUAL: u8 = OP_EQUAL.to_u8();
const EQUALVERIFY: u8 = OP_EQUALVERIFY.to_u8();
const CHECKSIG: u8 = OP_CHECKSIG.to_u8();
const PUSH20: u8 = OP_PUSHBYTES_20.to_u8();
const PUSH33: u8 = OP_PUSHBYTES_33.to_u8();
const PUSH65: u8 = OP_PUSHBYTES_65.to_u8();

const P2PKH_LEN: usize = 25;
const P2SH_LEN: usize = 23;
const P2PK_COMPRESSED_LEN: usize = COMPRESSED_KEY_SIZE + 2;
const P2PK_UNCOMPRESSED_LEN: usize = UNCOMPRESSED_KEY_SIZE + 2;

/// Wire form of a script: one of the six special shapes or a borrowed raw copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressedScript<'a> {
    /// Tag 0: pay-to-pubkey-hash.
    KeyHash([u8; 20]),
    /// Tag 1: pay-to-script-hash.
    ScriptHash([u8; 20]),
    /// Tag 2: pay-to-pubkey, compressed key with prefix 0x02.
    PubKeyEven([u8; 32]),
    /// Tag 3: pay-to-pubkey, compressed key with prefix 0x03.
    PubKeyOdd([u8; 32]),
    /// Tag 4: pay-to-pubkey, uncompressed key with even Y. Only X is kept.
    UncompressedPubKeyEven([u8; 32]),
    /// Tag 5: pay-to-pubkey, uncompressed key with odd Y. Only X is kept.
    UncompressedPubKeyOdd([u8; 32]),
    /// Tag `len + 6`: verbatim script bytes.
    Raw(&'a [u8]),
}

/// Payload size for a special tag; 0 for raw tags.
pub const fn special_size(tag: u32) -> usize {
    match tag {
        TAG_KEY_HASH | TAG_SCRIPT_HASH => 20,
        TAG_PUBKEY_EVEN..=TAG_UNCOMPRESSED_ODD => 32,
        _ => 0,
    }
}

/// Matches `script` against the special shapes in priority order
/// (key hash, script hash, pubkey). `None` means it must be stored raw.
pub fn try_compress(script: &Script) -> Option<CompressedScript<'static>> {
    let bytes = script.as_bytes();
    if let Some(hash) = key_hash(bytes) {
        return Some(CompressedScript::KeyHash(hash));
    }
    if let Some(hash) = script_hash(bytes) {
        return Some(CompressedScript::ScriptHash(hash));
    }
    pubkey(bytes)
}

fn key_hash(script: &[u8]) -> Option<[u8; 20]> {
    match script {
        [DUP, HASH160, PUSH20, hash @ .., EQUALVERIFY, CHECKSIG] if script.len() == P2PKH_LEN => {
            hash.try_into().ok()
        }
        _ => None,
    }
}

fn script_hash(script: &[u8]) -> Option<[u8; 20]> {
    match script {
        [HASH160, PUSH20, hash @ .., EQUAL] if script.len() == P2SH_LEN => hash.try_into().ok(),
        _ => None,
    }
}

/// Keys that do not parse as curve points cannot be rebuilt from X alone, so they are
/// left for the raw path.
fn pubkey(script: &[u8]) -> Option<CompressedScript<'static>> {
    match script {
        [PUSH33, key @ .., CHECKSIG]
            if script.len() == P2PK_COMPRESSED_LEN && matches!(key[0], 0x02 | 0x03) =>
        {
            if !is_fully_valid(key) {
                return None;
            }
            let x: [u8; 32] = key[1..].try_into().ok()?;
            Some(if key[0] == 0x02 {
                CompressedScript::PubKeyEven(x)
            } else {
                CompressedScript::PubKeyOdd(x)
            })
        }
        [PUSH65, key @ .., CHECKSIG]
            if script.len() == P2PK_UNCOMPRESSED_LEN && key[0] == 0x04 =>
        {
            if !is_fully_valid(key) {
                return None;
            }
            let x: [u8; 32] = key[1..33].try_into().ok()?;
            Some(if key[UNCOMPRESSED_KEY_SIZE - 1] & 1 == 0 {
                CompressedScript::UncompressedPubKeyEven(x)
            } else {
                CompressedScript::UncompressedPubKeyOdd(x)
            })
        }
        _ => None,
    }
}

impl<'a> CompressedScript<'a> {
    /// Special form when one matches, raw otherwise.
    pub fn from_script(script: &'a Script) -> Self {
        try_compress(script).unwrap_or(CompressedScript::Raw(script.as_bytes()))
    }

    /// Rebuilds the wire form from a tag and its payload. Special tags require a payload
    /// of exactly [`special_size`] bytes; raw tags require `tag - 6` bytes.
    pub fn from_parts(tag: u32, payload: &'a [u8]) -> Result<Self, CompressError> {
        if tag >= NUM_SPECIAL_SCRIPTS {
            if payload.len() as u64 != u64::from(tag - NUM_SPECIAL_SCRIPTS) {
                return Err(CompressError::IncompleteData);
            }
            return Ok(CompressedScript::Raw(payload));
        }
        Ok(match tag {
            TAG_KEY_HASH => CompressedScript::KeyHash(fixed(payload)?),
            TAG_SCRIPT_HASH => CompressedScript::ScriptHash(fixed(payload)?),
            TAG_PUBKEY_EVEN => CompressedScript::PubKeyEven(fixed(payload)?),
            TAG_PUBKEY_ODD => CompressedScript::PubKeyOdd(fixed(payload)?),
            TAG_UNCOMPRESSED_EVEN => CompressedScript::UncompressedPubKeyEven(fixed(payload)?),
            _ => CompressedScript::UncompressedPubKeyOdd(fixed(payload)?),
        })
    }

    /// VarInt tag value. Raw lengths are shifted by the number of special tags.
    pub fn tag(&self) -> u64 {
        match self {
            CompressedScript::KeyHash(_) => TAG_KEY_HASH.into(),
            CompressedScript::ScriptHash(_) => TAG_SCRIPT_HASH.into(),
            CompressedScript::PubKeyEven(_) => TAG_PUBKEY_EVEN.into(),
            CompressedScript::PubKeyOdd(_) => TAG_PUBKEY_ODD.into(),
            CompressedScript::UncompressedPubKeyEven(_) => TAG_UNCOMPRESSED_EVEN.into(),
            CompressedScript::UncompressedPubKeyOdd(_) => TAG_UNCOMPRESSED_ODD.into(),
            CompressedScript::Raw(bytes) => bytes.len() as u64 + u64::from(NUM_SPECIAL_SCRIPTS),
        }
    }

    /// Bytes written after the tag.
    pub fn payload(&self) -> &[u8] {
        match self {
            CompressedScript::KeyHash(hash) | CompressedScript::ScriptHash(hash) => &hash[..],
            CompressedScript::PubKeyEven(x)
            | CompressedScript::PubKeyOdd(x)
            | CompressedScript::UncompressedPubKeyEven(x)
            | CompressedScript::UncompressedPubKeyOdd(x) => &x[..],
            CompressedScript::Raw(bytes) => *bytes,
        }
    }

    pub fn is_special(&self) -> bool {
        !matches!(self, CompressedScript::Raw(_))
    }

    /// Appends `VarInt(tag) || payload` to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        write_varint(out, self.tag());
        write_bytes(out, self.payload());
    }

    pub fn encoded_len(&self) -> usize {
        varint_len(self.tag()) + self.payload().len()
    }

    /// Expands back to the full script. Tags 4/5 go through point decompression and fail
    /// with [`CompressError::InvalidPublicKey`] if X is not on the curve.
    pub fn to_script(&self) -> Result<ScriptBuf, CompressError> {
        let mut script = Vec::new();
        match self {
            CompressedScript::KeyHash(hash) => {
                script.reserve_exact(P2PKH_LEN);
                script.extend_from_slice(&[DUP, HASH160, PUSH20]);
                script.extend_from_slice(hash);
                script.extend_from_slice(&[EQUALVERIFY, CHECKSIG]);
            }
            CompressedScript::ScriptHash(hash) => {
                script.reserve_exact(P2SH_LEN);
                script.extend_from_slice(&[HASH160, PUSH20]);
                script.extend_from_slice(hash);
                script.push(EQUAL);
            }
            CompressedScript::PubKeyEven(x) | CompressedScript::PubKeyOdd(x) => {
                let prefix = if matches!(self, CompressedScript::PubKeyEven(_)) {
                    0x02
                } else {
                    0x03
                };
                script.reserve_exact(P2PK_COMPRESSED_LEN);
                script.extend_from_slice(&[PUSH33, prefix]);
                script.extend_from_slice(x);
                script.push(CHECKSIG);
            }
            CompressedScript::UncompressedPubKeyEven(x)
            | CompressedScript::UncompressedPubKeyOdd(x) => {
                let odd = matches!(self, CompressedScript::UncompressedPubKeyOdd(_));
                let key = decompress_point(x, odd).map_err(|e| {
                    log::debug!("tag {} payload is not a curve X-coordinate", self.tag());
                    e
                })?;
                script.reserve_exact(P2PK_UNCOMPRESSED_LEN);
                script.push(PUSH65);
                script.extend_from_slice(&key);
                script.push(CHECKSIG);
            }
            CompressedScript::Raw(bytes) => script.extend_from_slice(bytes),
        }
        Ok(ScriptBuf::from_bytes(script))
    }
}

fn fixed<const N: usize>(payload: &[u8]) -> Result<[u8; N], CompressError> {
    payload.try_into().map_err(|_| CompressError::IncompleteData)
}

/// Expands a tag and its payload into the script it stands for.
pub fn decompress_script(tag: u32, payload: &[u8]) -> Result<ScriptBuf, CompressError> {
    CompressedScript::from_parts(tag, payload)?.to_script()
}

/// Appends the compact encoding of `script` to `out`.
pub fn compress_script(script: &Script, out: &mut Vec<u8>) {
    CompressedScript::from_script(script).encode(out)
}

/// Script codec bound to a decoder configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScriptCompressor {
    config: CompressorConfig,
}

impl ScriptCompressor {
    pub const fn new(config: CompressorConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &CompressorConfig {
        &self.config
    }

    pub fn encode(&self, script: &Script, out: &mut Vec<u8>) {
        compress_script(script, out)
    }

    /// Decodes one script, copying raw bodies.
    pub fn decode(&self, data: &mut &[u8]) -> Result<ScriptBuf, CompressError> {
        self.decode_with(data, &mut CopyScript)
    }

    /// Decodes one script, handing raw bodies within the size limit to `loader`.
    ///
    /// On success the cursor sits on the first byte after the script, including when an
    /// oversized body was replaced by [`OVERSIZED_SCRIPT_PLACEHOLDER`].
    pub fn decode_with<L>(
        &self,
        data: &mut &[u8],
        loader: &mut L,
    ) -> Result<ScriptBuf, CompressError>
    where
        L: RawScriptLoader + ?Sized,
    {
        let tag = read_varint_u32(data)?;
        if tag < NUM_SPECIAL_SCRIPTS {
            let payload = read_bytes(data, special_size(tag))?;
            return decompress_script(tag, payload);
        }

        let declared = u64::from(tag - NUM_SPECIAL_SCRIPTS);
        // A length that does not fit in memory cannot be backed by the buffer either.
        let len = usize::try_from(declared).map_err(|_| CompressError::IncompleteData)?;
        if self.config.is_oversized(declared) {
            log::debug!(
                "raw script of {} bytes exceeds limit {}, substituting placeholder",
                declared,
                self.config.max_script_size
            );
            skip(data, len)?;
            return Ok(ScriptBuf::from_bytes(OVERSIZED_SCRIPT_PLACEHOLDER.to_vec()));
        }
        loader.load(data, len)
    }
}
