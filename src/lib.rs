#![no_std]

#[cfg(feature = "std")]
extern crate std;

// Needed for Vec
extern crate alloc;

pub mod amount;
pub mod coin;
pub mod config;
pub mod cursor;
pub mod error;
pub mod loader;
pub mod pubkey;
pub mod script;
pub mod txout;
pub mod varint;

pub use amount::{compress_amount, decompress_amount};
pub use coin::Coin;
pub use config::CompressorConfig;
pub use error::CompressError;
pub use loader::{CopyScript, RawScriptLoader, SkipScript};
pub use script::{
    compress_script, decompress_script, special_size, try_compress, CompressedScript,
    ScriptCompressor,
};
pub use txout::{compressed_size, TxOutCompressor};
