//! Shared test helpers: logging setup and standard script builders.
#![allow(dead_code)]

use bitcoin::ScriptBuf;

pub const COIN: u64 = 100_000_000;

/// X-coordinate of the secp256k1 generator.
pub const G_X_HEX: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
/// Y-coordinate of G (even).
pub const G_Y_HEX: &str = "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";
/// Y-coordinate of -G (odd).
pub const NEG_G_Y_HEX: &str = "b7c52588d95c3b9aa25b0403f1eef75702e84bb7597aabe663b82f6f04ef2777";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn p2pkh(hash: &[u8; 20]) -> ScriptBuf {
    let mut s = vec![0x76, 0xa9, 0x14];
    s.extend_from_slice(hash);
    s.extend_from_slice(&[0x88, 0xac]);
    ScriptBuf::from_bytes(s)
}

pub fn p2sh(hash: &[u8; 20]) -> ScriptBuf {
    let mut s = vec![0xa9, 0x14];
    s.extend_from_slice(hash);
    s.push(0x87);
    ScriptBuf::from_bytes(s)
}

/// `<key> OP_CHECKSIG` for a 33- or 65-byte key.
pub fn p2pk(key: &[u8]) -> ScriptBuf {
    let mut s = vec![key.len() as u8];
    s.extend_from_slice(key);
    s.push(0xac);
    ScriptBuf::from_bytes(s)
}

pub fn uncompressed_key(y_hex: &str) -> Vec<u8> {
    let mut key = vec![0x04];
    key.extend(hex::decode(G_X_HEX).expect("x hex"));
    key.extend(hex::decode(y_hex).expect("y hex"));
    key
}

pub fn compressed_key(prefix: u8) -> Vec<u8> {
    let mut key = vec![prefix];
    key.extend(hex::decode(G_X_HEX).expect("x hex"));
    key
}
