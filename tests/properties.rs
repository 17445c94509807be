//! Property tests for the amount transform and the script/TxOut codec.

mod common;

use bitcoin::{Amount, ScriptBuf, TxOut};
use proptest::prelude::*;

use common::p2pkh;
use txcompress::{
    compress_amount, compressed_size, decompress_amount, try_compress, CompressedScript,
    CompressorConfig, ScriptCompressor, TxOutCompressor,
};

/// Amounts with a bias towards trailing decimal zeros, like real outputs.
fn round_amount() -> impl Strategy<Value = u64> {
    (1u64..=21_000_000, 0u32..=8).prop_map(|(base, zeros)| base * 10u64.pow(zeros))
}

proptest! {
    #[test]
    fn amount_round_trip(amount in 0u64..=Amount::MAX_MONEY.to_sat()) {
        prop_assert_eq!(decompress_amount(compress_amount(amount)), amount);
    }

    #[test]
    fn round_amount_round_trip(amount in round_amount()) {
        prop_assert_eq!(decompress_amount(compress_amount(amount)), amount);
    }

    #[test]
    fn compressed_values_are_canonical(compressed in 0u64..=u32::MAX as u64) {
        prop_assert_eq!(compress_amount(decompress_amount(compressed)), compressed);
    }

    #[test]
    fn arbitrary_scripts_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..600)) {
        let script = ScriptBuf::from_bytes(bytes);
        let compressor = ScriptCompressor::default();
        let mut encoded = Vec::new();
        compressor.encode(&script, &mut encoded);

        let form = CompressedScript::from_script(&script);
        if !form.is_special() {
            prop_assert_eq!(form.tag(), script.len() as u64 + 6);
        }

        let mut cursor = encoded.as_slice();
        let decoded = compressor.decode(&mut cursor).expect("decode");
        prop_assert!(cursor.is_empty());
        prop_assert_eq!(decoded.as_bytes(), script.as_bytes());
    }

    #[test]
    fn key_hash_outputs_round_trip(
        hash in proptest::array::uniform20(any::<u8>()),
        value in 0u64..=Amount::MAX_MONEY.to_sat(),
    ) {
        let txout = TxOut { value: Amount::from_sat(value), script_pubkey: p2pkh(&hash) };
        prop_assert!(try_compress(&txout.script_pubkey).is_some());

        let compressor = TxOutCompressor::default();
        let bytes = compressor.serialize(&txout);
        prop_assert_eq!(bytes.len(), compressed_size(&txout));
        prop_assert_eq!(compressor.deserialize(&bytes), Ok(txout));
    }

    #[test]
    fn decoding_never_reads_past_the_stream(
        bytes in proptest::collection::vec(any::<u8>(), 0..64),
        max in 0u64..64,
    ) {
        // Arbitrary input either decodes or errors, and never over-advances.
        let compressor = TxOutCompressor::new(CompressorConfig::with_max_script_size(max));
        let mut cursor = bytes.as_slice();
        let before = cursor.len();
        if compressor.decode(&mut cursor).is_ok() {
            prop_assert!(cursor.len() < before);
        }
    }
}
