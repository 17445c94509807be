//! Amount compression.
//!
//! Round satoshi values dominate real outputs, so the transform folds trailing decimal
//! zeros into a base-10 exponent `e` (at most 9) and packs the remaining digits:
//!
//! * `x == 0`: `0`
//! * `e < 9`, `x = n * 10^(e+1) + d * 10^e` with `d` in 1..=9: `1 + 10 * (9 * n + d - 1) + e`
//! * `e == 9`, `x = n * 10^9`: `1 + 10 * (n - 1) + 9`
//!
//! The formulas are part of the on-disk and on-wire format. Arithmetic is unsigned and
//! wrapping, which keeps decoding of arbitrary (hostile) compressed values panic-free.

/// Maximum exponent folded out of an amount.
const MAX_EXPONENT: u64 = 9;

/// Compresses a satoshi amount. Bijective with [`decompress_amount`] for every amount up to
/// `Amount::MAX_MONEY` (and well beyond).
pub fn compress_amount(amount: u64) -> u64 {
    if amount == 0 {
        return 0;
    }
    let mut n = amount;
    let mut e = 0u64;
    while n % 10 == 0 && e < MAX_EXPONENT {
        n /= 10;
        e += 1;
    }
    if e < MAX_EXPONENT {
        let d = n % 10;
        debug_assert!((1..=9).contains(&d));
        n /= 10;
        let digits = n.wrapping_mul(9).wrapping_add(d - 1);
        digits.wrapping_mul(10).wrapping_add(e).wrapping_add(1)
    } else {
        (n - 1).wrapping_mul(10).wrapping_add(9).wrapping_add(1)
    }
}

/// Inverse of [`compress_amount`].
pub fn decompress_amount(compressed: u64) -> u64 {
    if compressed == 0 {
        return 0;
    }
    let mut x = compressed - 1;
    // x = 10 * (9 * n + d - 1) + e
    let mut e = x % 10;
    x /= 10;
    let mut n = if e < MAX_EXPONENT {
        // x = 9 * n + d - 1
        let d = (x % 9) + 1;
        x /= 9;
        // x = n
        x.wrapping_mul(10).wrapping_add(d)
    } else {
        x.wrapping_add(1)
    };
    while e > 0 {
        n = n.wrapping_mul(10);
        e -= 1;
    }
    n
}
