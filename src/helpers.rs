// This file implements the modular arithmetic shared by the NTT, sampling and key-material
// code: Montgomery and Barrett reduction over q = 3329, and the Montgomery-form zeta table.

use crate::{N, Q};


/// If the condition is not met, return the given error. Borrowed from the `anyhow` crate.
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err);
        }
    };
}

pub(crate) use ensure; // make available throughout crate


/// `q^{-1} mod 2^16`, signed.
pub(crate) const QINV: i16 = -3327;

/// `2^32 mod q`; a Montgomery multiply by this value multiplies by R.
const MONT_SQ: i32 = 1353;

/// Primitive 256th root of unity mod q.
const ZETA: i32 = 17;


/// # Algorithm `MontgomeryReduce(a)`.
/// For `|a| < q·2^15`, returns `r ≡ a·2^{-16} (mod q)` with `-q < r < q`. Constant-time.
#[inline(always)]
#[allow(clippy::inline_always, clippy::cast_possible_truncation)]
pub(crate) const fn mont_reduce(a: i32) -> i16 {
    let t = (a as i16).wrapping_mul(QINV);
    ((a - (t as i32) * (Q as i32)) >> 16) as i16
}


/// Barrett reduction. For any `a`, returns the centered representative
/// `-(q-1)/2 ≤ r ≤ (q-1)/2` congruent to `a`. Constant-time.
#[inline(always)]
#[allow(clippy::inline_always, clippy::cast_possible_truncation)]
pub(crate) const fn barrett_reduce(a: i16) -> i16 {
    const V: i32 = ((1 << 26) + (Q as i32) / 2) / (Q as i32); // 20159
    let t = (V * a as i32 + (1 << 25)) >> 26;
    // |t·q| can exceed i16::MAX for |a| near 2^15, so the subtraction stays in i32
    (a as i32 - t * (Q as i32)) as i16
}


/// Canonical reduction into `[0, q)`: Barrett, then a masked add of q for negative results.
#[inline(always)]
#[allow(clippy::inline_always)]
pub(crate) const fn full_reduce(a: i16) -> i16 {
    let r = barrett_reduce(a);
    r + ((r >> 15) & Q)
}


/// Field multiplication followed by Montgomery reduction: `a·b·2^{-16} mod q`.
#[inline(always)]
#[allow(clippy::inline_always)]
pub(crate) const fn fqmul(a: i16, b: i16) -> i16 { mont_reduce(a as i32 * b as i32) }


/// Multiply by R; the result lies in `(-q, q)`.
#[inline(always)]
#[allow(clippy::inline_always)]
pub(crate) const fn to_mont(a: i16) -> i16 { mont_reduce(a as i32 * MONT_SQ) }


/// Ensure polynomial coefficients are within -lo to +hi (inclusive)
pub(crate) fn is_in_range(w: &[i16; N], lo: i16, hi: i16) -> bool {
    w.iter().all(|&e| (e >= -lo) & (e <= hi))
}


/// Coefficient-wise `a += b` modulo q. Both operands are Barrett-reduced first, so any `i16`
/// inputs are accepted; the sum lies in `[-(q-1), q-1]`.
pub(crate) fn add_coeffs(a: &mut [i16; N], b: &[i16; N]) {
    a.iter_mut().zip(b.iter()).for_each(|(x, y)| *x = barrett_reduce(*x) + barrett_reduce(*y));
}


/// HAC Algorithm 14.76 Right-to-left binary exponentiation mod Q.
#[must_use]
const fn pow_mod_q(g: i32, e: u8) -> i32 {
    let q = Q as i32;
    let mut result = 1;
    let mut s = g;
    let mut e = e;
    while e != 0 {
        if e & 1 != 0 {
            result = (result * s) % q;
        };
        e >>= 1;
        if e != 0 {
            s = (s * s) % q;
        };
    }
    result
}


/// `ζ^{BitRev7(i)}·R mod q` for `i` in `0..128`, centered in `(-q/2, q/2)`.
#[allow(clippy::cast_possible_truncation)]
const fn gen_zeta_table_mont() -> [i16; 128] {
    let q = Q as i32;
    let r_mod_q = (1i32 << 16) % q;
    let mut result = [0i16; 128];
    let mut i = 0;
    while i < 128 {
        let zeta = pow_mod_q(ZETA, (i as u8).reverse_bits() >> 1);
        let zeta_mont = (zeta * r_mod_q) % q;
        result[i] = if zeta_mont > q / 2 { (zeta_mont - q) as i16 } else { zeta_mont as i16 };
        i += 1;
    }
    result
}

pub(crate) static ZETA_TABLE_MONT: [i16; 128] = gen_zeta_table_mont();
