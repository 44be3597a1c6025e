// This file implements functionality from FIPS 203 section 4.3 `NTT`, `NTT^{-1}` and the
// NTT-domain products, using the Kyber reference layout (Montgomery-form zetas, seven layers,
// 128 degree-one residues in bit-reversed order).

use crate::helpers::{barrett_reduce, fqmul, ZETA_TABLE_MONT};
use crate::types::{NttPoly, Poly, Zero};
use crate::N;


/// # Algorithm 9 `NTT(f)` of FIPS 203.
/// Computes the Number-Theoretic Transform. Input coefficients are Barrett-reduced on entry,
/// so any `i16` input stays within the butterfly headroom; the output is Barrett-reduced.
///
/// **Input**: polynomial `f(X) = ∑_{j=0}^{255} f_j X^j ∈ R_q` <br>
/// **Output**: `f_hat ∈ T_q`, coefficients in `[-(q-1)/2, (q-1)/2]`
pub(crate) fn ntt(f: &Poly) -> NttPoly {
    //
    // 1: f_hat ← f
    let mut f_hat = NttPoly(core::array::from_fn(|n| barrett_reduce(f.0[n])));

    // 2: i ← 1
    let mut i = 1;

    // 3: for (len ← 128; len ≥ 2; len ← len/2)
    let mut len = 128;
    while len >= 2 {
        //
        // 4: for (start ← 0; start < 256; start ← start + 2 · len)
        let mut start = 0;
        while start < N {
            //
            // 5: zeta ← ζ^{BitRev7(i)} mod q    (Montgomery form)
            let zeta = ZETA_TABLE_MONT[i];

            // 6: i ← i + 1
            i += 1;

            // 7: for (j ← start; j < start + len; j++)
            for j in start..(start + len) {
                //
                // 8: t ← zeta · f_hat[j + len]
                let t = fqmul(zeta, f_hat.0[j + len]);

                // 9: f_hat[j + len] ← f_hat[j] − t
                f_hat.0[j + len] = f_hat.0[j] - t;

                // 10: f_hat[j] ← f_hat[j] + t
                f_hat.0[j] += t;

                // 11: end for
            }

            start += 2 * len;

            // 12: end for
        }

        len >>= 1;

        // 13: end for
    }

    // each layer adds at most q in magnitude; bring back to the centered range
    f_hat.0.iter_mut().for_each(|c| *c = barrett_reduce(*c));

    // 14: return f_hat
    f_hat
}


/// # Algorithm 10 `NTT^{-1}(f_hat)` of FIPS 203.
/// Computes the inverse of the Number-Theoretic Transform. The final scaling by `128^{-1}`
/// is folded into a Montgomery multiply, so the result is exact modulo q (no `2^16` factor).
///
/// **Input**: `f_hat ∈ T_q`, coefficients in `(-q, q)` <br>
/// **Output**: polynomial `f ∈ R_q`, coefficients in `(-q, q)`
pub(crate) fn inv_ntt(f_hat: &NttPoly) -> Poly {
    // 2^16 · 128^{-1} mod q; the Montgomery multiply removes the 2^16
    const F: i16 = 512;

    // 1: f ← f_hat
    let mut f = Poly(f_hat.0);

    // 2: i ← 127
    let mut i = 127;

    // 3: for (len ← 2; len ≤ 128; len ← 2 · len)
    let mut len = 2;
    while len <= 128 {
        //
        // 4: for (start ← 0; start < 256; start ← start + 2 · len)
        let mut start = 0;
        while start < N {
            //
            // 5: zeta ← ζ^{BitRev7(i)} mod q    (Montgomery form)
            let zeta = ZETA_TABLE_MONT[i];

            // 6: i ← i − 1
            i -= 1;

            // 7: for (j ← start; j < start + len; j++)
            for j in start..(start + len) {
                //
                // 8: t ← f[j]
                let t = f.0[j];

                // 9: f[j] ← t + f[j + len]
                f.0[j] = barrett_reduce(t + f.0[j + len]);

                // 10: f[j + len] ← zeta · (f[j + len] − t)
                f.0[j + len] = fqmul(zeta, f.0[j + len] - t);

                // 11: end for
            }

            start += 2 * len;

            // 12: end for
        }

        len <<= 1;

        // 13: end for
    }

    // 14: f ← f · 3303 mod q
    f.0.iter_mut().for_each(|c| *c = fqmul(*c, F));

    // 15: return f
    f
}


/// # Algorithm 12 `BaseCaseMultiply(a0, a1, b0, b1, γ)` of FIPS 203.
/// Computes the product of two degree-one polynomials modulo `X^2 − γ`, with each product
/// Montgomery-reduced (result scaled by `2^{-16}`).
#[inline]
fn base_case_multiply(a: [i16; 2], b: [i16; 2], gamma: i16) -> [i16; 2] {
    // 1: c0 ← a0 · b0 + a1 · b1 · γ
    let c0 = fqmul(fqmul(a[1], b[1]), gamma) + fqmul(a[0], b[0]);

    // 2: c1 ← a0 · b1 + a1 · b0
    let c1 = fqmul(a[0], b[1]) + fqmul(a[1], b[0]);

    // 3: return (c0, c1)
    [c0, c1]
}


/// # Algorithm 11 `MultiplyNTTs(f_hat, g_hat)` of FIPS 203.
/// Computes the product (in the ring `T_q`) of two NTT representations. Pairs `4i` and
/// `4i + 2` share the table entry `64 + i` with opposite signs. The result is scaled by
/// `2^{-16}` and has coefficients in `(-2q, 2q)`.
pub(crate) fn multiply_ntts(f_hat: &NttPoly, g_hat: &NttPoly) -> NttPoly {
    let mut h_hat = NttPoly::zero();

    // 1: for (i ← 0; i < 128; i++)
    for i in 0..(N / 4) {
        let zeta = ZETA_TABLE_MONT[64 + i];

        // 2: (h_hat[2i], h_hat[2i+1]) ← BaseCaseMultiply(f_hat[2i], f_hat[2i+1], g_hat[2i], g_hat[2i+1], ζ^{2BitRev7(i)+1})
        let [c0, c1] = base_case_multiply(
            [f_hat.0[4 * i], f_hat.0[4 * i + 1]],
            [g_hat.0[4 * i], g_hat.0[4 * i + 1]],
            zeta,
        );
        h_hat.0[4 * i] = c0;
        h_hat.0[4 * i + 1] = c1;

        let [c0, c1] = base_case_multiply(
            [f_hat.0[4 * i + 2], f_hat.0[4 * i + 3]],
            [g_hat.0[4 * i + 2], g_hat.0[4 * i + 3]],
            -zeta,
        );
        h_hat.0[4 * i + 2] = c0;
        h_hat.0[4 * i + 3] = c1;

        // 3: end for
    }

    // 4: return h_hat
    h_hat
}


/// Inner product of two equal-length NTT-domain vectors: products accumulated modulo q,
/// then one Barrett pass.
pub(crate) fn pointwise_acc_montgomery(a_hat: &[NttPoly], b_hat: &[NttPoly]) -> NttPoly {
    debug_assert_eq!(a_hat.len(), b_hat.len(), "pointwise_acc: length mismatch");
    debug_assert!(a_hat.len() <= 4, "pointwise_acc: accumulation headroom exceeded");
    let mut acc = NttPoly::zero();
    for (a, b) in a_hat.iter().zip(b_hat.iter()) {
        let prod = multiply_ntts(a, b);
        crate::helpers::add_coeffs(&mut acc.0, &prod.0);
    }
    acc.0.iter_mut().for_each(|c| *c = barrett_reduce(*c));
    acc
}
