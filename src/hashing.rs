// This file implements the seed expansion and pseudorandom sampling of FIPS 203 sections 4.1
// and 4.2.2: the hash `G`, the PRF, `SampleNTT` (uniform matrix entries) and `SamplePolyCBD`
// (noise), laid out the way the Kyber reference implementation drives them.

use crate::conversion::{cbd2, cbd3, coeffs_from_three_bytes};
use crate::helpers::{ensure, is_in_range};
use crate::types::{Error, NttMatrix, NttPoly, NttVector, Poly, Vector, Zero};
use crate::{N, Q};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_512, Shake128, Shake256};
use zeroize::Zeroize;


/// Upper bound on three-byte XOF reads per matrix entry. 256 accepted candidates need about
/// 158 reads on average; a correct XOF never gets anywhere near this.
pub(crate) const MAX_XOF_READS: usize = 1024;


/// # Function `G(c)` of FIPS 203 (4.5).
/// SHA3-512 of the 32 coin bytes, split into the public seed `ρ` (first half) and the noise
/// seed `σ` (second half).
pub(crate) fn g(d: &[u8; 32]) -> ([u8; 32], [u8; 32]) {
    let digest = Sha3_512::digest(d);
    let mut rho = [0u8; 32];
    let mut sigma = [0u8; 32];
    rho.copy_from_slice(&digest[0..32]);
    sigma.copy_from_slice(&digest[32..64]);
    (rho, sigma)
}


/// # Function `PRF_η(s, b)` of FIPS 203 (4.3), as an XOF.
/// Takes a reference to a list of byte-slice references and runs them through Shake256.
/// Returns a xof reader for extracting extendable output.
pub(crate) fn h256_xof(v: &[&[u8]]) -> impl XofReader {
    let mut hasher = Shake256::default();
    v.iter().for_each(|b| hasher.update(b));
    hasher.finalize_xof()
}


/// # Function `XOF(ρ, i, j)` of FIPS 203 (4.6).
/// Takes a reference to a list of byte-slice references and runs them through Shake128.
/// Returns a xof reader for extracting extendable output.
pub(crate) fn h128_xof(v: &[&[u8]]) -> impl XofReader {
    let mut hasher = Shake128::default();
    v.iter().for_each(|b| hasher.update(b));
    hasher.finalize_xof()
}


/// # Algorithm 7 `SampleNTT(B)` of FIPS 203, over an already-seeded XOF.
/// Rejection-samples 256 coefficients uniform in `[0, q)`. Operates on public data only, so
/// the data-dependent loop is fine.
///
/// **Input**: an XOF stream seeded with `ρ ‖ x ‖ y`. <br>
/// **Output**: `a_hat ∈ T_q`, coefficients in `[0, q)`.
///
/// # Errors
/// Returns [`Error::XofFailure`] if the stream does not produce 256 acceptable candidates
/// within [`MAX_XOF_READS`] reads.
pub(crate) fn rej_uniform(xof: &mut impl XofReader) -> Result<NttPoly, Error> {
    let mut a_hat = NttPoly::zero();

    // 1: j ← 0
    let mut j = 0;

    // 3: while j < 256 do
    let mut reads = 0;
    while j < N {
        ensure!(reads < MAX_XOF_READS, Error::XofFailure);

        // 4: (ctx, C) ← XOF.Squeeze(ctx, 3)
        let mut c = [0u8; 3];
        xof.read(&mut c);
        reads += 1;

        // 6-7: d1, d2 from C
        let [d1, d2] = coeffs_from_three_bytes(c);

        // 8: if d1 < q then
        if d1 < Q {
            a_hat.0[j] = d1;
            j += 1;
        }

        // 12: if d2 < q and j < 256 then
        if (d2 < Q) & (j < N) {
            a_hat.0[j] = d2;
            j += 1;
        }

        // 16: end while
    }

    // 17: return a_hat
    Ok(a_hat)
}


/// Samples one matrix entry from `ρ ‖ x ‖ y`.
///
/// # Errors
/// Propagates [`Error::XofFailure`].
pub(crate) fn sample_ntt(rhos: &[&[u8]]) -> Result<NttPoly, Error> {
    debug_assert_eq!(rhos.iter().map(|&r| r.len()).sum::<usize>(), 34, "SampleNTT: bad seed size");
    let mut xof = h128_xof(rhos);
    rej_uniform(&mut xof)
}


/// # Lines 3-7 of FIPS 203 Algorithm 13, `indcpaGenMatrix` in the reference code.
/// Expands the public seed into the `k × k` matrix `A_hat` (or its transpose). Entry `(i, j)`
/// absorbs `ρ ‖ j ‖ i` untransposed and `ρ ‖ i ‖ j` transposed, so
/// `gen_matrix(ρ, true)[i][j] == gen_matrix(ρ, false)[j][i]`.
///
/// # Errors
/// Propagates [`Error::XofFailure`].
#[allow(clippy::cast_possible_truncation)] // i and j below 4
pub(crate) fn gen_matrix(k: usize, rho: &[u8; 32], transposed: bool) -> Result<NttMatrix, Error> {
    let mut a_hat = NttMatrix::zero(k);
    for i in 0..k {
        for j in 0..k {
            let (x, y) = if transposed { (i as u8, j as u8) } else { (j as u8, i as u8) };
            a_hat.rows[i].polys[j] = sample_ntt(&[rho, &[x], &[y]])?;
        }
    }
    Ok(a_hat)
}


/// # Algorithm 8 `SamplePolyCBD_η(PRF_η(σ, N))` of FIPS 203.
/// Expands `σ ‖ nonce` through SHAKE-256 into exactly `64·η` bytes and maps them to a
/// noise polynomial with coefficients in `[−η, η]`. Intermediate bytes are wiped.
pub(crate) fn get_noise(eta: u8, sigma: &[u8; 32], nonce: u8) -> Poly {
    debug_assert!((eta == 2) | (eta == 3), "get_noise: unsupported eta");
    let mut xof = h256_xof(&[sigma, &[nonce]]);
    let p = if eta == 2 {
        let mut buf = [0u8; 2 * N / 4];
        xof.read(&mut buf);
        let p = cbd2(&buf);
        buf.zeroize();
        p
    } else {
        let mut buf = [0u8; 3 * N / 4];
        xof.read(&mut buf);
        let p = cbd3(&buf);
        buf.zeroize();
        p
    };
    debug_assert!(is_in_range(&p.0, i16::from(eta), i16::from(eta)), "get_noise: out of range");
    p
}


/// `k` noise polynomials with nonces `0..k`, in the normal domain.
#[allow(clippy::cast_possible_truncation)] // nonce below 4
pub(crate) fn get_noise_vec(k: usize, eta: u8, sigma: &[u8; 32]) -> Vector {
    Vector::from_fn(k, |i| get_noise(eta, sigma, i as u8))
}


/// `k` noise polynomials moved into the NTT domain.
pub(crate) fn get_noise_vec_ntt(k: usize, eta: u8, sigma: &[u8; 32]) -> NttVector {
    let mut s = get_noise_vec(k, eta, sigma);
    let s_hat = s.ntt();
    s.zeroize();
    s_hat
}
