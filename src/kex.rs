// This file implements the key-material composition: matrix, error and private key generation
// from fresh coins (FIPS 203 Algorithm 13 lines 1-16 split into independent steps), the public
// key `t_hat = A_hat∘s_hat + e_hat`, and the shared-secret inner product.

use crate::hashing::{g, gen_matrix, get_noise_vec_ntt};
use crate::types::{
    Error, ErrorVector, NttMatrix, NttVector, ParamSet, PrivateKey, PublicKey, SharedSecret,
};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;


fn assert_shape(params: &ParamSet, len: usize, what: &str) {
    assert!(
        len == params.k(),
        "ShapeMismatch: {what} has length {len} but the parameter set has k = {}",
        params.k()
    );
}


fn fill_coins(rng: &mut impl CryptoRngCore) -> Result<[u8; 32], Error> {
    // 1: d ← B^{32}
    let mut d = [0u8; 32];
    rng.try_fill_bytes(&mut d).map_err(|_| Error::RandomnessUnavailable)?;
    Ok(d)
}


/// Generates the public matrix `A_hat` together with its transpose from fresh randomness.
///
/// **Input**: `rng` a cryptographically-secure random number generator, and the parameter set.<br>
/// **Output**: `(A_hat, A_hat^T)`, both `k × k` and in the NTT domain with coefficients in `[0, q)`.
///
/// # Errors
/// Returns [`Error::RandomnessUnavailable`] when the random number generator fails, and
/// propagates [`Error::XofFailure`] from the matrix sampler.
pub fn generate_matrix(
    rng: &mut impl CryptoRngCore, params: &ParamSet,
) -> Result<(NttMatrix, NttMatrix), Error> {
    let mut d = fill_coins(rng)?;
    let res = generate_matrix_from_seed(params, &d);
    d.zeroize();
    res
}


/// Deterministic form of [`generate_matrix`], taking the 32 coin bytes directly.
///
/// # Errors
/// Propagates [`Error::XofFailure`] from the matrix sampler.
pub fn generate_matrix_from_seed(
    params: &ParamSet, d: &[u8; 32],
) -> Result<(NttMatrix, NttMatrix), Error> {
    //
    // 2: (ρ, σ) ← G(d)    ▷ only the public half is used here
    let (rho, mut sigma) = g(d);
    sigma.zeroize();

    // 3-7: A_hat[i, j] ← SampleNTT(ρ ‖ j ‖ i), and the transposed expansion
    let a_hat = gen_matrix(params.k(), &rho, false)?;
    let a_hat_t = gen_matrix(params.k(), &rho, true)?;

    Ok((a_hat, a_hat_t))
}


/// Generates the error vector `e_hat` from fresh randomness.
///
/// **Input**: `rng` a cryptographically-secure random number generator, and the parameter set.<br>
/// **Output**: `k` CBD_η1 noise polynomials with nonces `0..k`, moved into the NTT domain.
///
/// # Errors
/// Returns [`Error::RandomnessUnavailable`] when the random number generator fails.
pub fn generate_error(rng: &mut impl CryptoRngCore, params: &ParamSet) -> Result<ErrorVector, Error> {
    let mut d = fill_coins(rng)?;
    let e_hat = generate_error_from_seed(params, &d);
    d.zeroize();
    Ok(e_hat)
}


/// Deterministic form of [`generate_error`], taking the 32 coin bytes directly.
#[must_use]
pub fn generate_error_from_seed(params: &ParamSet, d: &[u8; 32]) -> ErrorVector {
    //
    // 2: (ρ, σ) ← G(d)    ▷ only the noise half is used here
    let (_rho, mut sigma) = g(d);

    // 12-15: e[i] ← SamplePolyCBD_η1(PRF_η1(σ, N)); N ← N + 1
    // 17: e_hat ← NTT(e)
    let e_hat = get_noise_vec_ntt(params.k(), params.eta1(), &sigma);
    sigma.zeroize();

    ErrorVector(e_hat)
}


/// Generates the private key `s_hat` from fresh randomness.
///
/// **Input**: `rng` a cryptographically-secure random number generator, and the parameter set.<br>
/// **Output**: `k` CBD_η1 noise polynomials with nonces `0..k`, moved into the NTT domain and
/// reduced into `[0, q)`.
///
/// # Errors
/// Returns [`Error::RandomnessUnavailable`] when the random number generator fails.
pub fn generate_private_key(
    rng: &mut impl CryptoRngCore, params: &ParamSet,
) -> Result<PrivateKey, Error> {
    let mut d = fill_coins(rng)?;
    let s_hat = generate_private_key_from_seed(params, &d);
    d.zeroize();
    Ok(s_hat)
}


/// Deterministic form of [`generate_private_key`], taking the 32 coin bytes directly.
#[must_use]
pub fn generate_private_key_from_seed(params: &ParamSet, d: &[u8; 32]) -> PrivateKey {
    //
    // 2: (ρ, σ) ← G(d)
    let (_rho, mut sigma) = g(d);

    // 8-11: s[i] ← SamplePolyCBD_η1(PRF_η1(σ, N)); N ← N + 1
    // 16: s_hat ← NTT(s)
    let mut s_hat = get_noise_vec_ntt(params.k(), params.eta1(), &sigma);
    sigma.zeroize();

    // Canonical coefficients, ready for multiplication
    s_hat.reduce();
    PrivateKey(s_hat)
}


/// Computes the public key `t_hat = A_hat∘s_hat + e_hat` in the NTT domain.
///
/// **Input**: the matrix `A_hat` (or its transpose), the private key `s_hat` and the error
/// vector `e_hat`, all of length `k`.<br>
/// **Output**: `t_hat`, coefficients in `[0, q)`.
///
/// # Panics
/// `ShapeMismatch` when the matrix, private key or error vector is not of length `k`.
#[must_use]
pub fn generate_public_key(
    params: &ParamSet, a_hat: &NttMatrix, s_hat: &PrivateKey, e_hat: &ErrorVector,
) -> PublicKey {
    assert_shape(params, a_hat.len(), "matrix");
    assert_shape(params, s_hat.0.len(), "private key");
    assert_shape(params, e_hat.0.len(), "error vector");

    // 18: t_hat ← A_hat ∘ s_hat + e_hat
    let mut t_hat = NttVector::from_fn(params.k(), |i| {
        let mut row = a_hat[i].pointwise_acc_montgomery(&s_hat.0);
        row.to_mont();
        row
    });
    t_hat.add(&e_hat.0);
    t_hat.reduce();

    PublicKey(t_hat)
}


/// Computes the shared secret `Σ pk[i]·sk[i]` in the NTT domain. Neither operand is transformed
/// first; both are taken as NTT-domain vectors as produced by this crate.
///
/// **Input**: a public key and a private key, both of length `k`.<br>
/// **Output**: a single NTT-domain ring element with coefficients in `[0, q)`.
///
/// # Panics
/// `ShapeMismatch` when either key is not of length `k`.
#[must_use]
pub fn calculate_shared_secret(params: &ParamSet, pk: &PublicKey, sk: &PrivateKey) -> SharedSecret {
    assert_shape(params, pk.0.len(), "public key");
    assert_shape(params, sk.0.len(), "private key");

    let mut ss = pk.0.pointwise_acc_montgomery(&sk.0);
    ss.to_mont();
    ss.reduce();

    SharedSecret(ss)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Q;
    use rand_core::SeedableRng;

    fn is_canonical(v: &NttVector) -> bool { v.iter().all(|p| p.0.iter().all(|c| (0..Q).contains(c))) }

    #[test]
    fn test_seeded_determinism() {
        let p = ParamSet::KYBER_768;
        let d = [0x24u8; 32];
        assert_eq!(generate_matrix_from_seed(&p, &d).unwrap(), generate_matrix_from_seed(&p, &d).unwrap());
        assert_eq!(generate_private_key_from_seed(&p, &d).0, generate_private_key_from_seed(&p, &d).0);
        assert_eq!(generate_error_from_seed(&p, &d).0, generate_error_from_seed(&p, &d).0);
    }

    #[test]
    fn test_private_key_is_reduced_error_ntt() {
        // same coins, same noise; the private key is just the canonical form of the error vector
        let p = ParamSet::KYBER_512;
        let d = [0x99u8; 32];
        let sk = generate_private_key_from_seed(&p, &d);
        let mut e = generate_error_from_seed(&p, &d).0.clone();
        assert!(is_canonical(&sk.0));
        e.reduce();
        assert_eq!(sk.0, e);
    }

    #[test]
    fn test_public_key_canonical() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(5);
        for p in [ParamSet::KYBER_512, ParamSet::KYBER_768, ParamSet::KYBER_1024] {
            let (a, at) = generate_matrix(&mut rng, &p).unwrap();
            assert_eq!(at, a.transpose());
            let s = generate_private_key(&mut rng, &p).unwrap();
            let e = generate_error(&mut rng, &p).unwrap();
            let pk = generate_public_key(&p, &a, &s, &e);
            assert_eq!(pk.0.len(), p.k());
            assert!(is_canonical(&pk.0));
        }
    }

    #[test]
    fn test_shared_secret_agreement() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(17);
        let p = ParamSet::KYBER_768;
        for _ in 0..16 {
            let (a, at) = generate_matrix(&mut rng, &p).unwrap();
            let s1 = generate_private_key(&mut rng, &p).unwrap();
            let s2 = generate_private_key(&mut rng, &p).unwrap();
            let e1 = generate_error(&mut rng, &p).unwrap();
            let e2 = generate_error(&mut rng, &p).unwrap();
            let pk1 = generate_public_key(&p, &a, &s1, &e1);
            let pk2 = generate_public_key(&p, &at, &s2, &e2);
            let ss1 = calculate_shared_secret(&p, &pk2, &s1);
            let ss2 = calculate_shared_secret(&p, &pk1, &s2);
            assert!(ss1.0.coeffs().iter().all(|c| (0..Q).contains(c)));

            let mut diff = ss1.0;
            crate::helpers::add_coeffs(&mut diff.0, &ss2.0.0.map(|c| -c));
            let mut diff = diff.inv_ntt();
            diff.reduce();
            for &c in diff.coeffs() {
                let centered = if c > Q / 2 { c - Q } else { c };
                assert!(centered.abs() < Q / 4, "difference coefficient {centered}");
            }
        }
    }

    #[test]
    #[should_panic(expected = "ShapeMismatch")]
    fn test_public_key_shape_mismatch() {
        let d = [1u8; 32];
        let (a, _) = generate_matrix_from_seed(&ParamSet::KYBER_1024, &d).unwrap();
        let s = generate_private_key_from_seed(&ParamSet::KYBER_768, &d);
        let e = generate_error_from_seed(&ParamSet::KYBER_768, &d);
        let _pk = generate_public_key(&ParamSet::KYBER_768, &a, &s, &e);
    }

    #[test]
    #[should_panic(expected = "ShapeMismatch")]
    fn test_shared_secret_shape_mismatch() {
        let d = [2u8; 32];
        let (a, _) = generate_matrix_from_seed(&ParamSet::KYBER_512, &d).unwrap();
        let s = generate_private_key_from_seed(&ParamSet::KYBER_512, &d);
        let e = generate_error_from_seed(&ParamSet::KYBER_512, &d);
        let pk = generate_public_key(&ParamSet::KYBER_512, &a, &s, &e);
        let sk = generate_private_key_from_seed(&ParamSet::KYBER_1024, &d);
        let _ss = calculate_shared_secret(&ParamSet::KYBER_512, &pk, &sk);
    }
}
