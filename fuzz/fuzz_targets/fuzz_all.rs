#![no_main]

use libfuzzer_sys::fuzz_target;
use kyber_kex::{ParamSet, Poly};
use rand_chacha::rand_core::SeedableRng;

const Q: i16 = 3329;

fuzz_target!(|data: [u8; 3 * 32 + 1 + 2 * 256 * 2]| {  // three seeds, k selector, two polynomials

    // Pick a parameter set from one 'fuzzy' byte
    let params = ParamSet::try_from_k(2 + usize::from(data[96] % 3)).unwrap();

    // Seeded key material; debug assertions check every sampler range
    let (a, at) = kyber_kex::generate_matrix_from_seed(&params, data[0..32].try_into().unwrap()).unwrap();
    assert_eq!(at, a.transpose());
    let sk = kyber_kex::generate_private_key_from_seed(&params, data[32..64].try_into().unwrap());
    let e = kyber_kex::generate_error_from_seed(&params, data[64..96].try_into().unwrap());
    let pk = kyber_kex::generate_public_key(&params, &a, &sk, &e);
    let ss = kyber_kex::calculate_shared_secret(&params, &pk, &sk);
    assert!(ss.as_ntt_poly().coeffs().iter().all(|c| (0..Q).contains(c)));

    // Arbitrary i16 coefficients survive the transform round trip
    let raw = &data[97..];
    for chunk in raw.chunks_exact(512) {
        let coeffs: [i16; 256] = core::array::from_fn(|i| i16::from_le_bytes([chunk[2 * i], chunk[2 * i + 1]]));
        let mut p = Poly::from_coeffs(coeffs);
        let mut back = p.ntt().inv_ntt();
        p.reduce();
        back.reduce();
        assert_eq!(p, back);
    }

    // Rng-driven path on fuzz-chosen coins
    let mut rng = rand_chacha::ChaCha8Rng::from_seed(data[0..32].try_into().unwrap());
    let sk2 = kyber_kex::generate_private_key(&mut rng, &params).unwrap();
    assert_eq!(sk2.as_vector().len(), params.k());
});
