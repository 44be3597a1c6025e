// This file implements top-level tests against fixed vectors: known answers for seeded key
// material (computed with an independent textbook FIPS 203 arithmetic), replayed coins through
// the rng-driven paths, and a failing random number generator.

use kyber_kex::{kyber_512, kyber_768, Error, ParamSet};
use hex::decode;
use rand_core::{CryptoRng, RngCore};
use std::num::NonZeroU32;


// ----- CUSTOM RNG TO REPLAY VALUES -----

struct MyRng {
    data: Vec<Vec<u8>>,
}

impl RngCore for MyRng {
    fn next_u32(&mut self) -> u32 { unimplemented!() }

    fn next_u64(&mut self) -> u64 { unimplemented!() }

    fn fill_bytes(&mut self, out: &mut [u8]) {
        let x = self.data.pop().expect("test rng problem");
        out.copy_from_slice(&x)
    }

    fn try_fill_bytes(&mut self, out: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(out);
        Ok(())
    }
}

impl CryptoRng for MyRng {}

impl MyRng {
    fn new() -> Self { MyRng { data: Vec::new() } }

    fn push(&mut self, new_data: &[u8]) {
        let x = new_data.to_vec();
        self.data.push(x);
    }
}


// ----- RNG THAT ALWAYS FAILS -----

struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 { unimplemented!() }

    fn next_u64(&mut self) -> u64 { unimplemented!() }

    fn fill_bytes(&mut self, _out: &mut [u8]) { unimplemented!() }

    fn try_fill_bytes(&mut self, _out: &mut [u8]) -> Result<(), rand_core::Error> {
        Err(rand_core::Error::from(NonZeroU32::new(rand_core::Error::CUSTOM_START).unwrap()))
    }
}

impl CryptoRng for FailingRng {}


fn head(coeffs: &[i16; 256]) -> [i16; 8] { coeffs[..8].try_into().unwrap() }

fn seed(hex_str: &str) -> [u8; 32] { decode(hex_str).unwrap().try_into().unwrap() }

const SEED_A: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
const SEED_S: &str = "1111111111111111111111111111111111111111111111111111111111111111";
const SEED_E: &str = "2222222222222222222222222222222222222222222222222222222222222222";


#[test]
fn test_kyber_512_known_answers() {
    let p = ParamSet::KYBER_512;
    let (a, at) = kyber_kex::generate_matrix_from_seed(&p, &seed(SEED_A)).unwrap();
    assert_eq!(head(a[0][1].coeffs()), [1443, 768, 3151, 2500, 1526, 2050, 2108, 1764]);
    assert_eq!(head(a[1][0].coeffs()), [2079, 1862, 1213, 2239, 1454, 791, 1226, 737]);
    assert_eq!(head(at[0][1].coeffs()), [2079, 1862, 1213, 2239, 1454, 791, 1226, 737]);

    let s = kyber_kex::generate_private_key_from_seed(&p, &seed(SEED_S));
    assert_eq!(head(s.as_vector()[0].coeffs()), [2283, 3291, 2625, 2217, 1194, 1718, 1126, 293]);
    assert_eq!(head(s.as_vector()[1].coeffs()), [303, 1635, 3070, 1908, 1008, 3015, 3246, 2778]);

    let e = kyber_kex::generate_error_from_seed(&p, &seed(SEED_E));
    let mut e0 = e.as_vector().clone();
    e0.reduce();
    assert_eq!(head(e0[0].coeffs()), [892, 33, 2465, 2312, 942, 667, 1397, 1995]);

    let pk = kyber_kex::generate_public_key(&p, &a, &s, &e);
    assert_eq!(head(pk.as_vector()[0].coeffs()), [1801, 2982, 1335, 1340, 1691, 410, 2740, 3061]);
    assert_eq!(head(pk.as_vector()[1].coeffs()), [1983, 2040, 3213, 2273, 490, 1533, 2921, 456]);

    let ss = kyber_kex::calculate_shared_secret(&p, &pk, &s);
    assert_eq!(head(ss.as_ntt_poly().coeffs()), [2059, 257, 355, 1202, 463, 2309, 963, 2238]);
}


#[test]
fn test_kyber_768_known_answers() {
    let (a, _) = kyber_768::generate_matrix_from_seed(&seed(SEED_A)).unwrap();
    assert_eq!(head(a[2][2].coeffs()), [2969, 2358, 955, 961, 2915, 306, 1591, 2012]);
    let s = kyber_768::generate_private_key_from_seed(&seed(SEED_S));
    assert_eq!(head(s.as_vector()[2].coeffs()), [2910, 1429, 1820, 2022, 1464, 1772, 1842, 1737]);
}


#[test]
fn test_replayed_coins_match_seeded() {
    let (d_a, d_s, d_e) = (seed(SEED_A), seed(SEED_S), seed(SEED_E));
    let mut rng = MyRng::new();
    // popped in reverse order
    rng.push(&d_e);
    rng.push(&d_s);
    rng.push(&d_a);

    let (a, at) = kyber_512::try_generate_matrix_with_rng(&mut rng).unwrap();
    let s = kyber_512::try_generate_private_key_with_rng(&mut rng).unwrap();
    let e = kyber_512::try_generate_error_with_rng(&mut rng).unwrap();

    assert_eq!((a, at), kyber_512::generate_matrix_from_seed(&d_a).unwrap());
    assert_eq!(s.as_vector(), kyber_512::generate_private_key_from_seed(&d_s).as_vector());
    assert_eq!(e.as_vector(), kyber_512::generate_error_from_seed(&d_e).as_vector());
}


#[test]
fn test_failing_rng() {
    for p in [ParamSet::KYBER_512, ParamSet::KYBER_768, ParamSet::KYBER_1024] {
        let err = kyber_kex::generate_matrix(&mut FailingRng, &p).err();
        assert_eq!(err, Some(Error::RandomnessUnavailable));
        let err = kyber_kex::generate_private_key(&mut FailingRng, &p).err();
        assert_eq!(err, Some(Error::RandomnessUnavailable));
        let err = kyber_kex::generate_error(&mut FailingRng, &p).err();
        assert_eq!(err, Some(Error::RandomnessUnavailable));
    }
}


#[test]
fn test_error_display() {
    assert_eq!(ParamSet::try_from_k(7), Err(Error::InvalidParameter(7)));
    assert!(Error::InvalidParameter(7).to_string().contains("k = 7"));
    assert!(!Error::RandomnessUnavailable.to_string().is_empty());
    assert!(!Error::XofFailure.to_string().is_empty());
}
