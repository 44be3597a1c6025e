use dudect_bencher::{ctbench_main, BenchRng, Class, CtRunner};
use kyber_kex::kyber_768; // Could also be kyber_512 or kyber_1024.
use rand_core::{CryptoRng, RngCore};

// Test RNG to regurgitate incremented values when 'asked'
#[derive(Clone)]
#[repr(align(8))]
struct TestRng { value: u32 }

impl RngCore for TestRng {
    fn next_u32(&mut self) -> u32 { unimplemented!() }

    fn next_u64(&mut self) -> u64 { unimplemented!() }

    fn fill_bytes(&mut self, _out: &mut [u8]) { unimplemented!() }

    fn try_fill_bytes(&mut self, out: &mut [u8]) -> Result<(), rand_core::Error> {
        out.iter_mut().for_each(|b| *b = self.value.to_le_bytes()[0]);
        out[0..4].copy_from_slice(&self.value.to_be_bytes());
        self.value = self.value.wrapping_add(1);
        Ok(())
    }
}

impl CryptoRng for TestRng {}


// The matrix is public and sampled once; only the secret noise and the products over it are timed
fn keys_and_secret(runner: &mut CtRunner, mut _rng: &mut BenchRng) {
    const ITERATIONS_INNER: usize = 5;
    const ITERATIONS_OUTER: usize = 100_000;

    let (a, at) = kyber_768::generate_matrix_from_seed(&[0x5Au8; 32]).unwrap();
    let peer_sk = kyber_768::generate_private_key_from_seed(&[0x01u8; 32]);
    let peer_e = kyber_768::generate_error_from_seed(&[0x02u8; 32]);
    let peer_pk = kyber_768::generate_public_key(&at, &peer_sk, &peer_e);

    let mut classes = [Class::Right; ITERATIONS_OUTER];
    let mut rngs: [TestRng; ITERATIONS_OUTER] = core::array::from_fn(|_| TestRng {value: 12});

    // Interleave left and right
    for i in (0..ITERATIONS_OUTER).step_by(2) {
        classes[i] = Class::Left;
        rngs[i] = TestRng {value: 56}; // <--- different seed value
    }

    for (class, rng) in classes.into_iter().zip(rngs.into_iter()) {
        runner.run_one(class, || {
            let mut rng = rng.clone();
            for _ in 0..ITERATIONS_INNER {
                let sk = kyber_768::try_generate_private_key_with_rng(&mut rng).unwrap();
                let e = kyber_768::try_generate_error_with_rng(&mut rng).unwrap();
                let _pk = kyber_768::generate_public_key(&a, &sk, &e);
                let _ss = kyber_768::calculate_shared_secret(&peer_pk, &sk);
            }
        })
    }
}

ctbench_main!(keys_and_secret);
