#![no_std]
#![deny(clippy::pedantic, missing_docs, unsafe_code)]
// Almost all of the 'allow' category...
#![deny(absolute_paths_not_starting_with_crate, elided_lifetimes_in_paths)]
#![deny(explicit_outlives_requirements, keyword_idents, let_underscore_drop)]
#![deny(macro_use_extern_crate, meta_variable_misuse, missing_abi, non_ascii_idents)]
#![deny(rust_2021_incompatible_closure_captures, rust_2021_incompatible_or_patterns)]
#![deny(rust_2021_prefixes_incompatible_syntax, rust_2021_prelude_collisions)]
#![deny(single_use_lifetimes, trivial_casts, unsafe_op_in_unsafe_fn, unstable_features)]
#![deny(unused_extern_crates, unused_import_braces, unused_lifetimes, unused_macro_rules)]
//
#![doc = include_str!("../README.md")]


// Implements the key-material arithmetic of CRYSTALS-Kyber / FIPS 203 Module-Lattice-Based
// Key-Encapsulation Mechanism: ring and NTT arithmetic, seed expansion, noise sampling, key
// generation and the shared-secret inner product. No encapsulation or byte encodings.
// See <https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.203.pdf>

// Functionality map per FIPS 203
//
// Algorithm 7 SampleNTT(B) on page 23                       --> hashing.rs (+ conversion.rs)
// Algorithm 8 SamplePolyCBD_η(B) on page 23                 --> conversion.rs
// Algorithm 9 NTT(f) on page 26                             --> ntt.rs
// Algorithm 10 NTT^{-1}(f_hat) on page 26                   --> ntt.rs
// Algorithm 11 MultiplyNTTs(f_hat, g_hat) on page 27        --> ntt.rs
// Algorithm 12 BaseCaseMultiply(a0,a1,b0,b1,γ) on page 27   --> ntt.rs
// Algorithm 13 K-PKE.KeyGen(d) on page 29, lines 1-18       --> kex.rs, split into matrix,
//                                                               error and private key steps
// Functions G, PRF_η and XOF of section 4.1                 --> hashing.rs
// Montgomery and Barrett reduction                          --> helpers.rs
// Shared secret Σ t_hat[i]·s_hat[i]                         --> kex.rs
// Types are in types.rs, traits are in traits.rs...

// Note that debug_assert! statements enforce correct program construction and are not involved
// in any operational dataflow. The ensure! statements implement conservative dataflow
// validation and do not panic. Vector length mismatches (ShapeMismatch) are contract
// violations and do panic. Everything lives on the stack; vectors carry a fixed capacity of
// four polynomials plus a runtime length `k`.

/// The `rand_core` types are re-exported so that users of kyber-kex do not
/// have to worry about using the exact correct version of `rand_core`.
pub use rand_core::{CryptoRng, Error as RngError, RngCore};

mod conversion;
mod hashing;
mod helpers;
mod kex;
mod ntt;
mod types;

/// All functionality is covered by traits, such that each parameter set shares one interface.
pub mod traits;

pub use crate::kex::{
    calculate_shared_secret, generate_error, generate_error_from_seed, generate_matrix,
    generate_matrix_from_seed, generate_private_key, generate_private_key_from_seed,
    generate_public_key,
};
pub use crate::types::{
    Error, ErrorVector, NttMatrix, NttPoly, NttVector, ParamSet, Poly, PolyVec, PrivateKey,
    PublicKey, SharedSecret, Vector,
};

// Applies across all security parameter sets
const Q: i16 = 3329; // 13·256 + 1
const N: usize = 256; // polynomial degree
const MAX_K: usize = 4; // largest module rank, sizes all stack storage


// This common functionality is injected into each security parameter set namespace, and is
// a lightweight wrapper into the kex functions via the `KeyGen` trait.
macro_rules! functionality {
    () => {
        use crate::traits::KeyGen;
        use crate::types::{
            Error, ErrorVector, NttMatrix, ParamSet, PrivateKey, PublicKey, SharedSecret,
        };
        use rand_core::CryptoRngCore;
        use zeroize::{Zeroize, ZeroizeOnDrop};


        // ----- 'EXTERNAL' DATA TYPES -----

        /// Empty struct to carry the [`crate::traits::KeyGen`] trait for this security
        /// parameter set.
        #[derive(Zeroize, ZeroizeOnDrop)]
        pub struct KG();

        impl KeyGen for KG {
            const PARAMS: ParamSet = PARAM_SET;
        }


        // ----- PRIMARY FUNCTIONS ---

        /// Generates the public matrix `A_hat` and its transpose for this security parameter
        /// set, using the **default OS** random number generator. Both matrices are expanded
        /// from the same public seed, so `at == a.transpose()`.
        ///
        /// # Errors
        /// Returns an error if the random number generator fails.
        #[cfg(feature = "default-rng")]
        pub fn try_generate_matrix() -> Result<(NttMatrix, NttMatrix), Error> {
            KG::try_generate_matrix()
        }


        /// Generates the public matrix `A_hat` and its transpose for this security parameter
        /// set, using a supplied random number generator.
        ///
        /// # Errors
        /// Returns an error if the random number generator fails.
        pub fn try_generate_matrix_with_rng(
            rng: &mut impl CryptoRngCore,
        ) -> Result<(NttMatrix, NttMatrix), Error> {
            KG::try_generate_matrix_with_rng(rng)
        }


        /// Generates the public matrix `A_hat` and its transpose from 32 coin bytes.
        ///
        /// # Errors
        /// Propagates internal errors.
        pub fn generate_matrix_from_seed(d: &[u8; 32]) -> Result<(NttMatrix, NttMatrix), Error> {
            KG::generate_matrix_from_seed(d)
        }


        /// Generates an NTT-domain error vector using the **default OS** random number
        /// generator.
        ///
        /// # Errors
        /// Returns an error if the random number generator fails.
        #[cfg(feature = "default-rng")]
        pub fn try_generate_error() -> Result<ErrorVector, Error> { KG::try_generate_error() }


        /// Generates an NTT-domain error vector using a supplied random number generator.
        ///
        /// # Errors
        /// Returns an error if the random number generator fails.
        pub fn try_generate_error_with_rng(rng: &mut impl CryptoRngCore) -> Result<ErrorVector, Error> {
            KG::try_generate_error_with_rng(rng)
        }


        /// Generates an NTT-domain error vector from 32 coin bytes.
        #[must_use]
        pub fn generate_error_from_seed(d: &[u8; 32]) -> ErrorVector { KG::generate_error_from_seed(d) }


        /// Generates a private key using the **default OS** random number generator.
        ///
        /// # Errors
        /// Returns an error if the random number generator fails.
        #[cfg(feature = "default-rng")]
        pub fn try_generate_private_key() -> Result<PrivateKey, Error> { KG::try_generate_private_key() }


        /// Generates a private key using a supplied random number generator.
        ///
        /// # Errors
        /// Returns an error if the random number generator fails.
        pub fn try_generate_private_key_with_rng(
            rng: &mut impl CryptoRngCore,
        ) -> Result<PrivateKey, Error> {
            KG::try_generate_private_key_with_rng(rng)
        }


        /// Generates a private key from 32 coin bytes.
        #[must_use]
        pub fn generate_private_key_from_seed(d: &[u8; 32]) -> PrivateKey {
            KG::generate_private_key_from_seed(d)
        }


        /// Computes the public key `A_hat∘s_hat + e_hat`. Pass the matrix to one party and
        /// its transpose to the other.
        ///
        /// # Panics
        /// `ShapeMismatch` when an operand was built for a different parameter set.
        #[must_use]
        pub fn generate_public_key(
            a_hat: &NttMatrix, s_hat: &PrivateKey, e_hat: &ErrorVector,
        ) -> PublicKey {
            KG::generate_public_key(a_hat, s_hat, e_hat)
        }


        /// Computes the shared secret from a peer public key and our private key.
        ///
        /// # Panics
        /// `ShapeMismatch` when a key was built for a different parameter set.
        #[must_use]
        pub fn calculate_shared_secret(pk: &PublicKey, sk: &PrivateKey) -> SharedSecret {
            KG::calculate_shared_secret(pk, sk)
        }


    };
}


/// # Functionality for the **Kyber-512** security parameter set.
///
/// Module rank `k = 2` with secret and error noise drawn from CBD with `η1 = 3`. Claimed to be
/// in security strength category 1.
///
/// Two parties share the matrix seed: one generates the public key with [`kyber_512::generate_public_key`]
/// against `A_hat`, the other against its transpose, each from its own private key and error
/// vector. Each party then calls [`kyber_512::calculate_shared_secret`] on the peer public key and
/// its own private key; the two results agree up to small noise.
///
/// See the top-level [crate] documentation for example code that implements the above flow.
#[cfg(feature = "kyber-512")]
pub mod kyber_512 {
    /// The parameter set of this namespace.
    pub const PARAM_SET: super::ParamSet = super::ParamSet::KYBER_512;

    functionality!();
}


/// # Functionality for the **Kyber-768** security parameter set.
///
/// Module rank `k = 3` with secret and error noise drawn from CBD with `η1 = 2`. Claimed to be
/// in security strength category 3.
///
/// See the [`kyber_512`] namespace documentation for the two-party flow, which is identical.
#[cfg(feature = "kyber-768")]
pub mod kyber_768 {
    /// The parameter set of this namespace.
    pub const PARAM_SET: super::ParamSet = super::ParamSet::KYBER_768;

    functionality!();
}


/// # Functionality for the **Kyber-1024** security parameter set.
///
/// Module rank `k = 4` with secret and error noise drawn from CBD with `η1 = 2`. Claimed to be
/// in security strength category 5.
///
/// See the [`kyber_512`] namespace documentation for the two-party flow, which is identical.
#[cfg(feature = "kyber-1024")]
pub mod kyber_1024 {
    /// The parameter set of this namespace.
    pub const PARAM_SET: super::ParamSet = super::ParamSet::KYBER_1024;

    functionality!();
}
