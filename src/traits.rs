use crate::kex;
use crate::types::{Error, ErrorVector, NttMatrix, ParamSet, PrivateKey, PublicKey, SharedSecret};
use rand_core::CryptoRngCore;
#[cfg(feature = "default-rng")]
use rand_core::OsRng;


/// The `KeyGen` trait carries every key-material operation for one security parameter set,
/// fixed by the associated [`KeyGen::PARAMS`] constant. Each parameter-set namespace provides
/// an implementing `KG` struct.
pub trait KeyGen {
    /// The security parameter set, e.g., Kyber-512, Kyber-768 or Kyber-1024.
    const PARAMS: ParamSet;

    /// Generates the public matrix `A_hat` and its transpose, using the OS default random
    /// number generator.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails; propagates internal errors.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(all(feature = "kyber-768", feature = "default-rng"))] {
    /// use kyber_kex::kyber_768; // Could also be kyber_512 or kyber_1024.
    /// use kyber_kex::traits::KeyGen;
    ///
    /// let (a, at) = kyber_768::KG::try_generate_matrix()?;
    /// assert_eq!(at, a.transpose());
    /// # }
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    fn try_generate_matrix() -> Result<(NttMatrix, NttMatrix), Error> {
        Self::try_generate_matrix_with_rng(&mut OsRng)
    }

    /// Generates the public matrix `A_hat` and its transpose, using a supplied random number
    /// generator.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails; propagates internal errors.
    fn try_generate_matrix_with_rng(
        rng: &mut impl CryptoRngCore,
    ) -> Result<(NttMatrix, NttMatrix), Error> {
        kex::generate_matrix(rng, &Self::PARAMS)
    }

    /// Generates the public matrix `A_hat` and its transpose from 32 coin bytes.
    ///
    /// # Errors
    /// Propagates internal errors.
    fn generate_matrix_from_seed(d: &[u8; 32]) -> Result<(NttMatrix, NttMatrix), Error> {
        kex::generate_matrix_from_seed(&Self::PARAMS, d)
    }

    /// Generates an NTT-domain error vector, using the OS default random number generator.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails.
    #[cfg(feature = "default-rng")]
    fn try_generate_error() -> Result<ErrorVector, Error> { Self::try_generate_error_with_rng(&mut OsRng) }

    /// Generates an NTT-domain error vector, using a supplied random number generator.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails.
    fn try_generate_error_with_rng(rng: &mut impl CryptoRngCore) -> Result<ErrorVector, Error> {
        kex::generate_error(rng, &Self::PARAMS)
    }

    /// Generates an NTT-domain error vector from 32 coin bytes.
    #[must_use]
    fn generate_error_from_seed(d: &[u8; 32]) -> ErrorVector {
        kex::generate_error_from_seed(&Self::PARAMS, d)
    }

    /// Generates a private key, using the OS default random number generator.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// # #[cfg(all(feature = "kyber-512", feature = "default-rng"))] {
    /// use kyber_kex::kyber_512;
    /// use kyber_kex::traits::KeyGen;
    ///
    /// let sk = kyber_512::KG::try_generate_private_key()?;
    /// assert_eq!(sk.as_vector().len(), 2);
    /// # }
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    fn try_generate_private_key() -> Result<PrivateKey, Error> {
        Self::try_generate_private_key_with_rng(&mut OsRng)
    }

    /// Generates a private key, using a supplied random number generator.
    ///
    /// # Errors
    /// Returns an error when the random number generator fails.
    fn try_generate_private_key_with_rng(rng: &mut impl CryptoRngCore) -> Result<PrivateKey, Error> {
        kex::generate_private_key(rng, &Self::PARAMS)
    }

    /// Generates a private key from 32 coin bytes.
    #[must_use]
    fn generate_private_key_from_seed(d: &[u8; 32]) -> PrivateKey {
        kex::generate_private_key_from_seed(&Self::PARAMS, d)
    }

    /// Computes the public key `A_hat∘s_hat + e_hat`.
    ///
    /// # Panics
    /// `ShapeMismatch` when an operand was built for a different parameter set.
    #[must_use]
    fn generate_public_key(a_hat: &NttMatrix, s_hat: &PrivateKey, e_hat: &ErrorVector) -> PublicKey {
        kex::generate_public_key(&Self::PARAMS, a_hat, s_hat, e_hat)
    }

    /// Computes the shared secret from a peer public key and our private key.
    ///
    /// # Panics
    /// `ShapeMismatch` when a key was built for a different parameter set.
    #[must_use]
    fn calculate_shared_secret(pk: &PublicKey, sk: &PrivateKey) -> SharedSecret {
        kex::calculate_shared_secret(&Self::PARAMS, pk, sk)
    }
}
