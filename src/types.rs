use crate::helpers;
use crate::{MAX_K, N};
use core::ops::Index;
use zeroize::{Zeroize, ZeroizeOnDrop};


/// Errors surfaced by the fallible key-material operations. All of them are terminal for the
/// call in progress; no partial results are returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The secure random number generator failed to supply bytes.
    #[error("random number generator failed")]
    RandomnessUnavailable,
    /// The extendable-output function did not yield enough acceptable samples within the
    /// rejection-sampling ceiling. Never occurs with a correct XOF.
    #[error("XOF output exhausted the rejection sampling ceiling")]
    XofFailure,
    /// A security parameter outside of `{2, 3, 4}` was requested.
    #[error("unsupported security parameter k = {0}; expected 2, 3 or 4")]
    InvalidParameter(usize),
}


/// Security parameter set. `k` fixes the module rank (vector length and matrix dimension);
/// `eta1` is the centered binomial parameter of the secret and error noise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamSet {
    k: usize,
    eta1: u8,
}

impl ParamSet {
    /// Kyber-512: `k = 2`, `η1 = 3`.
    pub const KYBER_512: Self = Self { k: 2, eta1: 3 };
    /// Kyber-768: `k = 3`, `η1 = 2`.
    pub const KYBER_768: Self = Self { k: 3, eta1: 2 };
    /// Kyber-1024: `k = 4`, `η1 = 2`.
    pub const KYBER_1024: Self = Self { k: 4, eta1: 2 };

    /// Selects the parameter set for module rank `k`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] when `k` is not 2, 3 or 4.
    pub const fn try_from_k(k: usize) -> Result<Self, Error> {
        match k {
            2 => Ok(Self::KYBER_512),
            3 => Ok(Self::KYBER_768),
            4 => Ok(Self::KYBER_1024),
            _ => Err(Error::InvalidParameter(k)),
        }
    }

    /// Module rank.
    #[must_use]
    pub const fn k(&self) -> usize { self.k }

    /// Noise parameter of the centered binomial distribution.
    #[must_use]
    pub const fn eta1(&self) -> u8 { self.eta1 }
}


pub(crate) trait Zero {
    fn zero() -> Self;
}


/// A ring element of `R_q = Z_q[X]/(X^256 + 1)` in the normal (coefficient) domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroize)]
pub struct Poly(pub(crate) [i16; N]);

/// A ring element in the NTT domain `T_q`: 128 degree-one residues in bit-reversed order.
/// Only produced by the forward transform, by the matrix sampler, or by NTT-domain arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroize)]
pub struct NttPoly(pub(crate) [i16; N]);

impl Zero for Poly {
    fn zero() -> Self { Self([0i16; N]) }
}

impl Zero for NttPoly {
    fn zero() -> Self { Self([0i16; N]) }
}


impl Poly {
    /// Wraps raw coefficients. Any `i16` values are accepted; they are read modulo q.
    #[must_use]
    pub const fn from_coeffs(coeffs: [i16; N]) -> Self { Self(coeffs) }

    /// Coefficients as currently represented (not necessarily canonical).
    #[must_use]
    pub const fn coeffs(&self) -> &[i16; N] { &self.0 }

    /// Reduces every coefficient into `[0, q)`.
    pub fn reduce(&mut self) { self.0.iter_mut().for_each(|c| *c = helpers::full_reduce(*c)); }

    /// Multiplies every coefficient by the Montgomery radix `2^16`; results lie in `(-q, q)`.
    pub fn to_mont(&mut self) { self.0.iter_mut().for_each(|c| *c = helpers::to_mont(*c)); }

    /// Forward Number-Theoretic Transform into the NTT domain.
    #[must_use]
    pub fn ntt(&self) -> NttPoly { crate::ntt::ntt(self) }
}


impl NttPoly {
    /// Coefficients as currently represented (not necessarily canonical).
    #[must_use]
    pub const fn coeffs(&self) -> &[i16; N] { &self.0 }

    /// Reduces every coefficient into `[0, q)`.
    pub fn reduce(&mut self) { self.0.iter_mut().for_each(|c| *c = helpers::full_reduce(*c)); }

    /// Multiplies every coefficient by the Montgomery radix `2^16`; results lie in `(-q, q)`.
    /// Restores normal scale after [`NttPoly::basemul_montgomery`] or
    /// [`PolyVec::pointwise_acc_montgomery`].
    pub fn to_mont(&mut self) { self.0.iter_mut().for_each(|c| *c = helpers::to_mont(*c)); }

    /// Inverse Number-Theoretic Transform back to the normal domain, exact modulo q.
    #[must_use]
    pub fn inv_ntt(&self) -> Poly { crate::ntt::inv_ntt(self) }

    /// NTT-domain product scaled by `2^{-16}`; follow with [`NttPoly::to_mont`] for the
    /// true product.
    #[must_use]
    pub fn basemul_montgomery(&self, other: &Self) -> Self { crate::ntt::multiply_ntts(self, other) }
}


/// An ordered vector of exactly `k` ring elements sharing the domain `P`. Storage is fixed
/// at the largest supported `k`; slots past `len` stay zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolyVec<P> {
    pub(crate) polys: [P; MAX_K],
    pub(crate) len: usize,
}

/// Vector of normal-domain polynomials.
pub type Vector = PolyVec<Poly>;

/// Vector of NTT-domain polynomials.
pub type NttVector = PolyVec<NttPoly>;


impl<P> PolyVec<P> {
    /// Number of polynomials, i.e. `k`.
    #[must_use]
    pub const fn len(&self) -> usize { self.len }

    /// Always false for vectors built by this crate.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.len == 0 }

    /// The `k` polynomials as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[P] { &self.polys[..self.len] }

    /// Iterates over the `k` polynomials.
    pub fn iter(&self) -> core::slice::Iter<'_, P> { self.as_slice().iter() }

    fn assert_same_shape(&self, other: &Self) {
        assert!(
            self.len == other.len,
            "ShapeMismatch: vector of length {} combined with vector of length {}",
            self.len, other.len
        );
    }
}

impl<P> Index<usize> for PolyVec<P> {
    type Output = P;

    fn index(&self, index: usize) -> &P { &self.as_slice()[index] }
}

impl<'a, P> IntoIterator for &'a PolyVec<P> {
    type IntoIter = core::slice::Iter<'a, P>;
    type Item = &'a P;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<P: Zeroize> Zeroize for PolyVec<P> {
    fn zeroize(&mut self) { self.polys.iter_mut().for_each(Zeroize::zeroize); }
}


// Shape-checked arithmetic common to both domains
macro_rules! vector_ops {
    ($poly:ty) => {
        impl PolyVec<$poly> {
            pub(crate) fn from_fn(k: usize, mut f: impl FnMut(usize) -> $poly) -> Self {
                debug_assert!((2..=MAX_K).contains(&k), "PolyVec: bad k");
                let mut polys = [<$poly as Zero>::zero(); MAX_K];
                polys.iter_mut().take(k).enumerate().for_each(|(i, p)| *p = f(i));
                Self { polys, len: k }
            }

            /// Builds a vector from 2, 3 or 4 polynomials.
            ///
            /// # Errors
            /// Returns [`Error::InvalidParameter`] on any other length.
            pub fn try_from_polys(polys: &[$poly]) -> Result<Self, Error> {
                helpers::ensure!((2..=MAX_K).contains(&polys.len()), Error::InvalidParameter(polys.len()));
                Ok(Self::from_fn(polys.len(), |i| polys[i]))
            }

            /// Element-wise in-place addition `self += other` modulo q. Accepts any `i16`
            /// coefficients; results lie in `[-(q-1), q-1]`.
            ///
            /// # Panics
            /// `ShapeMismatch` when the vector lengths differ.
            pub fn add(&mut self, other: &Self) {
                self.assert_same_shape(other);
                self.polys
                    .iter_mut()
                    .zip(other.iter())
                    .for_each(|(a, b)| helpers::add_coeffs(&mut a.0, &b.0));
            }

            /// Reduces every coefficient of every element into `[0, q)`.
            pub fn reduce(&mut self) { self.polys.iter_mut().take(self.len).for_each(<$poly>::reduce); }
        }
    };
}

vector_ops!(Poly);
vector_ops!(NttPoly);


impl PolyVec<Poly> {
    /// Forward NTT of every element.
    #[must_use]
    pub fn ntt(&self) -> NttVector { NttVector::from_fn(self.len, |i| self.polys[i].ntt()) }
}

impl PolyVec<NttPoly> {
    /// Inverse NTT of every element.
    #[must_use]
    pub fn inv_ntt(&self) -> Vector { Vector::from_fn(self.len, |i| self.polys[i].inv_ntt()) }

    /// Inner product `Σ self[i]·other[i]` in the NTT domain, each product Montgomery-reduced
    /// and the sum Barrett-reduced. The result carries a `2^{-16}` factor and still needs
    /// [`NttPoly::to_mont`] and [`NttPoly::reduce`].
    ///
    /// # Panics
    /// `ShapeMismatch` when the vector lengths differ.
    #[must_use]
    pub fn pointwise_acc_montgomery(&self, other: &Self) -> NttPoly {
        self.assert_same_shape(other);
        crate::ntt::pointwise_acc_montgomery(self.as_slice(), other.as_slice())
    }
}


/// A `k × k` matrix of NTT-domain polynomials, sampled uniformly from a public seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NttMatrix {
    pub(crate) rows: [NttVector; MAX_K],
    pub(crate) len: usize,
}

impl NttMatrix {
    pub(crate) fn zero(k: usize) -> Self {
        Self { rows: core::array::from_fn(|_| NttVector::from_fn(k, |_| NttPoly::zero())), len: k }
    }

    /// Number of rows (and columns), i.e. `k`.
    #[must_use]
    pub const fn len(&self) -> usize { self.len }

    /// Always false for matrices built by this crate.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.len == 0 }

    /// The `k` rows as a slice.
    #[must_use]
    pub fn rows(&self) -> &[NttVector] { &self.rows[..self.len] }

    /// Returns the transpose, `t[j][i] = self[i][j]`.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut t = Self::zero(self.len);
        for (i, row) in self.rows().iter().enumerate() {
            for (j, poly) in row.iter().enumerate() {
                t.rows[j].polys[i] = *poly;
            }
        }
        t
    }
}

impl Index<usize> for NttMatrix {
    type Output = NttVector;

    fn index(&self, index: usize) -> &NttVector { &self.rows()[index] }
}


/// Private key `ŝ`: an NTT-domain vector with canonical coefficients. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub(crate) NttVector);

/// Public key `t̂ = Â∘ŝ + ê`: an NTT-domain vector with canonical coefficients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey(pub(crate) NttVector);

/// Error term `ê`: an NTT-domain noise vector. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ErrorVector(pub(crate) NttVector);

/// Shared secret: a single NTT-domain ring element with canonical coefficients. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(pub(crate) NttPoly);


impl PrivateKey {
    /// The underlying NTT-domain vector.
    #[must_use]
    pub const fn as_vector(&self) -> &NttVector { &self.0 }
}

impl PublicKey {
    /// The underlying NTT-domain vector.
    #[must_use]
    pub const fn as_vector(&self) -> &NttVector { &self.0 }
}

impl ErrorVector {
    /// The underlying NTT-domain vector.
    #[must_use]
    pub const fn as_vector(&self) -> &NttVector { &self.0 }
}

impl SharedSecret {
    /// The underlying NTT-domain ring element.
    #[must_use]
    pub const fn as_ntt_poly(&self) -> &NttPoly { &self.0 }
}
