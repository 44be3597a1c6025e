// This file implements the byte-to-coefficient conversions behind sampling: the 12-bit
// candidate split of `SampleNTT` and the centered binomial distribution `SamplePolyCBD`.

use crate::types::Poly;
use crate::N;


/// Lines 6-7 of FIPS 203 Algorithm 7 `SampleNTT`.
/// Splits three XOF bytes into two 12-bit rejection-sampling candidates. The caller accepts
/// each candidate strictly below q; operates on public data only.
///
/// **Input**:  A byte array of length three, representing bytes `C[0]`, `C[1]`, `C[2]`.<br>
/// **Output**: Two integers in `[0, 4095]`.
pub(crate) fn coeffs_from_three_bytes(c: [u8; 3]) -> [i16; 2] {
    // 6: d1 ← C[0] + 256 · (C[1] mod 16)
    let d1 = i16::from(c[0]) | (i16::from(c[1] & 0x0F) << 8);

    // 7: d2 ← ⌊C[1]/16⌋ + 16 · C[2]
    let d2 = i16::from(c[1] >> 4) | (i16::from(c[2]) << 4);

    [d1, d2]
}


/// # Algorithm 8 `SamplePolyCBD_η(B)` of FIPS 203, for `η = 2`.
/// Samples a polynomial with coefficients in `[−2, 2]` from 128 bytes: each coefficient
/// consumes 4 bits, two for `x` and two for `y`. Bit-sliced and branch-free.
///
/// **Input**:  `B ∈ B^{128}`. <br>
/// **Output**: `f ∈ R_q`, coefficients `x − y` in `[−2, 2]`.
#[allow(clippy::cast_possible_truncation)] // masked to 2 bits
pub(crate) fn cbd2(bytes: &[u8; 2 * N / 4]) -> Poly {
    let mut f = [0i16; N];
    for (i, chunk) in bytes.chunks_exact(4).enumerate() {
        let t = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        // every 2-bit lane now holds the popcount of the corresponding input lane
        let d = (t & 0x5555_5555) + ((t >> 1) & 0x5555_5555);
        for j in 0..8 {
            let x = ((d >> (4 * j)) & 0x03) as i16;
            let y = ((d >> (4 * j + 2)) & 0x03) as i16;
            f[8 * i + j] = x - y;
        }
    }
    Poly(f)
}


/// # Algorithm 8 `SamplePolyCBD_η(B)` of FIPS 203, for `η = 3`.
/// Samples a polynomial with coefficients in `[−3, 3]` from 192 bytes: each coefficient
/// consumes 6 bits, three for `x` and three for `y`. Bit-sliced and branch-free.
///
/// **Input**:  `B ∈ B^{192}`. <br>
/// **Output**: `f ∈ R_q`, coefficients `x − y` in `[−3, 3]`.
#[allow(clippy::cast_possible_truncation)] // masked to 3 bits
pub(crate) fn cbd3(bytes: &[u8; 3 * N / 4]) -> Poly {
    let mut f = [0i16; N];
    for (i, chunk) in bytes.chunks_exact(3).enumerate() {
        let t = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], 0]);
        let d = (t & 0x0024_9249) + ((t >> 1) & 0x0024_9249) + ((t >> 2) & 0x0024_9249);
        for j in 0..4 {
            let x = ((d >> (6 * j)) & 0x07) as i16;
            let y = ((d >> (6 * j + 3)) & 0x07) as i16;
            f[4 * i + j] = x - y;
        }
    }
    Poly(f)
}
