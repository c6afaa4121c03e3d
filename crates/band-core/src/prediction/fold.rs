//! Spectral folding
//!
//! Side-information-free prediction fallback: when no lag index is
//! transmitted, the band is filled from lower-frequency history instead.
//! Wide reference spectra fold downward in reversed, stride-interleaved
//! order; narrow ones are copied directly. The result is normalized at full
//! strength (no confidence table) and always substitutes the whole band.

use crate::constants::MAX_BAND_SIZE;
use crate::error::{BandError, Result};
use crate::math::{apply_scale, mac, norm_scale, Coef, COEF_ZERO, EPSILON, GAIN_ONE};

/// Fill `p` and `x` from the reference spectrum `y`
///
/// `n0` is the reference width and `n_max` the maximum reference width; the
/// interleaved fold is taken when `n0 >= n_max/2` (boundary inclusive),
/// otherwise the first `n` reference samples are copied.
pub fn spectral_fold(
    x: &mut [Coef],
    y: &[Coef],
    p: &mut [Coef],
    stride: usize,
    n0: usize,
    n_max: usize,
) -> Result<()> {
    let n = x.len();
    if n == 0 || n > MAX_BAND_SIZE || stride == 0 {
        return Err(BandError::InvalidBandWidth {
            n,
            max: MAX_BAND_SIZE,
        });
    }
    if p.len() != n {
        return Err(BandError::LengthMismatch {
            expected: n,
            actual: p.len(),
        });
    }
    if n0 > n_max {
        return Err(BandError::LengthMismatch {
            expected: n_max,
            actual: n0,
        });
    }

    for pj in p.iter_mut() {
        *pj = COEF_ZERO;
    }

    let mut e = EPSILON;
    if n0 >= n_max >> 1 {
        // Reversed fold, one shape per interleaved stride lane.
        let rows = n / stride;
        if rows > n_max - n0 {
            return Err(BandError::HistoryTooShort {
                needed: rows,
                actual: n_max - n0,
            });
        }
        if y.len() < (n_max - n0) * stride {
            return Err(BandError::HistoryTooShort {
                needed: (n_max - n0) * stride,
                actual: y.len(),
            });
        }
        for i in 0..stride {
            for j in 0..rows {
                let v = y[(n_max - n0 - j - 1) * stride + i];
                p[j * stride + i] = v;
                e = mac(e, v, v);
            }
        }
    } else {
        if y.len() < n {
            return Err(BandError::HistoryTooShort {
                needed: n,
                actual: y.len(),
            });
        }
        for (pj, &v) in p.iter_mut().zip(y.iter()) {
            *pj = v;
            e = mac(e, v, v);
        }
    }

    // Full-strength normalization: folding is a complete substitute, so
    // there is no confidence shrink here.
    let scale = norm_scale(GAIN_ONE, e);
    for pj in p.iter_mut() {
        *pj = apply_scale(scale, *pj);
    }
    x.copy_from_slice(p);
    Ok(())
}
