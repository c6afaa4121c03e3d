//! Closed-form unit-norm gain
//!
//! Given the decoded pulse vector and the prediction vector, solves
//! `Ryy*g^2 + 2*Ryp*g + (Rpp - 1) = 0` for the positive root and emits
//! `X = P + g*y` with unit energy. Both encoder and decoder finish a band
//! through this one routine, so the incremental estimates used during the
//! search can never leak into the reconstruction.

use crate::constants::{MAX_BAND_SIZE, MAX_PULSES};
use crate::error::{BandError, Result};
use crate::math::{
    acc_add, acc_sub, add_coef, apply_gain, exceeds_unit_energy, mac, mult, pulse_coef,
    pulse_shift, round14, unit_gain, Coef, ACC_ZERO, COEF_ZERO,
};

/// Validate the shared quantizer preconditions
pub(crate) fn check_band(n: usize, p_len: usize, k: u32) -> Result<()> {
    if n == 0 || n > MAX_BAND_SIZE {
        return Err(BandError::InvalidBandWidth {
            n,
            max: MAX_BAND_SIZE,
        });
    }
    if p_len != n {
        return Err(BandError::LengthMismatch {
            expected: n,
            actual: p_len,
        });
    }
    if k == 0 {
        return Err(BandError::ZeroPulseBudget);
    }
    if k > MAX_PULSES {
        return Err(BandError::PulseBudgetTooLarge { k, max: MAX_PULSES });
    }
    Ok(())
}

/// Mix the prediction vector with a gained pulse vector: `X = P + g*y`
///
/// `iy` must hold exactly `k` pulses. The output overwrites `x` and has
/// unit energy within the numeric back-end's rounding tolerance.
pub fn mix_prediction(x: &mut [Coef], iy: &[i32], p: &[Coef], k: u32) -> Result<()> {
    let n = x.len();
    check_band(n, p.len(), k)?;
    if iy.len() != n {
        return Err(BandError::LengthMismatch {
            expected: n,
            actual: iy.len(),
        });
    }

    let yshift = pulse_shift(k);

    let mut rpp = ACC_ZERO;
    for &pj in p.iter() {
        rpp = mac(rpp, pj, pj);
    }
    let rpp = round14(rpp);
    assert!(
        !exceeds_unit_energy(rpp),
        "prediction vector energy exceeds unity: upstream normalization is corrupt"
    );

    let mut y = vec![COEF_ZERO; n];
    for (yj, &count) in y.iter_mut().zip(iy.iter()) {
        *yj = pulse_coef(count, yshift);
    }

    let mut ryp = ACC_ZERO;
    let mut ryy = ACC_ZERO;
    for (yj, pj) in y.iter().zip(p.iter()) {
        ryp = mac(ryp, *yj, *pj);
        ryy = mac(ryy, *yj, *yj);
    }
    debug_assert!(ryy > ACC_ZERO, "K >= 1 guarantees nonzero pulse energy");

    let ryp_r = round14(ryp);
    let ryy_r = round14(ryy);
    let disc = acc_sub(acc_add(mult(ryp_r, ryp_r), ryy), mult(ryy_r, rpp));
    let g = unit_gain(disc, ryp_r, ryy_r);

    for ((xj, pj), yj) in x.iter_mut().zip(p.iter()).zip(y.iter()) {
        *xj = add_coef(*pj, apply_gain(*yj, g));
    }
    Ok(())
}
