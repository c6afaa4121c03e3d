//! Long-term prediction over coded spectral history
//!
//! The encoder scans up to [`MAX_INTRA`] stride-aligned windows of the
//! history buffer, each read in reversed order, and keeps the one with the
//! best normalized correlation against the band target. Side information is
//! one polarity bit plus the window index; the decoder re-derives the same
//! prediction vector from those two fields alone, so the reversed read and
//! the confidence scaling here must stay bit-identical on both sides.

use tracing::trace;

use crate::bitstream::{BitReader, BitWriter};
use crate::constants::{LOG_MAX_INTRA, MAX_BAND_SIZE, MAX_INTRA, MAX_PULSES};
use crate::error::{BandError, Result};
use crate::math::{
    apply_scale, cross_mul_gt, mac, mult, neg_coef, norm_scale, round14, sub_coef, Coef,
    ACC_ZERO, COEF_ONE, COEF_ZERO, EPSILON, NEG_HUGE,
};
use crate::tables::PG;

/// Transmitted lag selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LagChoice {
    /// Start offset of the winning window in the history buffer
    pub offset: usize,
    /// Whether the window is applied with inverted polarity
    pub flipped: bool,
}

/// Validate band geometry and return the candidate window count
fn check_geometry(
    n: usize,
    p_len: usize,
    n0: usize,
    stride: usize,
    k: u32,
) -> Result<usize> {
    if n == 0 || n > MAX_BAND_SIZE || stride == 0 {
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
    if k > MAX_PULSES {
        return Err(BandError::PulseBudgetTooLarge { k, max: MAX_PULSES });
    }

    // Candidate count per the transmission contract, additionally clamped so
    // every reversed window read stays inside the history buffer.
    let mut max_pos = n0.saturating_sub(n / stride).min(MAX_INTRA);
    if n0 >= n {
        max_pos = max_pos.min((n0 - n) / stride + 1);
    } else {
        max_pos = 0;
    }
    if max_pos == 0 {
        return Err(BandError::HistoryTooShort {
            needed: n.max(n / stride + 1),
            actual: n0,
        });
    }
    Ok(max_pos)
}

/// Rebuild the prediction vector for a chosen window
///
/// Shared by encoder and decoder: reversed read, optional polarity flip,
/// then scaling to `pg[min(K,10)] / sqrt(energy)`.
fn shape_prediction(y_hist: &[Coef], p: &mut [Coef], offset: usize, flipped: bool, k: u32) {
    let n = p.len();
    let pred_gain = PG[(k as usize).min(10)];

    let mut e = EPSILON;
    for (j, pj) in p.iter_mut().enumerate() {
        let w = y_hist[offset + n - j - 1];
        let v = if flipped { neg_coef(w) } else { w };
        *pj = v;
        e = mac(e, v, v);
    }

    let scale = norm_scale(pred_gain, e);
    for pj in p.iter_mut() {
        *pj = apply_scale(scale, *pj);
    }
}

/// Search the history for the best prediction window and transmit it
///
/// Writes the polarity bit and window index, fills `p` with the scaled
/// prediction, and leaves the residual in `x` (`x -= P`); with `k == 0`
/// the prediction is the entire band and `x := P`.
pub fn predict(
    x: &mut [Coef],
    y_hist: &[Coef],
    p: &mut [Coef],
    stride: usize,
    k: u32,
    writer: &mut BitWriter,
) -> Result<LagChoice> {
    let n = x.len();
    let n0 = y_hist.len();
    let max_pos = check_geometry(n, p.len(), n0, stride, k)?;

    let mut best = 0usize;
    let mut best_num = NEG_HUGE;
    let mut best_den = COEF_ZERO;
    let mut corr = COEF_ONE;

    let mut offset = 0usize;
    while offset < max_pos * stride {
        let mut xy = ACC_ZERO;
        let mut yy = ACC_ZERO;
        for j in 0..n {
            let w = y_hist[offset + n - j - 1];
            xy = mac(xy, x[j], w);
            yy = mac(yy, w, w);
        }
        // Score by xy^2/yy, compared without the division.
        let xy_r = round14(xy);
        let num = mult(xy_r, xy_r);
        let den = round14(yy);
        if cross_mul_gt(best_den, num, den, best_num) {
            best_num = num;
            best_den = den;
            best = offset;
            // Keep the raw correlation; only its sign is transmitted.
            corr = xy_r;
        }
        offset += stride;
    }

    let flipped = corr < COEF_ZERO;
    writer.write_bits(u32::from(flipped), 1);
    let index = (best / stride) as u32;
    if max_pos == MAX_INTRA {
        writer.write_bits(index, LOG_MAX_INTRA);
    } else {
        writer.write_uint(index, max_pos as u32);
    }
    trace!(offset = best, flipped, max_pos, "long-term predictor selected lag");

    shape_prediction(y_hist, p, best, flipped, k);

    if k > 0 {
        for (xj, pj) in x.iter_mut().zip(p.iter()) {
            *xj = sub_coef(*xj, *pj);
        }
    } else {
        x.copy_from_slice(p);
    }
    Ok(LagChoice {
        offset: best,
        flipped,
    })
}

/// Decode the transmitted window selection and rebuild the prediction
///
/// Fills `p` identically to the encoder's prediction. With `k == 0` the
/// band is the prediction alone and `x := P`; otherwise the caller adds the
/// separately decoded residual.
pub fn reconstruct(
    x: &mut [Coef],
    y_hist: &[Coef],
    p: &mut [Coef],
    stride: usize,
    k: u32,
    reader: &mut BitReader<'_>,
) -> Result<LagChoice> {
    let n = x.len();
    let n0 = y_hist.len();
    let max_pos = check_geometry(n, p.len(), n0, stride, k)?;

    let flipped = reader.read_bits(1)? == 1;
    let index = if max_pos == MAX_INTRA {
        reader.read_bits(LOG_MAX_INTRA)?
    } else {
        reader.read_uint(max_pos as u32)?
    };
    let best = stride * index as usize;

    shape_prediction(y_hist, p, best, flipped, k);

    if k == 0 {
        x.copy_from_slice(p);
    }
    Ok(LagChoice {
        offset: best,
        flipped,
    })
}
