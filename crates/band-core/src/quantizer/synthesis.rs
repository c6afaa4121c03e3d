//! Pulse synthesis
//!
//! Decoder counterpart of the pulse search: read the codeword back, then
//! reconstruct the band through the shared gain solver. No scoring and no
//! state beyond the decode itself.

use crate::bitstream::BitReader;
use crate::error::Result;
use crate::math::Coef;
use crate::quantizer::{codeword, gain};

/// Reconstruct the band from a pulse codeword and prediction `p`
///
/// Overwrites `x` with `P + g*y` for the decoded pulse vector and returns
/// that vector.
pub fn pulse_synthesis(
    x: &mut [Coef],
    p: &[Coef],
    k: u32,
    reader: &mut BitReader<'_>,
) -> Result<Vec<i32>> {
    gain::check_band(x.len(), p.len(), k)?;
    let iy = codeword::decode_pulses(x.len(), k, reader)?;
    gain::mix_prediction(x, &iy, p, k)?;
    Ok(iy)
}
