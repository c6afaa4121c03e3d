//! Pulse vector codewords
//!
//! Bijection between signed integer pulse vectors with `sum(|iy|) == K` and
//! a bounded side-information index space. Each dimension's magnitude is
//! coded as a uniform integer conditioned on the pulses still unplaced, then
//! a sign bit when the magnitude is nonzero; the final dimension absorbs the
//! remainder and needs no magnitude field. The decoder walks the identical
//! budget, so the codeword is self-framing given N and K.

use crate::bitstream::{BitReader, BitWriter};
use crate::error::Result;

/// Encode a pulse vector with exactly `k` total pulses
///
/// Precondition (debug-asserted): `sum(|iy|) == k`.
pub fn encode_pulses(iy: &[i32], k: u32, writer: &mut BitWriter) {
    debug_assert_eq!(iy.iter().map(|v| v.unsigned_abs()).sum::<u32>(), k);

    let n = iy.len();
    let mut left = k;
    for (j, &pulse) in iy.iter().enumerate() {
        if left == 0 {
            break;
        }
        let mag = pulse.unsigned_abs();
        if j < n - 1 {
            writer.write_uint(mag, left + 1);
        } else {
            debug_assert_eq!(mag, left);
        }
        if mag > 0 {
            writer.write_bits(u32::from(pulse < 0), 1);
        }
        left -= mag;
    }
}

/// Decode a pulse vector of dimension `n` with exactly `k` total pulses
pub fn decode_pulses(n: usize, k: u32, reader: &mut BitReader<'_>) -> Result<Vec<i32>> {
    let mut iy = vec![0i32; n];
    let mut left = k;
    for j in 0..n {
        if left == 0 {
            break;
        }
        let mag = if j < n - 1 {
            reader.read_uint(left + 1)?
        } else {
            left
        };
        if mag > 0 {
            let negative = reader.read_bits(1)? == 1;
            iy[j] = if negative { -(mag as i32) } else { mag as i32 };
        }
        left -= mag;
    }
    Ok(iy)
}
