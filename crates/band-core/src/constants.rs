//! Constants and parameters for the per-band coder

/// Maximum band width in coefficients
pub const MAX_BAND_SIZE: usize = 256;

/// Maximum pulse budget per band
///
/// Bounded so that the fixed-point pulse scale (see `math::pulse_shift`)
/// keeps the pulse vector energy inside a 32-bit accumulator.
pub const MAX_PULSES: u32 = 127;

/// Maximum number of candidate prediction windows searched per band
pub const MAX_INTRA: usize = 32;

/// Bits used for the prediction index when the candidate count saturates
/// at [`MAX_INTRA`]
pub const LOG_MAX_INTRA: u32 = 5;

/// Entries in the prediction confidence table (indexed by `min(K, 10)`)
pub const PRED_GAIN_ENTRIES: usize = 11;
