//! Fixed lookup tables for the per-band coder

use crate::math::Coef;

/// Prediction confidence by pulse budget, indexed by `min(K, 10)`
///
/// Empirical shrink applied to the long-term prediction vector: the more
/// pulses a band gets, the less weight its prediction carries.
#[cfg(not(feature = "fixed-point"))]
pub const PG: [Coef; 11] = [
    1.0, 0.75, 0.65, 0.6, 0.6, 0.6, 0.55, 0.55, 0.5, 0.5, 0.5,
];

/// Prediction confidence by pulse budget, indexed by `min(K, 10)`, Q15
#[cfg(feature = "fixed-point")]
pub const PG: [Coef; 11] = [
    32767, 24576, 21299, 19661, 19661, 19661, 18022, 18022, 16384, 16384, 16384,
];
