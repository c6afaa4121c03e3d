//! # Band-Core: Per-Band Coefficient Coder
//!
//! Pulse-vector quantization and lagged-prediction core of the FDCODEC
//! frequency-domain audio codec. For one frequency band of a frame it
//! searches for the integer pulse pattern that best represents a unit-norm
//! target relative to a predicted direction, solves the closed-form gain
//! that re-normalizes the combined vector, and derives the prediction
//! itself either from a correlation search over prior spectral history or
//! from a deterministic spectral fold.
//!
//! Encoder and decoder run the identical arithmetic, so a band reconstructs
//! bit-for-bit on both sides of the bitstream. Two numeric back-ends are
//! selectable at build time:
//!
//! - floating point (default)
//! - fixed point (`fixed-point` feature): Q14 coefficients, saturating
//!   32-bit accumulators, integer square roots and reciprocals
//!
//! ## Usage
//!
//! ```rust
//! use band_core::bitstream::{BitReader, BitWriter};
//! use band_core::math::{coef_from_f32, COEF_ZERO};
//! use band_core::{pulse_search, pulse_synthesis};
//!
//! // Encoder side: quantize a band target with 4 pulses, no prediction.
//! let p = vec![COEF_ZERO; 5];
//! let mut x = vec![
//!     coef_from_f32(0.6),
//!     coef_from_f32(-0.5),
//!     coef_from_f32(0.4),
//!     coef_from_f32(-0.3),
//!     coef_from_f32(0.2),
//! ];
//! let mut writer = BitWriter::new();
//! let iy = pulse_search(&mut x, &p, 4, &mut writer)?;
//! assert_eq!(iy.iter().map(|v| v.unsigned_abs()).sum::<u32>(), 4);
//!
//! // Decoder side: the same band from the bitstream alone.
//! let bytes = writer.finish();
//! let mut reader = BitReader::new(&bytes);
//! let mut decoded = vec![COEF_ZERO; 5];
//! pulse_synthesis(&mut decoded, &p, 4, &mut reader)?;
//! assert_eq!(decoded, x);
//! # Ok::<(), band_core::BandError>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod bitstream;
pub mod constants;
pub mod error;
pub mod math;
pub mod prediction;
pub mod quantizer;
pub mod tables;

// Re-export commonly used types and operations
pub use error::{BandError, Result};
pub use prediction::{predict, reconstruct, spectral_fold, LagChoice};
pub use quantizer::{mix_prediction, pulse_search, pulse_synthesis};

/// Version information for the band coder
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
///
/// Installs a default tracing subscriber if none is set. Safe to call
/// multiple times; only the first call has any effect.
pub fn init() {
    let _ = tracing_subscriber::fmt::try_init();
    tracing::info!(
        "band-core v{} initialized (backend: {})",
        VERSION,
        backend_name()
    );
}

/// Name of the numeric back-end compiled into this build
pub fn backend_name() -> &'static str {
    if cfg!(feature = "fixed-point") {
        "fixed-point"
    } else {
        "float"
    }
}

#[cfg(test)]
mod tests;
