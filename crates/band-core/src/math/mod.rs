//! Numeric back-ends for the band coder
//!
//! The coder's arithmetic is written once against a small operation surface
//! and compiled against one of two back-ends selected at build time: the
//! floating-point back-end (default) or the fixed-point back-end
//! (`fixed-point` feature, Q14 coefficients with 32-bit accumulators).
//! Within a back-end every operation is bit-exact across repeated
//! evaluation; encoder and decoder built with the same back-end therefore
//! reconstruct identical coefficients.
//!
//! Both modules export the same names; `round14`, shifts and the pulse
//! scale collapse to identities in the float build, mirroring how the
//! reference codecs compile one source for both arithmetic modes.

pub mod float_ops;

#[cfg(feature = "fixed-point")]
pub mod fixed_ops;

#[cfg(not(feature = "fixed-point"))]
pub use float_ops::*;

#[cfg(feature = "fixed-point")]
pub use fixed_ops::*;
