//! Prediction vector derivation
//!
//! Two sources for the per-band prediction: a transmitted lag into coded
//! spectral history (`long_term`) or a deterministic side-information-free
//! fold of the lower spectrum (`fold`).

pub mod fold;
pub mod long_term;

pub use fold::spectral_fold;
pub use long_term::{predict, reconstruct, LagChoice};
