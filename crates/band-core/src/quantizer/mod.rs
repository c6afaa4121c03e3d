//! Pulse-vector quantization of a band
//!
//! The encoder half greedily places K unit pulses against the prediction
//! (`search`), the decoder half reads them back (`synthesis`), and both
//! finish through the same closed-form gain solver (`gain`) so the
//! reconstruction is bit-identical on both sides of the bitstream.

pub mod codeword;
pub mod gain;
pub mod search;
pub mod synthesis;

pub use gain::mix_prediction;
pub use search::pulse_search;
pub use synthesis::pulse_synthesis;
