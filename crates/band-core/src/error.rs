//! Error handling for the per-band coder
//!
//! All errors here are precondition rejections: the band coder itself has no
//! recoverable failure paths once its inputs are valid, so every variant
//! signals a caller bug or a corrupt bitstream rather than a runtime
//! condition to retry.

use thiserror::Error;

/// Result type alias for band coder operations
pub type Result<T> = std::result::Result<T, BandError>;

/// Error type for band coder operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BandError {
    /// Band width outside the supported range
    #[error("Invalid band width: {n} (supported: 1-{max})")]
    InvalidBandWidth {
        /// Requested band width
        n: usize,
        /// Maximum supported band width
        max: usize,
    },

    /// A pulse budget of zero reached the quantizer
    ///
    /// K == 0 bands carry no coded residual and must be handled entirely by
    /// the prediction stage; feeding them to the quantizer would divide by a
    /// zero pulse energy.
    #[error("Pulse budget of zero is not quantizable (prediction-only band)")]
    ZeroPulseBudget,

    /// Pulse budget above the supported maximum
    #[error("Pulse budget too large: {k} (maximum: {max})")]
    PulseBudgetTooLarge {
        /// Requested pulse budget
        k: u32,
        /// Maximum supported pulse budget
        max: u32,
    },

    /// Paired buffers disagree on length
    #[error("Buffer length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length implied by the band width
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// History buffer too short for the requested prediction search
    #[error("History too short: need {needed} samples, got {actual}")]
    HistoryTooShort {
        /// Samples the search would read
        needed: usize,
        /// Samples available
        actual: usize,
    },

    /// The bitstream ended before the decoder finished reading
    #[error("Bitstream exhausted")]
    BitstreamExhausted,

    /// A decoded field fell outside its declared range
    #[error("Decoded value out of range: {value} (bound: {bound})")]
    ValueOutOfRange {
        /// Decoded value
        value: u32,
        /// Exclusive upper bound the field was coded against
        bound: u32,
    },
}
