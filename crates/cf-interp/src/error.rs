//! Error types for curve fitting and evaluation.

use thiserror::Error;

pub type InterpResult<T> = Result<T, InterpError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpError {
    #[error("No curve fitted yet: call refit before eval")]
    NotFitted,

    #[error("Too few samples to fit a curve: {len} (need at least 2)")]
    TooFewSamples { len: usize },

    #[error("Coordinate/value length mismatch: {xs} vs {ys}")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("Coordinates not strictly increasing at index {index}")]
    NotIncreasing { index: usize },

    #[error("Non-finite sample at index {index}")]
    NonFinite { index: usize },
}
