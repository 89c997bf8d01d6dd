//! Error types for time-series operations.

use cf_core::Real;
use thiserror::Error;

pub type SeriesResult<T> = Result<T, SeriesError>;

/// Errors surfaced by [`crate::TimeSeries`]. All are recoverable by the
/// caller; a failed read leaves the series unchanged.
#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("time series `{label}` is empty")]
    Empty { label: String },

    #[error("time series data must have size > 1 (`{label}` has {len})")]
    TooFewSamples { label: String, len: usize },

    #[error("end interpolation not allowed (`{label}` at t = {time})")]
    ExtrapolationDisallowed { label: String, time: Real },

    #[error("interpolation requested but not allowed (`{label}` at t = {time})")]
    InterpolationDisallowed { label: String, time: Real },

    #[error("curve fit failed: {0}")]
    Fit(#[from] cf_interp::InterpError),
}
