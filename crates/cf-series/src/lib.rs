//! cf-series: time-indexed value store with cached interpolation.
//!
//! One [`TimeSeries`] holds the sparse, irregularly-sampled history of a
//! single tracked variable and answers reads at arbitrary time coordinates:
//! exact hits come straight from storage, everything else goes through a
//! lazily rebuilt curve fit (cf-interp) gated by an interpolation policy.
//!
//! Contains:
//! - series (TimeSeries store + policy + cache invalidation)
//! - value (SeriesValue adapter: plain numbers vs unit-tagged quantities)
//! - error (store error types)
//!
//! A series is not internally synchronized. It is a per-variable store with a
//! single logical owner; callers that share one across threads must serialize
//! access themselves.

pub mod error;
pub mod series;
pub mod value;

pub use error::{SeriesError, SeriesResult};
pub use series::TimeSeries;
pub use value::SeriesValue;
