//! cf-interp: curve fitting for sparse, irregularly-sampled series.
//!
//! Contains:
//! - method (interpolation method selector)
//! - engine (Interpolator: fit + evaluate)
//! - error (engine error types)
//!
//! The engine is policy-free: it will happily evaluate outside the fitted
//! range (end-segment extension). Whether extrapolation is *allowed* is the
//! caller's decision.

pub mod engine;
pub mod error;
pub mod method;

pub use engine::Interpolator;
pub use error::{InterpError, InterpResult};
pub use method::Method;
