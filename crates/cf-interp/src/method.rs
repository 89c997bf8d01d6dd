//! Interpolation method selector.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Curve-fitting method used by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Method {
    /// Piecewise-linear segments; out-of-range queries extend the end slopes.
    Linear,
    /// Natural cubic spline (zero second derivative at both ends); out-of-range
    /// queries evaluate the end segment's cubic.
    #[default]
    CubicSpline,
}
