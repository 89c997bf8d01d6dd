//! Value adapter: what a payload must offer for the store to interpolate it.

use cf_core::{Quantity, Real};

/// Payload types a [`crate::TimeSeries`] can interpolate.
///
/// A payload exposes a real magnitude for curve fitting and can re-wrap a
/// fitted magnitude back into its own shape. For plain numbers both
/// directions are the identity; for unit-tagged quantities the magnitude is
/// read in the quantity's own unit and re-wrapping reuses that unit.
///
/// The store performs no cross-entry unit validation: interpolated results
/// are tagged with the unit of the series' first entry, so a series is
/// expected to hold a single unit throughout.
pub trait SeriesValue: Clone {
    /// Real magnitude fed to the curve fit.
    fn magnitude(&self) -> Real;

    /// Wrap a fitted magnitude back into this payload's shape, with `self`
    /// as the template (for quantities: `self`'s unit).
    fn with_magnitude(&self, magnitude: Real) -> Self;
}

impl SeriesValue for Real {
    fn magnitude(&self) -> Real {
        *self
    }

    fn with_magnitude(&self, magnitude: Real) -> Real {
        magnitude
    }
}

impl SeriesValue for Quantity {
    fn magnitude(&self) -> Real {
        self.value()
    }

    fn with_magnitude(&self, magnitude: Real) -> Quantity {
        Quantity::new(magnitude, self.unit())
    }
}
