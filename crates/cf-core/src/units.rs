// cf-core/src/units.rs

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::numeric::Real;

/// Runtime unit identifier for values exchanged with the simulation engine.
///
/// This is a tag, not a dimension system: no conversion between units is
/// performed anywhere in this workspace. The catalog covers the units the
/// engine actually trades in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Unit {
    Unitless,
    Kelvin,
    Celsius,
    Pascal,
    Watt,
    Joule,
    Kilogram,
    Gigagram,
    Metre,
    Second,
    Ppmv,
}

impl Unit {
    /// Printable unit symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Unitless => "(unitless)",
            Unit::Kelvin => "K",
            Unit::Celsius => "degC",
            Unit::Pascal => "Pa",
            Unit::Watt => "W",
            Unit::Joule => "J",
            Unit::Kilogram => "kg",
            Unit::Gigagram => "Gg",
            Unit::Metre => "m",
            Unit::Second => "s",
            Unit::Ppmv => "ppmv",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A numeric magnitude carrying a runtime unit tag.
///
/// Arithmetic is deliberately narrow: same-unit add/sub and scalar mul/div.
/// Mixing units in add/sub is a caller bug and asserts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quantity {
    value: Real,
    unit: Unit,
}

impl Quantity {
    pub fn new(value: Real, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Magnitude expressed in this quantity's own unit.
    pub fn value(&self) -> Real {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        assert_eq!(self.unit, rhs.unit, "unit mismatch in quantity addition");
        Quantity::new(self.value + rhs.value, self.unit)
    }
}

impl Sub for Quantity {
    type Output = Quantity;

    fn sub(self, rhs: Quantity) -> Quantity {
        assert_eq!(self.unit, rhs.unit, "unit mismatch in quantity subtraction");
        Quantity::new(self.value - rhs.value, self.unit)
    }
}

impl Mul<Real> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: Real) -> Quantity {
        Quantity::new(self.value * rhs, self.unit)
    }
}

impl Div<Real> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: Real) -> Quantity {
        Quantity::new(self.value / rhs, self.unit)
    }
}

#[inline]
pub fn k(v: Real) -> Quantity {
    Quantity::new(v, Unit::Kelvin)
}

#[inline]
pub fn degc(v: Real) -> Quantity {
    Quantity::new(v, Unit::Celsius)
}

#[inline]
pub fn pa(v: Real) -> Quantity {
    Quantity::new(v, Unit::Pascal)
}

#[inline]
pub fn w(v: Real) -> Quantity {
    Quantity::new(v, Unit::Watt)
}

#[inline]
pub fn kg(v: Real) -> Quantity {
    Quantity::new(v, Unit::Kilogram)
}

#[inline]
pub fn gg(v: Real) -> Quantity {
    Quantity::new(v, Unit::Gigagram)
}

#[inline]
pub fn s(v: Real) -> Quantity {
    Quantity::new(v, Unit::Second)
}

#[inline]
pub fn ppmv(v: Real) -> Quantity {
    Quantity::new(v, Unit::Ppmv)
}

#[inline]
pub fn unitless(v: Real) -> Quantity {
    Quantity::new(v, Unit::Unitless)
}
