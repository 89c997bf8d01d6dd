//! The interpolation engine: owns a fitted curve over sorted samples.

use cf_core::Real;

use crate::error::{InterpError, InterpResult};
use crate::method::Method;

/// A fitted curve. The engine keeps its own copy of the sample data, so the
/// caller's buffers are transient.
#[derive(Debug, Clone)]
struct Fit {
    xs: Vec<Real>,
    ys: Vec<Real>,
    /// Second derivatives at the nodes (natural spline). Empty for Linear.
    d2: Vec<Real>,
}

/// Curve-fitting engine. Stateless apart from the fitted curve: feed it a
/// fresh sample set with [`Interpolator::refit`], then evaluate anywhere with
/// [`Interpolator::eval`].
#[derive(Debug, Clone, Default)]
pub struct Interpolator {
    method: Method,
    fit: Option<Fit>,
}

impl Interpolator {
    pub fn new(method: Method) -> Self {
        Self { method, fit: None }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Change the fitting method, dropping any existing fit.
    pub fn set_method(&mut self, method: Method) {
        self.method = method;
        self.fit = None;
    }

    /// Whether a fitted curve is currently available.
    pub fn is_fitted(&self) -> bool {
        self.fit.is_some()
    }

    /// Fit a fresh curve through `(xs[i], ys[i])`, replacing any prior fit.
    ///
    /// Requires at least two samples with strictly increasing, finite
    /// coordinates. O(n): the spline second derivatives are solved with the
    /// Thomas tridiagonal algorithm.
    pub fn refit(&mut self, xs: &[Real], ys: &[Real]) -> InterpResult<()> {
        validate(xs, ys)?;

        let d2 = match self.method {
            Method::Linear => Vec::new(),
            Method::CubicSpline => natural_second_derivatives(xs, ys),
        };

        self.fit = Some(Fit {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            d2,
        });
        Ok(())
    }

    /// Evaluate the fitted curve at `t`.
    ///
    /// Coordinates outside the fitted range evaluate the end segment's
    /// polynomial (end-slope extension for Linear, cubic extension for the
    /// spline). Fails only if no curve has been fitted.
    pub fn eval(&self, t: Real) -> InterpResult<Real> {
        let fit = self.fit.as_ref().ok_or(InterpError::NotFitted)?;
        let i = segment(&fit.xs, t);
        let (x0, x1) = (fit.xs[i], fit.xs[i + 1]);
        let (y0, y1) = (fit.ys[i], fit.ys[i + 1]);
        let h = x1 - x0;

        match self.method {
            Method::Linear => Ok(y0 + (y1 - y0) / h * (t - x0)),
            Method::CubicSpline => {
                let a = (x1 - t) / h;
                let b = (t - x0) / h;
                let cubic = (a * a * a - a) * fit.d2[i] + (b * b * b - b) * fit.d2[i + 1];
                Ok(a * y0 + b * y1 + cubic * h * h / 6.0)
            }
        }
    }
}

fn validate(xs: &[Real], ys: &[Real]) -> InterpResult<()> {
    if xs.len() != ys.len() {
        return Err(InterpError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    if xs.len() < 2 {
        return Err(InterpError::TooFewSamples { len: xs.len() });
    }
    for (i, (&x, &y)) in xs.iter().zip(ys).enumerate() {
        if !x.is_finite() || !y.is_finite() {
            return Err(InterpError::NonFinite { index: i });
        }
        if i > 0 && x <= xs[i - 1] {
            return Err(InterpError::NotIncreasing { index: i });
        }
    }
    Ok(())
}

/// Index `i` of the segment `[xs[i], xs[i+1]]` used to evaluate at `t`,
/// clamped to the end segments for out-of-range `t`.
fn segment(xs: &[Real], t: Real) -> usize {
    let idx = xs.partition_point(|v| *v <= t);
    idx.clamp(1, xs.len() - 1) - 1
}

/// Second derivatives of the natural cubic spline through `(xs, ys)`.
///
/// Solves the tridiagonal system
/// `h[i-1]*m[i-1] + 2*(h[i-1]+h[i])*m[i] + h[i]*m[i+1] = rhs[i]`
/// with `m[0] = m[n-1] = 0`. With only two samples the result is all zeros
/// and the spline degenerates to the connecting line.
fn natural_second_derivatives(xs: &[Real], ys: &[Real]) -> Vec<Real> {
    let n = xs.len();
    let mut d2 = vec![0.0; n];
    if n < 3 {
        return d2;
    }

    let h: Vec<Real> = xs.windows(2).map(|w| w[1] - w[0]).collect();

    // Forward elimination
    let mut diag = vec![0.0; n];
    let mut mu = vec![0.0; n];
    let mut z = vec![0.0; n];
    for i in 1..n - 1 {
        let rhs = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
        diag[i] = 2.0 * (xs[i + 1] - xs[i - 1]) - h[i - 1] * mu[i - 1];
        mu[i] = h[i] / diag[i];
        z[i] = (rhs - h[i - 1] * z[i - 1]) / diag[i];
    }

    // Back substitution; natural boundary leaves d2[0] and d2[n-1] at zero.
    for i in (1..n - 1).rev() {
        d2[i] = z[i] - mu[i] * d2[i + 1];
    }
    d2
}
