//! The time-series store: ordered samples, interpolation policy, lazy cache.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use cf_core::Real;
use cf_interp::{Interpolator, Method};

use crate::error::{SeriesError, SeriesResult};
use crate::value::SeriesValue;

/// Map key wrapper giving `Real` a total order.
#[derive(Debug, Clone, Copy)]
struct TimeKey(Real);

impl PartialEq for TimeKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for TimeKey {}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Sparse, irregularly-sampled history of one tracked variable.
///
/// Entries are keyed by a real time coordinate (a year, a second, whatever
/// the owning model uses) in ascending order. Reads at stored coordinates
/// return the stored value directly; reads elsewhere are served by a curve
/// fit over the full series, rebuilt lazily and gated by the interpolation
/// policy:
///
/// - `cutoff`: only coordinates strictly below it may be interpolated
///   (initially `Real::MIN`, i.e. interpolation is off until a policy call).
/// - `extrapolation_allowed`: whether fitted reads outside
///   `[first(), last()]` are permitted.
///
/// The fitted curve is cached; `dirty` records that it no longer matches the
/// stored entries. All invalidation happens in [`TimeSeries::set`] and the
/// two policy setters, the rebuild happens inside [`TimeSeries::get`].
#[derive(Debug, Clone)]
pub struct TimeSeries<T: SeriesValue> {
    entries: BTreeMap<TimeKey, T>,
    cutoff: Real,
    extrapolation_allowed: bool,
    dirty: bool,
    engine: Interpolator,
    /// Diagnostic name used in errors and log output.
    pub label: String,
}

impl<T: SeriesValue> Default for TimeSeries<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SeriesValue> TimeSeries<T> {
    /// Empty series with interpolation disallowed.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            cutoff: Real::MIN,
            extrapolation_allowed: false,
            dirty: false,
            engine: Interpolator::default(),
            label: "?".to_owned(),
        }
    }

    /// Empty series with a diagnostic label.
    pub fn named(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::new()
        }
    }

    /// Select the interpolation method (default: natural cubic spline).
    pub fn with_method(mut self, method: Method) -> Self {
        self.engine.set_method(method);
        self.dirty = true;
        self
    }

    /// Insert or overwrite the entry at `t`.
    ///
    /// The cached fit is invalidated only when `t` lies strictly below the
    /// interpolation cutoff: nothing at or beyond the cutoff is ever served
    /// from the fit, so a change there cannot stale it. Widening the cutoff
    /// later goes through the policy setters, which invalidate
    /// unconditionally.
    pub fn set(&mut self, t: Real, value: T) {
        self.entries.insert(TimeKey(t), value);
        if t < self.cutoff {
            self.dirty = true;
        }
    }

    /// Whether an exact entry exists at `t`.
    pub fn exists(&self, t: Real) -> bool {
        self.entries.contains_key(&TimeKey(t))
    }

    /// Number of stored entries.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored `(time, value)` pairs in ascending time order.
    pub fn iter(&self) -> impl Iterator<Item = (Real, &T)> {
        self.entries.iter().map(|(k, v)| (k.0, v))
    }

    /// Smallest stored time coordinate.
    pub fn first(&self) -> SeriesResult<Real> {
        self.entries
            .keys()
            .next()
            .map(|k| k.0)
            .ok_or_else(|| SeriesError::Empty {
                label: self.label.clone(),
            })
    }

    /// Largest stored time coordinate.
    pub fn last(&self) -> SeriesResult<Real> {
        self.entries
            .keys()
            .next_back()
            .map(|k| k.0)
            .ok_or_else(|| SeriesError::Empty {
                label: self.label.clone(),
            })
    }

    /// Permit interpolation at any time coordinate.
    pub fn allow_interp(&mut self, extrapolate: bool) {
        self.set_policy(Real::MAX, extrapolate);
    }

    /// Permit interpolation only strictly before the current last entry.
    ///
    /// Fails on an empty series (there is no last entry to anchor to).
    pub fn allow_partial_interp(&mut self, extrapolate: bool) -> SeriesResult<()> {
        let cutoff = self.last()?;
        self.set_policy(cutoff, extrapolate);
        Ok(())
    }

    /// Resolve a value for `t`.
    ///
    /// Exact hits bypass the engine entirely, whatever the policy or cache
    /// state. Otherwise `t` must lie below the cutoff and, unless
    /// extrapolation is allowed, within `[first(), last()]`; the cached fit
    /// is rebuilt first if stale.
    pub fn get(&mut self, t: Real) -> SeriesResult<T> {
        if let Some(v) = self.entries.get(&TimeKey(t)) {
            return Ok(v.clone());
        }
        if t < self.cutoff {
            return self.interpolate(t);
        }
        tracing::warn!(
            series = %self.label,
            time = t,
            "interpolation requested but not allowed"
        );
        Err(SeriesError::InterpolationDisallowed {
            label: self.label.clone(),
            time: t,
        })
    }

    fn set_policy(&mut self, cutoff: Real, extrapolate: bool) {
        self.cutoff = cutoff;
        self.extrapolation_allowed = extrapolate;
        // A policy change invalidates any trust in the cached fit.
        self.dirty = true;
    }

    fn interpolate(&mut self, t: Real) -> SeriesResult<T> {
        if self.entries.len() < 2 {
            return Err(SeriesError::TooFewSamples {
                label: self.label.clone(),
                len: self.entries.len(),
            });
        }

        if self.dirty {
            self.rebuild()?;
        }

        let first = self.first()?;
        let last = self.last()?;
        if (t < first || t > last) && !self.extrapolation_allowed {
            return Err(SeriesError::ExtrapolationDisallowed {
                label: self.label.clone(),
                time: t,
            });
        }

        let magnitude = self.engine.eval(t)?;
        // Re-wrap with the first entry as template: for quantities this tags
        // the result with the first entry's unit, with no cross-entry check.
        match self.entries.values().next() {
            Some(template) => Ok(template.with_magnitude(magnitude)),
            None => Err(SeriesError::Empty {
                label: self.label.clone(),
            }),
        }
    }

    /// Refit the engine from the current entries and clear the dirty flag.
    /// O(n); amortized across reads that do not mutate below the cutoff.
    fn rebuild(&mut self) -> SeriesResult<()> {
        let mut xs = Vec::with_capacity(self.entries.len());
        let mut ys = Vec::with_capacity(self.entries.len());
        for (k, v) in &self.entries {
            xs.push(k.0);
            ys.push(v.magnitude());
        }
        self.engine.refit(&xs, &ys)?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_point() -> TimeSeries<Real> {
        let mut ts = TimeSeries::named("tgav");
        ts.set(1990.0, 10.0);
        ts.set(2000.0, 20.0);
        ts.set(2010.0, 15.0);
        ts
    }

    #[test]
    fn new_series_is_empty_with_interp_off() {
        let ts: TimeSeries<Real> = TimeSeries::new();
        assert_eq!(ts.size(), 0);
        assert!(ts.is_empty());
        assert!(!ts.exists(2000.0));
        assert!(!ts.dirty);
        assert!(matches!(ts.first(), Err(SeriesError::Empty { .. })));
        assert!(matches!(ts.last(), Err(SeriesError::Empty { .. })));
    }

    #[test]
    fn set_overwrites_existing_key() {
        let mut ts = three_point();
        assert_eq!(ts.size(), 3);
        ts.set(2000.0, 25.0);
        assert_eq!(ts.size(), 3);
        assert_eq!(ts.get(2000.0).unwrap(), 25.0);
    }

    #[test]
    fn first_and_last() {
        let ts = three_point();
        assert_eq!(ts.first().unwrap(), 1990.0);
        assert_eq!(ts.last().unwrap(), 2010.0);
    }

    #[test]
    fn exact_match_bypasses_engine() {
        // Even a single-sample series answers exact reads, dirty or not.
        let mut ts = TimeSeries::named("single");
        ts.allow_interp(true);
        ts.set(2000.0, 42.0);
        assert!(ts.dirty);
        assert_eq!(ts.get(2000.0).unwrap(), 42.0);
        assert!(ts.dirty, "exact reads must not touch the cache");
    }

    #[test]
    fn default_policy_rejects_non_exact_reads() {
        let mut ts = three_point();
        assert!(matches!(
            ts.get(1995.0),
            Err(SeriesError::InterpolationDisallowed { time, .. }) if time == 1995.0
        ));
    }

    #[test]
    fn interpolation_needs_two_samples() {
        let mut ts = TimeSeries::named("lone");
        ts.set(2000.0, 1.0);
        ts.allow_interp(true);
        assert!(matches!(
            ts.get(2001.0),
            Err(SeriesError::TooFewSamples { len: 1, .. })
        ));
    }

    #[test]
    fn set_marks_dirty_only_below_cutoff() {
        let mut ts = three_point();
        ts.allow_partial_interp(false).unwrap(); // cutoff = 2010
        let _ = ts.get(1995.0).unwrap();
        assert!(!ts.dirty);

        ts.set(2010.0, 99.0); // at cutoff: cache untouched
        assert!(!ts.dirty);
        ts.set(2020.0, 1.0); // beyond cutoff: cache untouched
        assert!(!ts.dirty);
        ts.set(2005.0, 17.0); // below cutoff: stale
        assert!(ts.dirty);
    }

    #[test]
    fn rebuild_happens_once_per_invalidation() {
        let mut ts = three_point();
        ts.allow_interp(false);
        assert!(ts.dirty);

        let a = ts.get(1995.0).unwrap();
        assert!(!ts.dirty, "first fitted read rebuilds and clears the flag");
        let b = ts.get(1995.0).unwrap();
        assert_eq!(a, b);
        assert!(!ts.dirty);
    }

    #[test]
    fn set_below_cutoff_is_reflected_on_next_read() {
        let mut ts = three_point();
        ts.allow_interp(false);
        let before = ts.get(1995.0).unwrap();

        ts.set(2000.0, 12.0);
        assert!(ts.dirty);
        let after = ts.get(1995.0).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn policy_change_resyncs_stale_fit() {
        let mut ts = three_point();
        ts.allow_partial_interp(false).unwrap(); // cutoff = 2010
        let before = ts.get(1995.0).unwrap();

        // Overwriting the entry at the cutoff leaves the fit in service even
        // though it still reflects the old value. Preserved behavior: only
        // the policy setters re-widen trust.
        ts.set(2010.0, 99.0);
        assert_eq!(ts.get(1995.0).unwrap(), before);

        ts.allow_partial_interp(false).unwrap();
        assert_ne!(ts.get(1995.0).unwrap(), before);
    }

    #[test]
    fn failed_policy_read_keeps_series_usable() {
        let mut ts = three_point();
        ts.allow_interp(false);
        assert!(matches!(
            ts.get(2020.0),
            Err(SeriesError::ExtrapolationDisallowed { time, .. }) if time == 2020.0
        ));
        // The rejected read changed nothing observable.
        assert_eq!(ts.size(), 3);
        assert!(ts.get(1995.0).is_ok());
    }

    #[test]
    fn allow_partial_interp_fails_on_empty_series() {
        let mut ts: TimeSeries<Real> = TimeSeries::new();
        assert!(matches!(
            ts.allow_partial_interp(false),
            Err(SeriesError::Empty { .. })
        ));
    }

    #[test]
    fn linear_method_is_selectable() {
        let mut ts = TimeSeries::named("lin").with_method(Method::Linear);
        ts.set(1990.0, 10.0);
        ts.set(2000.0, 20.0);
        ts.set(2010.0, 15.0);
        ts.allow_interp(false);
        assert_eq!(ts.get(1995.0).unwrap(), 15.0);
    }

    #[test]
    fn iter_is_ascending() {
        let mut ts = TimeSeries::named("ord");
        ts.set(2010.0, 3.0);
        ts.set(1990.0, 1.0);
        ts.set(2000.0, 2.0);
        let times: Vec<Real> = ts.iter().map(|(t, _)| t).collect();
        assert_eq!(times, vec![1990.0, 2000.0, 2010.0]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn exact_reads_short_circuit_under_any_policy(
            entries in prop::collection::btree_map(-10_000i32..10_000i32, -1.0e6_f64..1.0e6_f64, 1..20),
            extrapolate: bool,
        ) {
            let mut ts = TimeSeries::named("prop");
            for (&t, &v) in &entries {
                ts.set(t as Real, v);
            }
            ts.allow_interp(extrapolate);
            for (&t, &v) in &entries {
                prop_assert_eq!(ts.get(t as Real).unwrap(), v);
            }
        }
    }
}
