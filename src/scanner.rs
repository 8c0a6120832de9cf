//! Fixed-increment sign-change scanning.
//!
//! Both entry points march forward over an ascending grid and count sign
//! changes of `f(x) - target`. When the requested crossing is found they report
//! the grid point *before* the flip, so results lag the true root by up to one
//! step. There is no bisection inside a step: two crossings closer together
//! than the step cancel out and are never seen.

use serde::{Deserialize, Serialize};

use crate::errors::ParameterError;

/// Options for extracting an eigenvalue from a characteristic equation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// One-based index of the eigenvalue to extract (default 1).
    pub mode: usize,
    /// Load increment in units of `N⁰cr` (default `1e-4`).
    pub step: f64,
    /// Scan ceiling in units of `N⁰cr` (default `2.0`).
    pub max_load: f64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            mode: 1,
            step: 1.0e-4,
            max_load: 2.0,
        }
    }
}

impl ScanOptions {
    /// Options for a higher mode with the default grid.
    #[must_use]
    pub fn for_mode(mode: usize) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Check the increment, ceiling and mode number.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NonPositiveStep`], [`ParameterError::EmptyRange`]
    /// or [`ParameterError::ZeroMode`].
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_grid(self.step, self.step, self.max_load)?;
        if self.mode == 0 {
            return Err(ParameterError::ZeroMode);
        }
        Ok(())
    }
}

/// Closed interval and increment for the generic solver.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchRange {
    /// First grid point.
    pub min: f64,
    /// Grid points at or beyond this value are not evaluated.
    pub max: f64,
    /// Grid increment, which bounds the precision of the result.
    pub step: f64,
}

impl SearchRange {
    /// Create a [`SearchRange`].
    #[must_use]
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Check that the range is non-empty and the increment positive.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NonPositiveStep`] or [`ParameterError::EmptyRange`].
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_grid(self.step, self.min, self.max)
    }
}

/// Reject a non-positive step or an empty range.
fn check_grid(step: f64, min: f64, max: f64) -> Result<(), ParameterError> {
    if !usable_step(step) {
        return Err(ParameterError::NonPositiveStep { step });
    }
    if !(min < max) {
        return Err(ParameterError::EmptyRange { min, max });
    }
    Ok(())
}

/// Whether `step` advances the grid.
fn usable_step(step: f64) -> bool {
    step > 0.0 && step.is_finite()
}

/// Extract the effective length factor `ke = 1/√N` of the requested mode.
///
/// The scan starts at `N = step` and stops before `max_load`. Results:
///
/// * `1/√N` at the grid point preceding the `mode`-th sign change,
/// * `+∞` when the equation is exactly zero at the first sample, which is how
///   a degenerate (stiffness-free) system presents itself,
/// * `0` when fewer than `mode` sign changes occur below the ceiling,
/// * `NaN` when the equation is NaN at the first sample or the step is unusable.
///
/// NaN samples after the first carry no sign and are skipped.
///
/// # Examples
/// ```
/// use brbstab::{find_mode_root, ScanOptions};
///
/// // Root at N = 0.25, i.e. ke = 2.
/// let ke = find_mode_root(|n| 0.25 - n, &ScanOptions::default());
/// assert!((ke - 2.0).abs() < 1.0e-3);
///
/// assert_eq!(find_mode_root(|_| 0.0, &ScanOptions::default()), f64::INFINITY);
/// assert_eq!(find_mode_root(|n| 1.0 + n, &ScanOptions::default()), 0.0);
/// ```
#[must_use]
pub fn find_mode_root<F>(equation: F, options: &ScanOptions) -> f64
where
    F: Fn(f64) -> f64,
{
    let step = options.step;
    if !usable_step(step) {
        return f64::NAN;
    }
    let first = equation(step);
    if first.is_nan() {
        return f64::NAN;
    }
    if first == 0.0 {
        return f64::INFINITY;
    }
    let grid = Grid {
        start: step,
        end: options.max_load,
        step,
    };
    grid.crossing(&equation, 0.0, first, options.mode)
        .map_or(0.0, |n| 1.0 / n.sqrt())
}

/// Locate the `occurrence`-th solution of `equation(x) = target` on a grid.
///
/// Returns the grid point preceding the requested crossing, or `NaN` when the
/// crossing is not found, the equation takes the same value at `min` and
/// `max`, or the step is unusable. An `occurrence` of zero is treated as one.
///
/// A NaN at `min` seeds the tracked sign as negative and the scan carries on,
/// so an equation undefined at the edge of its range is still solved.
///
/// # Examples
/// ```
/// use brbstab::{solve_scalar, SearchRange};
///
/// let range = SearchRange::new(0.0, 2.0, 0.001);
/// let x = solve_scalar(|x| x * x, 2.0, &range, 1);
/// assert!((x - 2.0_f64.sqrt()).abs() < 2.0e-3);
/// assert!(solve_scalar(|x| x * x, 9.0, &range, 1).is_nan());
/// ```
#[must_use]
pub fn solve_scalar<F>(equation: F, target: f64, range: &SearchRange, occurrence: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    if !usable_step(range.step) {
        return f64::NAN;
    }
    let first = equation(range.min);
    if first == equation(range.max) {
        return f64::NAN;
    }
    let grid = Grid {
        start: range.min,
        end: range.max,
        step: range.step,
    };
    grid.crossing(&equation, target, first, occurrence)
        .unwrap_or(f64::NAN)
}

/// Ascending grid `start, start + step, ...` below `end`.
struct Grid {
    /// First sample.
    start: f64,
    /// Samples at or beyond this value are not evaluated.
    end: f64,
    /// Increment between samples.
    step: f64,
}

impl Grid {
    /// Grid point before the `occurrence`-th sign change of `f - target`.
    ///
    /// `first` is the value at `start` that seeds the tracked sign; a value
    /// exactly on target or NaN counts as negative.
    fn crossing<F>(&self, f: &F, target: f64, first: f64, occurrence: usize) -> Option<f64>
    where
        F: Fn(f64) -> f64,
    {
        let mut sign = if first - target > 0.0 { 1.0 } else { -1.0 };
        let mut remaining = occurrence.max(1);
        let mut x = self.start;
        while x < self.end {
            if (f(x) - target) * sign < 0.0 {
                remaining -= 1;
                sign = -sign;
                if remaining == 0 {
                    return Some(x - self.step);
                }
            }
            let next = x + self.step;
            // step lost to rounding: the grid cannot advance
            if next <= x {
                break;
            }
            x = next;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn reports_grid_point_before_the_flip() {
        let range = SearchRange::new(0.0, 1.0, 0.01);
        let x = solve_scalar(|x| x - 0.5053, 0.0, &range, 1);
        assert_relative_eq!(x, 0.50, epsilon = 1.0e-9);
        assert!(x < 0.5053);
    }

    #[test]
    fn counts_occurrences_in_order() {
        let range = SearchRange::new(0.5, 3.5, 0.01);
        let f = |x: f64| (std::f64::consts::PI * x).sin();
        let first = solve_scalar(f, 0.0, &range, 1);
        let second = solve_scalar(f, 0.0, &range, 2);
        let third = solve_scalar(f, 0.0, &range, 3);
        assert!((first - 1.0).abs() < 0.02);
        assert!((second - 2.0).abs() < 0.02);
        assert!((third - 3.0).abs() < 0.02);
        assert!(solve_scalar(f, 0.0, &range, 4).is_nan());
    }

    #[test]
    fn zero_occurrence_behaves_like_first() {
        let range = SearchRange::new(0.0, 1.0, 0.01);
        let f = |x: f64| x - 0.3;
        assert_eq!(
            solve_scalar(f, 0.0, &range, 0),
            solve_scalar(f, 0.0, &range, 1)
        );
    }

    #[test]
    fn equal_end_values_are_indistinguishable() {
        // A symmetric bump crosses the target twice but looks flat end to end.
        let range = SearchRange::new(-1.0, 1.0, 0.01);
        assert!(solve_scalar(|x| 1.0 - x * x, 0.5, &range, 1).is_nan());
    }

    #[test]
    fn nan_everywhere_finds_nothing() {
        let range = SearchRange::new(0.0, 1.0, 0.01);
        assert!(solve_scalar(|_| f64::NAN, 0.0, &range, 1).is_nan());
        assert!(find_mode_root(|_| f64::NAN, &ScanOptions::default()).is_nan());
    }

    #[test]
    fn nan_at_range_start_keeps_scanning() {
        // Undefined at x = 0, like 0/0 at a zero stiffness.
        let f = |x: f64| if x == 0.0 { f64::NAN } else { x - 0.5053 };
        let range = SearchRange::new(0.0, 1.0, 0.01);
        let x = solve_scalar(f, 0.0, &range, 1);
        assert_relative_eq!(x, 0.50, epsilon = 1.0e-9);

        // The seeded sign is negative, so a function starting above target
        // registers a crossing at its first defined sample.
        let g = |x: f64| if x == 0.0 { f64::NAN } else { 1.0 - x };
        assert_relative_eq!(solve_scalar(g, 0.0, &range, 1), 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn interior_nan_samples_are_skipped() {
        let f = |n: f64| {
            if (0.1..0.11).contains(&n) {
                f64::NAN
            } else {
                0.25 - n
            }
        };
        let ke = find_mode_root(f, &ScanOptions::default());
        assert!((ke - 2.0).abs() < 1.0e-3);
    }

    #[test]
    fn unusable_step_returns_nan() {
        let options = ScanOptions {
            step: 0.0,
            ..ScanOptions::default()
        };
        assert!(find_mode_root(|n| 0.25 - n, &options).is_nan());
        let range = SearchRange::new(0.0, 1.0, -0.1);
        assert!(solve_scalar(|x| x - 0.5, 0.0, &range, 1).is_nan());
    }

    #[test]
    fn mode_extraction_sentinels() {
        let options = ScanOptions::default();
        assert_eq!(find_mode_root(|_| 0.0, &options), f64::INFINITY);
        assert_eq!(find_mode_root(|n| n + 1.0, &options), 0.0);
    }

    #[test]
    fn higher_modes_have_shorter_effective_length() {
        // Roots at N = 0.25, 1.0 and 2.25 give ke = 2, 1 and 2/3.
        let f = |n: f64| (2.0 * std::f64::consts::PI * n.sqrt()).sin();
        let options = ScanOptions {
            max_load: 3.0,
            ..ScanOptions::default()
        };
        let first = find_mode_root(f, &options);
        let second = find_mode_root(f, &ScanOptions { mode: 2, ..options });
        let third = find_mode_root(f, &ScanOptions { mode: 3, ..options });
        assert!((first - 2.0).abs() < 2.0e-3);
        assert!((second - 1.0).abs() < 1.0e-3);
        assert!((third - 2.0 / 3.0).abs() < 1.0e-3);
        assert_eq!(find_mode_root(f, &ScanOptions { mode: 4, ..options }), 0.0);
    }

    #[test]
    fn options_validation() {
        assert!(ScanOptions::default().validate().is_ok());
        assert_eq!(
            ScanOptions::for_mode(0).validate(),
            Err(ParameterError::ZeroMode)
        );
        assert_eq!(
            SearchRange::new(1.0, 1.0, 0.1).validate(),
            Err(ParameterError::EmptyRange { min: 1.0, max: 1.0 })
        );
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: ScanOptions = serde_json::from_str(r#"{"mode": 2}"#).expect("valid json");
        assert_eq!(options, ScanOptions::for_mode(2));
    }
}
