//! Search for the connection stiffness at which the governing buckling shape
//! switches between symmetric and antisymmetric.

use serde::{Deserialize, Serialize};

use crate::capacity::ModeCapacities;
use crate::errors::ParameterError;
use crate::parameters::{HingeCapacities, StabilityParameters};
use crate::scanner::{solve_scalar, ScanOptions, SearchRange};

/// Stiffness varied by the crossover search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverParameter {
    /// Vary the normalized gusset stiffness `κg`.
    Gusset,
    /// Vary the normalized restrainer end stiffness `κr`.
    Restrainer,
}

impl CrossoverParameter {
    /// Copy of `parameters` with the searched stiffness replaced by `value`.
    #[must_use]
    pub const fn apply(self, parameters: StabilityParameters, value: f64) -> StabilityParameters {
        match self {
            Self::Gusset => parameters.with_gusset(value),
            Self::Restrainer => parameters.with_restrainer(value),
        }
    }
}

/// Range and scan settings of a crossover search.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrossoverSearch {
    /// Stiffness to vary.
    pub parameter: CrossoverParameter,
    /// Stiffness interval; its step is the tolerance of the result.
    pub range: SearchRange,
    /// Eigenvalue scan used for every trial stiffness.
    #[serde(default)]
    pub scan: ScanOptions,
}

impl CrossoverSearch {
    /// Search over `range` with the default eigenvalue scan.
    #[must_use]
    pub fn new(parameter: CrossoverParameter, range: SearchRange) -> Self {
        Self {
            parameter,
            range,
            scan: ScanOptions::default(),
        }
    }

    /// Check the stiffness range and the eigenvalue scan.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] found, or
    /// [`ParameterError::NegativeValue`] when the range starts below zero.
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.range.validate()?;
        if self.range.min < 0.0 {
            return Err(ParameterError::NegativeValue {
                field: "range.min",
                value: self.range.min,
            });
        }
        self.scan.validate()
    }
}

/// Ratio of the symmetric to the antisymmetric governing capacity.
///
/// Solves both eigenvalues, their mode shapes and the four hinge limit
/// states for `parameters`.
#[must_use]
pub fn mode_capacity_ratio(
    parameters: &StabilityParameters,
    hinges: &HingeCapacities,
    scan: &ScanOptions,
) -> f64 {
    ModeCapacities::evaluate(parameters, hinges, scan).mode_ratio(hinges)
}

/// Stiffness at which [`mode_capacity_ratio`] crosses one.
///
/// `fixed` supplies every parameter except the one named by the search. The
/// result is the grid point before the first crossing, so it is at most one
/// step below the true crossover. `NaN` means the same shape governs over the
/// whole range.
///
/// # Examples
/// ```
/// use brbstab::{
///     critical_mode_crossover, stability, CrossoverParameter, CrossoverSearch, HingeCapacities,
///     HingeRotation, SearchRange,
/// };
///
/// let fixed = stability(1.0, 0.0, 0.1, 0.1);
/// let hinges = HingeCapacities::new(
///     HingeRotation::new(0.01, 0.0),
///     HingeRotation::new(0.01, 0.0),
///     0.1,
/// );
/// let search = CrossoverSearch::new(
///     CrossoverParameter::Restrainer,
///     SearchRange::new(0.3, 1.0, 0.01),
/// );
/// let stiffness = critical_mode_crossover(&fixed, &hinges, &search);
/// assert!(stiffness > 0.3 && stiffness < 1.0);
/// ```
#[must_use]
pub fn critical_mode_crossover(
    fixed: &StabilityParameters,
    hinges: &HingeCapacities,
    search: &CrossoverSearch,
) -> f64 {
    let ratio = |value: f64| {
        let parameters = search.parameter.apply(*fixed, value);
        mode_capacity_ratio(&parameters, hinges, &search.scan)
    };
    solve_scalar(ratio, 1.0, &search.range, 1)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::parameters::{stability, HingeRotation};

    fn hinges(imperfection: f64) -> HingeCapacities {
        HingeCapacities::new(
            HingeRotation::new(0.01, 0.0),
            HingeRotation::new(0.01, 0.0),
            imperfection,
        )
    }

    #[test]
    fn gusset_crossover_lies_inside_range() {
        let fixed = stability(0.0, 0.1, 0.2, 0.1);
        let hinges = hinges(0.001);
        let search = CrossoverSearch::new(
            CrossoverParameter::Gusset,
            SearchRange::new(0.05, 1.0, 0.001),
        );
        assert!(mode_capacity_ratio(&fixed.with_gusset(0.05), &hinges, &search.scan) < 1.0);
        assert!(mode_capacity_ratio(&fixed.with_gusset(1.0), &hinges, &search.scan) > 1.0);

        let stiffness = critical_mode_crossover(&fixed, &hinges, &search);
        assert_relative_eq!(stiffness, 0.136, epsilon = 2.0e-3);
        let ratio = mode_capacity_ratio(&fixed.with_gusset(stiffness), &hinges, &search.scan);
        assert!((ratio - 1.0).abs() < 0.01);
    }

    #[test]
    fn restrainer_crossover_lies_inside_range() {
        let fixed = stability(1.0, 0.0, 0.1, 0.1);
        let hinges = hinges(0.1);
        let search = CrossoverSearch::new(
            CrossoverParameter::Restrainer,
            SearchRange::new(0.3, 1.0, 0.001),
        );
        let stiffness = critical_mode_crossover(&fixed, &hinges, &search);
        assert_relative_eq!(stiffness, 0.77, epsilon = 2.0e-3);
        let ratio = mode_capacity_ratio(&fixed.with_restrainer(stiffness), &hinges, &search.scan);
        assert!((ratio - 1.0).abs() < 0.01);
    }

    #[test]
    fn gusset_search_from_zero_stiffness() {
        // A pinned gusset carries no moment, so its hinge load is 0/0 at κg = 0.
        let fixed = stability(0.0, 0.1, 0.2, 0.1);
        let hinges = hinges(0.001);
        let search = CrossoverSearch::new(
            CrossoverParameter::Gusset,
            SearchRange::new(0.0, 1.0, 0.001),
        );
        assert!(search.validate().is_ok());
        assert!(mode_capacity_ratio(&fixed, &hinges, &search.scan).is_nan());

        let stiffness = critical_mode_crossover(&fixed, &hinges, &search);
        assert_relative_eq!(stiffness, 0.136, epsilon = 2.0e-3);
    }

    #[test]
    fn single_governing_shape_gives_nan() {
        let fixed = stability(0.0, 0.1, 0.2, 0.1);
        let search = CrossoverSearch::new(
            CrossoverParameter::Gusset,
            SearchRange::new(0.3, 1.0, 0.01),
        );
        assert!(critical_mode_crossover(&fixed, &hinges(0.001), &search).is_nan());
    }

    #[test]
    fn search_parameter_replaces_only_its_field() {
        let fixed = stability(1.0, 2.0, 0.1, 0.5);
        assert_eq!(
            CrossoverParameter::Gusset.apply(fixed, 3.0),
            stability(3.0, 2.0, 0.1, 0.5)
        );
        assert_eq!(
            CrossoverParameter::Restrainer.apply(fixed, 3.0),
            stability(1.0, 3.0, 0.1, 0.5)
        );
    }

    #[test]
    fn search_validation() {
        let search = CrossoverSearch::new(
            CrossoverParameter::Gusset,
            SearchRange::new(-0.1, 1.0, 0.01),
        );
        assert!(matches!(
            search.validate(),
            Err(ParameterError::NegativeValue { field: "range.min", .. })
        ));
        let search: CrossoverSearch = serde_json::from_str(
            r#"{"parameter": "restrainer", "range": {"min": 0.3, "max": 1.0, "step": 0.01}}"#,
        )
        .expect("valid json");
        assert_eq!(search.scan, ScanOptions::default());
        assert!(search.validate().is_ok());
    }
}
