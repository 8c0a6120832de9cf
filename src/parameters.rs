//! Value types describing the normalized stick-and-spring model.

use serde::{Deserialize, Serialize};

use crate::errors::ParameterError;

/// Normalized stiffness and geometry of one brace span.
///
/// Rotational stiffnesses are normalized as `K·ξL0/γEIr`, so the connection
/// zone has unit flexural rigidity and unit length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StabilityParameters {
    /// Normalized gusset rotational stiffness `κg`.
    pub gusset: f64,
    /// Normalized restrainer end rotational stiffness `κr`.
    pub restrainer: f64,
    /// Ratio of connection length to full buckling length `ξ = ξL0/L0`.
    pub length_ratio: f64,
    /// Ratio of connection to restrainer flexural rigidity `γ = γEIr/EIr`.
    pub stiffness_ratio: f64,
}

impl StabilityParameters {
    /// Create [`StabilityParameters`] with explicit values.
    #[must_use]
    pub const fn new(
        gusset: f64,
        restrainer: f64,
        length_ratio: f64,
        stiffness_ratio: f64,
    ) -> Self {
        Self {
            gusset,
            restrainer,
            length_ratio,
            stiffness_ratio,
        }
    }

    /// Copy of these parameters with a different gusset stiffness.
    #[must_use]
    pub const fn with_gusset(self, gusset: f64) -> Self {
        Self { gusset, ..self }
    }

    /// Copy of these parameters with a different restrainer end stiffness.
    #[must_use]
    pub const fn with_restrainer(self, restrainer: f64) -> Self {
        Self { restrainer, ..self }
    }

    /// Whether the characteristic equations for these parameters vanish identically.
    ///
    /// This is the domain clamp shared by every characteristic equation: no
    /// rotational restraint at either end, or non-physical geometry.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.stiffness_ratio <= 0.0
            || self.length_ratio <= 0.0
            || (self.gusset <= 0.0 && self.restrainer <= 0.0)
    }

    /// Check that the parameters describe a physical brace.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] found. Stiffnesses must be finite
    /// and non-negative with at least one of them positive, `ξ` must lie in
    /// `(0, 1)` and `γ` must be positive.
    ///
    /// # Examples
    /// ```
    /// use brbstab::{stability, ParameterError};
    ///
    /// assert!(stability(2.0, 2.0, 0.1, 1.0).validate().is_ok());
    /// assert_eq!(
    ///     stability(0.0, 0.0, 0.1, 1.0).validate(),
    ///     Err(ParameterError::NoRotationalRestraint)
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ParameterError> {
        non_negative("gusset", self.gusset)?;
        non_negative("restrainer", self.restrainer)?;
        if self.gusset == 0.0 && self.restrainer == 0.0 {
            return Err(ParameterError::NoRotationalRestraint);
        }
        if !(self.length_ratio > 0.0 && self.length_ratio < 1.0) {
            return Err(ParameterError::LengthRatioOutOfRange {
                length_ratio: self.length_ratio,
            });
        }
        if !(self.stiffness_ratio > 0.0) || !self.stiffness_ratio.is_finite() {
            return Err(ParameterError::NonPositiveStiffnessRatio {
                stiffness_ratio: self.stiffness_ratio,
            });
        }
        Ok(())
    }
}

/// Parameters of the two spans of a chevron arrangement.
///
/// The load is normalized against the connection of the first span.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChevronParameters {
    /// Span whose connection defines the reference load.
    pub first: StabilityParameters,
    /// Opposite span meeting the first at midspan.
    pub second: StabilityParameters,
}

impl ChevronParameters {
    /// Create [`ChevronParameters`] from two spans.
    #[must_use]
    pub const fn new(first: StabilityParameters, second: StabilityParameters) -> Self {
        Self { first, second }
    }

    /// Chevron with two identical spans.
    #[must_use]
    pub const fn mirrored(span: StabilityParameters) -> Self {
        Self::new(span, span)
    }

    /// Whether either span is degenerate.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.first.is_degenerate() || self.second.is_degenerate()
    }

    /// Check both spans.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidSpan`] wrapping the first failure.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (span, parameters) in [(1, &self.first), (2, &self.second)] {
            parameters
                .validate()
                .map_err(|source| ParameterError::InvalidSpan {
                    span,
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }
}

/// Plastic rotation capacity and imposed drift rotation at one hinge.
///
/// Both rotations are normalized by the hinge stiffness (`Mp/K`, `M0/K`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HingeRotation {
    /// Plastic rotation capacity `θp`, reduced for axial load.
    pub plastic: f64,
    /// Rotation demand from out-of-plane drift `θ0`.
    pub drift: f64,
}

impl HingeRotation {
    /// Create a [`HingeRotation`].
    #[must_use]
    pub const fn new(plastic: f64, drift: f64) -> Self {
        Self { plastic, drift }
    }

    /// Whether the hinge takes part in the governing limit state.
    ///
    /// A hinge without plastic capacity is not a binding constraint.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.plastic != 0.0
    }
}

/// Inelastic inputs for both hinge locations of a brace.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HingeCapacities {
    /// Hinge at the restrainer end.
    #[serde(default)]
    pub restrainer: HingeRotation,
    /// Hinge in the gusset.
    #[serde(default)]
    pub gusset: HingeRotation,
    /// Normalized initial imperfection at the restrainer end `Δr = ar/ξL0`.
    pub imperfection: f64,
}

impl HingeCapacities {
    /// Create [`HingeCapacities`].
    #[must_use]
    pub const fn new(restrainer: HingeRotation, gusset: HingeRotation, imperfection: f64) -> Self {
        Self {
            restrainer,
            gusset,
            imperfection,
        }
    }

    /// Check the imperfection and rotations.
    ///
    /// A zero imperfection divides by zero in the capacity model, so it is
    /// rejected here rather than guarded in the formula.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NonPositiveImperfection`] or
    /// [`ParameterError::NegativeValue`].
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.imperfection > 0.0) || !self.imperfection.is_finite() {
            return Err(ParameterError::NonPositiveImperfection {
                imperfection: self.imperfection,
            });
        }
        non_negative("restrainer.plastic", self.restrainer.plastic)?;
        non_negative("restrainer.drift", self.restrainer.drift)?;
        non_negative("gusset.plastic", self.gusset.plastic)?;
        non_negative("gusset.drift", self.gusset.drift)?;
        Ok(())
    }
}

/// Reject negative, infinite or NaN values for `field`.
fn non_negative(field: &'static str, value: f64) -> Result<(), ParameterError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NegativeValue { field, value })
    }
}

/// Convenience helper for creating [`StabilityParameters`].
///
/// # Examples
/// ```
/// use brbstab::stability;
///
/// let span = stability(2.0, 2.0, 0.1, 1.0);
/// assert_eq!(span.length_ratio, 0.1);
/// ```
#[must_use]
pub const fn stability(
    gusset: f64,
    restrainer: f64,
    length_ratio: f64,
    stiffness_ratio: f64,
) -> StabilityParameters {
    StabilityParameters::new(gusset, restrainer, length_ratio, stiffness_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_without_rotational_restraint() {
        assert!(stability(0.0, 0.0, 0.1, 1.0).is_degenerate());
        assert!(stability(1.0, 0.0, 0.0, 1.0).is_degenerate());
        assert!(stability(1.0, 0.0, 0.1, 0.0).is_degenerate());
        assert!(!stability(0.0, 1.0, 0.1, 1.0).is_degenerate());
    }

    #[test]
    fn validation_reports_offending_field() {
        let error = stability(-1.0, 2.0, 0.1, 1.0)
            .validate()
            .expect_err("negative stiffness rejected");
        assert_eq!(
            error,
            ParameterError::NegativeValue {
                field: "gusset",
                value: -1.0
            }
        );

        let error = stability(1.0, 2.0, 1.5, 1.0)
            .validate()
            .expect_err("length ratio above one rejected");
        assert_eq!(
            error,
            ParameterError::LengthRatioOutOfRange { length_ratio: 1.5 }
        );

        let error = stability(1.0, 2.0, 0.1, -0.5)
            .validate()
            .expect_err("negative stiffness ratio rejected");
        assert!(matches!(
            error,
            ParameterError::NonPositiveStiffnessRatio { .. }
        ));
    }

    #[test]
    fn chevron_validation_names_the_span() {
        let chevron = ChevronParameters::new(
            stability(1.0, 1.0, 0.1, 1.0),
            stability(1.0, 1.0, 0.1, 0.0),
        );
        let error = chevron.validate().expect_err("second span rejected");
        assert!(matches!(error, ParameterError::InvalidSpan { span: 2, .. }));
    }

    #[test]
    fn zero_imperfection_is_rejected() {
        let hinges = HingeCapacities::new(
            HingeRotation::new(0.01, 0.0),
            HingeRotation::default(),
            0.0,
        );
        assert_eq!(
            hinges.validate(),
            Err(ParameterError::NonPositiveImperfection { imperfection: 0.0 })
        );
    }

    #[test]
    fn hinge_without_plastic_capacity_is_inactive() {
        assert!(!HingeRotation::new(0.0, 0.0).is_active());
        assert!(!HingeRotation::new(0.0, 0.002).is_active());
        assert!(HingeRotation::new(0.01, 0.0).is_active());
    }

    #[test]
    fn hinge_capacities_deserialize_with_defaults() {
        let hinges: HingeCapacities =
            serde_json::from_str(r#"{"restrainer": {"plastic": 0.01}, "imperfection": 0.01}"#)
                .expect("valid json");
        assert_eq!(hinges.restrainer, HingeRotation::new(0.01, 0.0));
        assert_eq!(hinges.gusset, HingeRotation::default());
    }
}
