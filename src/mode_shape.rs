//! Elastic buckling mode shapes of the stick-and-spring model.
//!
//! The ratios returned here are hinge rotation over restrainer end lateral
//! displacement at the solved eigenvalue. Multiplied by the axial load they
//! give the P-δ moment at the hinge, `Mpδ = c·N·yr`, so the ratio doubles as
//! the moment amplification factor `c` of the capacity model.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::parameters::StabilityParameters;

/// Topologies with a closed-form mode shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeShape {
    /// Symmetric buckling mode.
    Symmetric,
    /// Antisymmetric buckling mode.
    Antisymmetric,
    /// One-sided buckling mode.
    OneSided,
}

/// Hinge location at which the rotation is measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HingeLocation {
    /// Rotation of the gusset spring.
    Gusset,
    /// Rotation at the restrainer end.
    Restrainer,
}

/// Rotation over lateral displacement at `location` for the given mode.
///
/// Only the gusset stiffness `κg` and length ratio `ξ` of `parameters` enter
/// the expressions. Returns `NaN` when `ke` is one of the scanner sentinels
/// (`0`, `+∞`, `NaN`) or when the shared denominator vanishes.
///
/// # Examples
/// ```
/// use brbstab::{mode_shape_ratio, stability, HingeLocation, ModeShape};
///
/// let span = stability(2.0, 2.0, 0.1, 1.0);
/// let shape = ModeShape::Symmetric;
/// let restrainer = mode_shape_ratio(shape, HingeLocation::Restrainer, 5.7, &span, false);
/// let gusset = mode_shape_ratio(shape, HingeLocation::Gusset, 5.7, &span, false);
/// assert!((restrainer - gusset - 1.0).abs() < 1.0e-12);
/// assert!(mode_shape_ratio(shape, HingeLocation::Gusset, 0.0, &span, true).is_nan());
/// ```
#[must_use]
pub fn mode_shape_ratio(
    shape: ModeShape,
    location: HingeLocation,
    ke: f64,
    parameters: &StabilityParameters,
    absolute: bool,
) -> f64 {
    if !(ke > 0.0 && ke.is_finite()) {
        return f64::NAN;
    }
    let kg = parameters.gusset;
    let xi = parameters.length_ratio;
    let ratio = match (shape, location) {
        (ModeShape::Symmetric, HingeLocation::Restrainer) => restrainer_symmetric(ke, kg),
        (ModeShape::Symmetric, HingeLocation::Gusset) => gusset_symmetric(ke, kg),
        (ModeShape::Antisymmetric, HingeLocation::Restrainer) => {
            restrainer_antisymmetric(ke, kg, xi)
        }
        (ModeShape::Antisymmetric, HingeLocation::Gusset) => gusset_antisymmetric(ke, kg, xi),
        (ModeShape::OneSided, HingeLocation::Restrainer) => restrainer_one_sided(ke, kg, xi),
        (ModeShape::OneSided, HingeLocation::Gusset) => gusset_one_sided(ke, kg, xi),
    };
    if absolute {
        ratio.abs()
    } else {
        ratio
    }
}

/// `numerator / denominator`, or NaN when the denominator vanishes.
fn checked_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}

/// Numerator shared by the symmetric ratios.
fn symmetric_numerator(ke: f64, kg: f64) -> f64 {
    let wave = PI / ke;
    wave * wave.sin() - kg * wave.cos()
}

/// Symmetric mode, restrainer end.
fn restrainer_symmetric(ke: f64, kg: f64) -> f64 {
    let numerator = symmetric_numerator(ke, kg);
    checked_ratio(numerator, numerator + kg)
}

/// Symmetric mode, gusset.
fn gusset_symmetric(ke: f64, kg: f64) -> f64 {
    checked_ratio(-kg, symmetric_numerator(ke, kg) + kg)
}

/// Shared antisymmetric / one-sided numerator; `span` is `2ξ` or `ξ`.
fn sway_numerator(ke: f64, kg: f64, span: f64) -> f64 {
    let wave = PI / ke;
    (wave.powi(2) + span * kg) * wave.sin() - kg * wave * wave.cos()
}

/// Antisymmetric mode, restrainer end.
fn restrainer_antisymmetric(ke: f64, kg: f64, xi: f64) -> f64 {
    let numerator = sway_numerator(ke, kg, 2.0 * xi);
    checked_ratio(numerator, numerator + kg * PI / ke * (1.0 - 2.0 * xi))
}

/// Antisymmetric mode, gusset.
fn gusset_antisymmetric(ke: f64, kg: f64, xi: f64) -> f64 {
    let numerator = sway_numerator(ke, kg, 2.0 * xi);
    checked_ratio(-(kg * PI / ke), numerator + kg * PI / ke * (1.0 - 2.0 * xi))
}

/// One-sided mode, restrainer end.
fn restrainer_one_sided(ke: f64, kg: f64, xi: f64) -> f64 {
    let numerator = sway_numerator(ke, kg, xi);
    checked_ratio(numerator, numerator + kg * PI / ke * (1.0 - xi))
}

/// One-sided mode, gusset.
fn gusset_one_sided(ke: f64, kg: f64, xi: f64) -> f64 {
    let numerator = sway_numerator(ke, kg, xi);
    checked_ratio(-(kg * PI / ke), numerator + kg * PI / ke * (1.0 - xi))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::parameters::stability;

    const SHAPES: [ModeShape; 3] = [
        ModeShape::Symmetric,
        ModeShape::Antisymmetric,
        ModeShape::OneSided,
    ];

    #[test]
    fn restrainer_and_gusset_ratios_are_linked() {
        // cr - cg·(1 - s·ξ) = 1 with s = 0, 2, 1 for the three shapes.
        let span = stability(3.0, 1.0, 0.15, 1.0);
        for (shape, lever) in SHAPES.into_iter().zip([1.0, 1.0 - 0.3, 1.0 - 0.15]) {
            for ke in [1.3, 2.7, 4.1] {
                let cr = mode_shape_ratio(shape, HingeLocation::Restrainer, ke, &span, false);
                let cg = mode_shape_ratio(shape, HingeLocation::Gusset, ke, &span, false);
                assert_relative_eq!(cr - cg * lever, 1.0, epsilon = 1.0e-9);
            }
        }
    }

    #[test]
    fn absolute_flag_strips_sign() {
        let span = stability(2.0, 2.0, 0.1, 1.0);
        for shape in SHAPES {
            let signed = mode_shape_ratio(shape, HingeLocation::Gusset, 3.3, &span, false);
            let absolute = mode_shape_ratio(shape, HingeLocation::Gusset, 3.3, &span, true);
            assert_eq!(absolute, signed.abs());
        }
    }

    #[test]
    fn scanner_sentinels_propagate_as_nan() {
        let span = stability(2.0, 2.0, 0.1, 1.0);
        for shape in SHAPES {
            for location in [HingeLocation::Gusset, HingeLocation::Restrainer] {
                for ke in [0.0, f64::INFINITY, f64::NAN, -1.0] {
                    assert!(mode_shape_ratio(shape, location, ke, &span, true).is_nan());
                }
            }
        }
    }

    #[test]
    fn pinned_gusset_carries_no_moment() {
        // Without gusset stiffness the symmetric restrainer ratio is exactly 1
        // and the gusset carries no moment.
        let span = stability(0.0, 2.0, 0.1, 1.0);
        let shape = ModeShape::Symmetric;
        let cr = mode_shape_ratio(shape, HingeLocation::Restrainer, 2.5, &span, false);
        let cg = mode_shape_ratio(shape, HingeLocation::Gusset, 2.5, &span, false);
        assert_relative_eq!(cr, 1.0, epsilon = 1.0e-12);
        assert_eq!(cg, 0.0);
    }
}
