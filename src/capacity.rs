//! Inelastic capacity of the brace once plastic hinges form at its ends.
//!
//! Loads in this module are normalized by `N⁰cr`, like the eigenvalues they are
//! built from, so the elastic limit of a mode is `1/ke²`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::characteristic::Topology;
use crate::mode_shape::{mode_shape_ratio, HingeLocation, ModeShape};
use crate::parameters::{HingeCapacities, HingeRotation, StabilityParameters};
use crate::scanner::ScanOptions;

/// `max(0, x)` that keeps NaN.
fn positive_part(x: f64) -> f64 {
    if x.is_nan() {
        x
    } else {
        x.max(0.0)
    }
}

/// `min(a, b)` that keeps NaN from either side.
pub(crate) fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

/// Reduced critical load of one hinge location.
///
/// With `X = max(0, θp − θ0)·κ / (π²·c·Δr)` the result is `X / (X·ke² + 1)`:
/// it approaches the elastic load `1/ke²` as the hinge capacity grows and
/// vanishes when none is left above the drift demand.
///
/// `c` is the moment amplification (absolute mode-shape ratio) at the hinge
/// and `κ` its normalized stiffness. A zero `c` or `Δr` is outside the input
/// domain and divides by zero; it is not guarded here.
///
/// # Examples
/// ```
/// use brbstab::reduced_critical_load;
///
/// let load = reduced_critical_load(5.7, 0.5, 2.0, 0.02, 0.005, 0.01);
/// assert!(load > 0.0 && load < 1.0 / 5.7_f64.powi(2));
/// assert_eq!(reduced_critical_load(5.7, 0.5, 2.0, 0.02, 0.02, 0.01), 0.0);
/// ```
#[must_use]
pub fn reduced_critical_load(
    ke: f64,
    c: f64,
    stiffness: f64,
    plastic: f64,
    drift: f64,
    imperfection: f64,
) -> f64 {
    let capacity = positive_part(plastic - drift) * stiffness / PI.powi(2) / c / imperfection;
    capacity / (capacity * ke.powi(2) + 1.0)
}

/// Restrainer-end limit of the two-hinge interaction model.
///
/// `ke` is the elastic factor of the braced system and `ke_pinned` the factor
/// with pinned restrainer ends, which the restrainer hinge falls back on.
#[must_use]
pub fn restrainer_hinge_limit(
    ke: f64,
    ke_pinned: f64,
    restrainer_stiffness: f64,
    restrainer: &HingeRotation,
    imperfection: f64,
) -> f64 {
    let capacity = positive_part(restrainer.plastic - restrainer.drift) * restrainer_stiffness
        / PI.powi(2)
        / imperfection;
    (capacity + 1.0 / ke_pinned.powi(2)) / (capacity * ke.powi(2) + 1.0)
}

/// Mechanism limit with hinges at both the restrainer end and the gusset.
#[must_use]
pub fn two_hinge_limit(ke: f64, parameters: &StabilityParameters, hinges: &HingeCapacities) -> f64 {
    let moment = positive_part(hinges.restrainer.plastic - hinges.restrainer.drift)
        * parameters.restrainer
        + positive_part(hinges.gusset.plastic - hinges.gusset.drift) * parameters.gusset;
    let capacity = moment / PI.powi(2) / hinges.imperfection;
    capacity / (capacity * ke.powi(2) + 1.0)
}

/// Lower of [`restrainer_hinge_limit`] and [`two_hinge_limit`].
#[must_use]
pub fn interaction_capacity(
    ke: f64,
    ke_pinned: f64,
    parameters: &StabilityParameters,
    hinges: &HingeCapacities,
) -> f64 {
    nan_min(
        restrainer_hinge_limit(
            ke,
            ke_pinned,
            parameters.restrainer,
            &hinges.restrainer,
            hinges.imperfection,
        ),
        two_hinge_limit(ke, parameters, hinges),
    )
}

/// Buckling shape that sets the governing capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoverningMode {
    /// The symmetric mode has the lower capacity.
    Symmetric,
    /// The antisymmetric mode has the lower capacity.
    Antisymmetric,
}

/// Elastic and inelastic results for one buckling shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeCapacity {
    /// Elastic effective length factor relative to `ξL0`.
    pub effective_length: f64,
    /// Moment amplification at the restrainer end.
    pub restrainer_amplification: f64,
    /// Moment amplification at the gusset.
    pub gusset_amplification: f64,
    /// Reduced critical load with a hinge at the restrainer end.
    pub restrainer_load: f64,
    /// Reduced critical load with a hinge in the gusset.
    pub gusset_load: f64,
}

impl ModeCapacity {
    /// Solve one shape and evaluate both hinge locations.
    #[must_use]
    pub fn evaluate(
        shape: ModeShape,
        parameters: &StabilityParameters,
        hinges: &HingeCapacities,
        options: &ScanOptions,
    ) -> Self {
        let topology = match shape {
            ModeShape::Symmetric => Topology::Symmetric(*parameters),
            ModeShape::Antisymmetric => Topology::Antisymmetric(*parameters),
            ModeShape::OneSided => Topology::OneSided(*parameters),
        };
        let ke = topology.effective_length_factor(options);
        let restrainer_amplification =
            mode_shape_ratio(shape, HingeLocation::Restrainer, ke, parameters, true);
        let gusset_amplification =
            mode_shape_ratio(shape, HingeLocation::Gusset, ke, parameters, true);

        Self {
            effective_length: ke,
            restrainer_amplification,
            gusset_amplification,
            restrainer_load: reduced_critical_load(
                ke,
                restrainer_amplification,
                parameters.restrainer,
                hinges.restrainer.plastic,
                hinges.restrainer.drift,
                hinges.imperfection,
            ),
            gusset_load: reduced_critical_load(
                ke,
                gusset_amplification,
                parameters.gusset,
                hinges.gusset.plastic,
                hinges.gusset.drift,
                hinges.imperfection,
            ),
        }
    }

    /// Elastic buckling load `1/ke²`.
    #[must_use]
    pub fn elastic_load(&self) -> f64 {
        1.0 / self.effective_length.powi(2)
    }

    /// Governing load over the active hinge locations.
    ///
    /// A hinge without plastic capacity is skipped; when the restrainer end
    /// has none, the gusset governs regardless of the gusset's own capacity.
    #[must_use]
    pub fn governing_load(&self, hinges: &HingeCapacities) -> f64 {
        if !hinges.restrainer.is_active() {
            self.gusset_load
        } else if !hinges.gusset.is_active() {
            self.restrainer_load
        } else {
            nan_min(self.gusset_load, self.restrainer_load)
        }
    }
}

/// Symmetric and antisymmetric results for one brace.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeCapacities {
    /// Symmetric shape.
    pub symmetric: ModeCapacity,
    /// Antisymmetric shape.
    pub antisymmetric: ModeCapacity,
}

impl ModeCapacities {
    /// Solve both shapes for `parameters`.
    ///
    /// # Examples
    /// ```
    /// use brbstab::{stability, HingeCapacities, HingeRotation, ModeCapacities, ScanOptions};
    ///
    /// let span = stability(2.0, 2.0, 0.1, 1.0);
    /// let hinges = HingeCapacities::new(
    ///     HingeRotation::new(0.01, 0.0),
    ///     HingeRotation::new(0.01, 0.0),
    ///     0.01,
    /// );
    /// let capacities = ModeCapacities::evaluate(&span, &hinges, &ScanOptions::default());
    /// let governing = capacities.governing_load(&hinges);
    /// assert!(governing > 0.0 && governing <= capacities.symmetric.elastic_load());
    /// ```
    #[must_use]
    pub fn evaluate(
        parameters: &StabilityParameters,
        hinges: &HingeCapacities,
        options: &ScanOptions,
    ) -> Self {
        Self {
            symmetric: ModeCapacity::evaluate(ModeShape::Symmetric, parameters, hinges, options),
            antisymmetric: ModeCapacity::evaluate(
                ModeShape::Antisymmetric,
                parameters,
                hinges,
                options,
            ),
        }
    }

    /// Ratio of symmetric to antisymmetric governing load.
    ///
    /// Below one the symmetric shape governs the design.
    #[must_use]
    pub fn mode_ratio(&self, hinges: &HingeCapacities) -> f64 {
        self.symmetric.governing_load(hinges) / self.antisymmetric.governing_load(hinges)
    }

    /// Governing load over both shapes and all active hinges.
    #[must_use]
    pub fn governing_load(&self, hinges: &HingeCapacities) -> f64 {
        nan_min(
            self.symmetric.governing_load(hinges),
            self.antisymmetric.governing_load(hinges),
        )
    }

    /// Shape with the lower governing load, if the loads are comparable.
    #[must_use]
    pub fn governing_mode(&self, hinges: &HingeCapacities) -> Option<GoverningMode> {
        let symmetric = self.symmetric.governing_load(hinges);
        let antisymmetric = self.antisymmetric.governing_load(hinges);
        if symmetric.is_nan() || antisymmetric.is_nan() {
            None
        } else if symmetric <= antisymmetric {
            Some(GoverningMode::Symmetric)
        } else {
            Some(GoverningMode::Antisymmetric)
        }
    }
}

/// Governing reduced critical load of a brace over both shapes.
#[must_use]
pub fn governing_critical_load(
    parameters: &StabilityParameters,
    hinges: &HingeCapacities,
    options: &ScanOptions,
) -> f64 {
    ModeCapacities::evaluate(parameters, hinges, options).governing_load(hinges)
}
