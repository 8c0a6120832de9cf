//! Characteristic (stability determinant) equations for each spring topology.
//!
//! Every equation is written in the dimensionless load `N = P/N⁰cr`, where
//! `N⁰cr = π²γEIr/(ξL0)²` is the Euler load of the connection zone. Roots of
//! the equation with a sign change are buckling eigenvalues.
//!
//! All equations return exactly `0` for negative loads, non-positive `γ` or
//! `ξ`, and spans without any rotational stiffness. The scanner reads a zero
//! at its first sample as a degenerate system rather than as a root.

use std::f64::consts::PI;

use nalgebra::SMatrix;
use serde::{Deserialize, Serialize};

use crate::parameters::{ChevronParameters, StabilityParameters};
use crate::scanner::{find_mode_root, ScanOptions};

/// Dense matrix of the six continuity and equilibrium conditions.
type Matrix6 = SMatrix<f64, 6, 6>;

/// Spring and boundary arrangement of the stick-and-spring model.
///
/// Each variant carries its own normalized parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topology", content = "parameters", rename_all = "snake_case")]
pub enum Topology {
    /// Both connections rotate in the same sense; the restrainer translates.
    ///
    /// ```text
    ///   κg      κr @----------------@ κr      κg
    ///   @---------/                  \---------@
    /// ```
    Symmetric(StabilityParameters),
    /// The connections rotate in opposite senses about the brace midpoint.
    ///
    /// ```text
    ///          -----@-----
    ///   @----/     κr    \----\     κr    /----@
    ///   κg                     -----@-----     κg
    /// ```
    Antisymmetric(StabilityParameters),
    /// Only one connection buckles; the far end is held by the restrainer.
    ///
    /// ```text
    ///   κg   ------@--------
    ///   @---/      κr       \--------O==========@
    /// ```
    OneSided(StabilityParameters),
    /// Two braces meeting at midspan in a chevron arrangement.
    Chevron(ChevronParameters),
    /// Symmetric mode with the restrainer treated as rigid and its
    /// flexibility folded into the restrainer end spring.
    SymmetricRigidRestrainer(StabilityParameters),
    /// Antisymmetric mode with the restrainer treated as rigid and its
    /// flexibility folded into the restrainer end spring.
    AntisymmetricRigidRestrainer(StabilityParameters),
}

impl Topology {
    /// Evaluate the characteristic equation at the trial load `n`.
    ///
    /// # Examples
    /// ```
    /// use brbstab::{stability, Topology};
    ///
    /// let topology = Topology::Symmetric(stability(2.0, 2.0, 0.1, 1.0));
    /// assert_eq!(topology.characteristic_value(-1.0), 0.0);
    /// ```
    #[must_use]
    pub fn characteristic_value(&self, n: f64) -> f64 {
        match self {
            Topology::Symmetric(p) => symmetric(n, p),
            Topology::Antisymmetric(p) => antisymmetric(n, p),
            Topology::OneSided(p) => one_sided(n, p),
            Topology::Chevron(p) => chevron(n, p),
            Topology::SymmetricRigidRestrainer(p) => symmetric_rigid_restrainer(n, p),
            Topology::AntisymmetricRigidRestrainer(p) => antisymmetric_rigid_restrainer(n, p),
        }
    }

    /// Solve for the effective length factor of the requested mode.
    ///
    /// The factor is relative to the connection length `ξL0`; see
    /// [`find_mode_root`] for the sentinel values.
    ///
    /// # Examples
    /// ```
    /// use brbstab::{stability, ScanOptions, Topology};
    ///
    /// let span = stability(2.0, 2.0, 0.1, 1.0);
    /// let ke = Topology::Symmetric(span).effective_length_factor(&ScanOptions::default());
    /// let full_length_factor = ke * span.length_ratio;
    /// assert!(full_length_factor > 0.5 && full_length_factor < 1.0);
    /// ```
    #[must_use]
    pub fn effective_length_factor(&self, options: &ScanOptions) -> f64 {
        find_mode_root(|n| self.characteristic_value(n), options)
    }
}

/// Evaluate the characteristic equation of `topology` at the trial load `n`.
#[must_use]
pub fn characteristic_value(topology: &Topology, n: f64) -> f64 {
    topology.characteristic_value(n)
}

/// Whether the shared domain clamp applies.
fn outside_domain(n: f64, p: &StabilityParameters) -> bool {
    n < 0.0 || p.is_degenerate()
}

/// Symmetric mode determinant.
pub fn symmetric(n: f64, p: &StabilityParameters) -> f64 {
    if outside_domain(n, p) {
        return 0.0;
    }
    let (kg, kr, xi, gamma) = (p.gusset, p.restrainer, p.length_ratio, p.stiffness_ratio);
    let root_n = n.sqrt();
    let (s1, c1) = (root_n * PI).sin_cos();
    let (s2, c2) = (root_n * PI * gamma.sqrt() / xi * (0.5 - xi)).sin_cos();

    n * PI * PI * s1 * c2
        + root_n * PI * (kr * (gamma.sqrt() * s1 * s2 - c1 * c2) - kg * c1 * c2)
        - kg * kr * (s1 * c2 + gamma.sqrt() * c1 * s2)
}

/// Antisymmetric mode determinant.
pub fn antisymmetric(n: f64, p: &StabilityParameters) -> f64 {
    if outside_domain(n, p) {
        return 0.0;
    }
    let (kg, kr, xi, gamma) = (p.gusset, p.restrainer, p.length_ratio, p.stiffness_ratio);
    let root_n = n.sqrt();
    let (s1, c1) = (root_n * PI).sin_cos();
    let (s2, c2) = (root_n * PI * gamma.sqrt() / xi * (0.5 - xi)).sin_cos();

    root_n * n * PI * PI * PI * s1 * s2
        - n * PI * PI * (kr * (gamma.sqrt() * s1 * c2 + c1 * s2) + kg * c1 * s2)
        + PI * root_n * kg * (2.0 * xi * s1 * s2 + kr * (gamma.sqrt() * c1 * c2 - s1 * s2))
        - 2.0 * kr * kg * xi * (gamma.sqrt() * s1 * c2 + c1 * s2)
}

/// One-sided mode determinant.
pub fn one_sided(n: f64, p: &StabilityParameters) -> f64 {
    if outside_domain(n, p) {
        return 0.0;
    }
    let (kg, kr, xi, gamma) = (p.gusset, p.restrainer, p.length_ratio, p.stiffness_ratio);
    let root_n = n.sqrt();
    let (s1, c1) = (root_n * PI).sin_cos();
    let (s10, c10) = (root_n * PI * gamma.sqrt() * (1.0 - 1.0 / xi)).sin_cos();

    root_n * n * PI * PI * PI * s1 * s10
        + PI * PI * n * (kr * (gamma.sqrt() * s1 * c10 - c1 * s10) - kg * c1 * s10)
        + PI * kg * root_n * (xi * s1 * s10 - kr * (gamma.sqrt() * c1 * c10 + s1 * s10))
        + kr * kg * xi * (gamma.sqrt() * s1 * c10 - c1 * s10)
}

/// Chevron determinant assembled from the six continuity and equilibrium
/// conditions at both connections and at midspan.
pub fn chevron(n: f64, p: &ChevronParameters) -> f64 {
    if n < 0.0 || p.is_degenerate() {
        return 0.0;
    }
    let (kg1, kr1, xi1, g1) = (
        p.first.gusset,
        p.first.restrainer,
        p.first.length_ratio,
        p.first.stiffness_ratio,
    );
    let (kg2, kr2, xi2, g2) = (
        p.second.gusset,
        p.second.restrainer,
        p.second.length_ratio,
        p.second.stiffness_ratio,
    );
    let root_n = n.sqrt();
    let (s1, c1) = (root_n * PI).sin_cos();
    let (s4, c4) = (root_n * g1.sqrt() * PI).sin_cos();
    let (s6, c6) = (root_n * (g1 / g2).sqrt() * PI / xi1 * (1.0 - xi2)).sin_cos();
    let (s7, c7) = (root_n * g1.sqrt() * PI / xi1 * (1.0 - xi2)).sin_cos();
    let (s8, c8) = (root_n * (g1 / g2).sqrt() * PI / xi1).sin_cos();
    // load parameter of the second connection, expressed on the first span's scale
    let n2 = root_n * PI * xi2 / xi1 * (g1 / g2).sqrt();

    let closure = if kg1 == 0.0 && kg2 == 0.0 {
        [0.0, g2 / g1, 0.0, 0.0, xi2 / xi1 * s8, xi2 / xi1 * c8]
    } else {
        [
            (g2 / g1).sqrt() * kg1 * kg2,
            root_n * (g2 / g1).sqrt() * PI * kg2,
            0.0,
            0.0,
            kg1 * n2 * s8 - kg1 * kg2 * c8,
            kg1 * n2 * c8 + kg1 * kg2 * s8,
        ]
    };
    let rows: [[f64; 6]; 6] = [
        [
            kg1 * PI / xi1 * root_n,
            kg1 + n * PI.powi(2) / xi1,
            0.0,
            0.0,
            -kg1 * s8,
            -kg1 * c8,
        ],
        [s1, c1, -s4, -c4, 0.0, 0.0],
        [
            -kr1 * c1,
            kr1 * s1,
            root_n * PI * s4 + g1.sqrt() * kr1 * c4,
            root_n * PI * c4 - g1.sqrt() * kr1 * s4,
            0.0,
            0.0,
        ],
        [0.0, 0.0, s7, c7, -s6, -c6],
        [
            0.0,
            0.0,
            -g2.sqrt() * kr2 * c7,
            g2.sqrt() * kr2 * s7,
            n2 * s6 + kr2 * c6,
            n2 * c6 - kr2 * s6,
        ],
        closure,
    ];

    Matrix6::from_fn(|row, col| rows[row][col]).determinant()
}

/// Symmetric mode with a rigid restrainer and a combined end spring.
pub fn symmetric_rigid_restrainer(n: f64, p: &StabilityParameters) -> f64 {
    if outside_domain(n, p) {
        return 0.0;
    }
    let (kg, xi, gamma) = (p.gusset, p.length_ratio, p.stiffness_ratio);
    let (s1, c1) = (n.sqrt() * PI).sin_cos();
    let load = PI * n.sqrt();
    let kr = combined_spring(p.restrainer, gamma * (1.0 - 2.0 * xi) / 2.0 / xi);

    kg * (load * c1 + kr * s1) - load * (load * s1 - kr * c1)
}

/// Antisymmetric mode with a rigid restrainer and a combined end spring.
///
/// Several entries divide by `π√N`, so `N = 0` is clamped to `0` along with
/// the shared domain.
pub fn antisymmetric_rigid_restrainer(n: f64, p: &StabilityParameters) -> f64 {
    if n == 0.0 || outside_domain(n, p) {
        return 0.0;
    }
    let (kg, xi, gamma) = (p.gusset, p.length_ratio, p.stiffness_ratio);
    let (s1, c1) = (n.sqrt() * PI).sin_cos();
    let load = PI * n.sqrt();
    let kr = combined_spring(p.restrainer, gamma * (1.0 - 2.0 * xi) / 6.0 / xi);

    let rows: [[f64; 6]; 6] = [
        [0.0, 1.0, 0.0, 1.0, 0.0, 0.0],
        [kg, load, kg / load, 0.0, 0.0, 0.0],
        [s1, c1, 1.0, 1.0, -1.0, -1.0],
        [0.0, 0.0, 1.0, 0.0, -1.0, 0.0],
        [
            load * s1 - kr * c1,
            load * c1 + kr * s1,
            -kr / load,
            0.0,
            kr / load,
            0.0,
        ],
        [0.0, 0.0, 0.0, 0.0, 1.0 / 2.0 / xi, 1.0],
    ];

    Matrix6::from_fn(|row, col| rows[row][col]).determinant()
}

/// Series combination of the restrainer end spring and the restrainer flexibility.
fn combined_spring(restrainer: f64, flexibility: f64) -> f64 {
    1.0 / (1.0 / restrainer + flexibility)
}
