//! Elastic buckling loads in physical units.
//!
//! Any consistent unit system works; the load comes out in the force unit
//! implied by the stiffness and length inputs.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::characteristic::Topology;
use crate::parameters::StabilityParameters;
use crate::scanner::ScanOptions;

/// Physical properties of a brace and its connections.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BraceProperties {
    /// Gusset rotational stiffness `Kg`.
    pub gusset_stiffness: f64,
    /// Restrainer end rotational stiffness `Kr`.
    pub restrainer_stiffness: f64,
    /// Connection length `ξL0`.
    pub connection_length: f64,
    /// Flexural rigidity of the connection zone `γEIr`.
    pub connection_rigidity: f64,
    /// Full buckling length `L0`.
    pub length: f64,
    /// Flexural rigidity of the restrainer `EIr`.
    pub restrainer_rigidity: f64,
}

impl BraceProperties {
    /// Normalized parameters of this brace.
    ///
    /// # Examples
    /// ```
    /// use brbstab::BraceProperties;
    ///
    /// let brace = BraceProperties {
    ///     gusset_stiffness: 4.0e4,
    ///     restrainer_stiffness: 4.0e4,
    ///     connection_length: 500.0,
    ///     connection_rigidity: 1.0e7,
    ///     length: 5000.0,
    ///     restrainer_rigidity: 1.0e7,
    /// };
    /// let span = brace.stability_parameters();
    /// assert_eq!(span.gusset, 2.0);
    /// assert_eq!(span.length_ratio, 0.1);
    /// ```
    #[must_use]
    pub fn stability_parameters(&self) -> StabilityParameters {
        StabilityParameters::new(
            normalized_stiffness(
                self.gusset_stiffness,
                self.connection_length,
                self.connection_rigidity,
            ),
            normalized_stiffness(
                self.restrainer_stiffness,
                self.connection_length,
                self.connection_rigidity,
            ),
            self.connection_length / self.length,
            self.connection_rigidity / self.restrainer_rigidity,
        )
    }

    /// Euler load of the connection zone, `N⁰cr`.
    #[must_use]
    pub fn reference_load(&self) -> f64 {
        reference_load(self.connection_length, self.connection_rigidity)
    }
}

/// Rotational stiffness normalized by the connection zone, `K·ξL0/γEIr`.
#[must_use]
pub fn normalized_stiffness(
    stiffness: f64,
    connection_length: f64,
    connection_rigidity: f64,
) -> f64 {
    stiffness * connection_length / connection_rigidity
}

/// Euler load of the connection zone, `π²·γEIr/(ξL0)²`.
#[must_use]
pub fn reference_load(connection_length: f64, connection_rigidity: f64) -> f64 {
    PI.powi(2) * connection_rigidity / connection_length.powi(2)
}

/// Scan settings for a dimensional elastic load.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticLoadOptions {
    /// Load increment in force units (default `1.0`).
    pub load_increment: f64,
    /// One-based mode number (default 1).
    pub mode: usize,
}

impl Default for ElasticLoadOptions {
    fn default() -> Self {
        Self {
            load_increment: 1.0,
            mode: 1,
        }
    }
}

impl ElasticLoadOptions {
    /// Normalized scan for a reference load of `reference_load`.
    ///
    /// The ceiling is `N⁰cr` itself, which no connection-governed mode exceeds.
    #[must_use]
    pub fn scan_options(&self, reference_load: f64) -> ScanOptions {
        ScanOptions {
            mode: self.mode,
            step: self.load_increment / reference_load,
            max_load: 1.0,
        }
    }
}

/// Elastic buckling load `N⁰cr/ke²` of `topology`.
///
/// A degenerate system (`ke = +∞`) yields `0`. When no root exists below
/// `N⁰cr` the factor is `0` and the load is `+∞`. For a chevron,
/// `reference_load` must be that of the first span.
///
/// # Examples
/// ```
/// use brbstab::{elastic_buckling_load, stability, ElasticLoadOptions, Topology};
///
/// let topology = Topology::Symmetric(stability(2.0, 2.0, 0.1, 1.0));
/// let load = elastic_buckling_load(&topology, 1.0e6, &ElasticLoadOptions::default());
/// assert!(load > 1.0e6 / 36.0 && load < 1.0e6 / 25.0);
///
/// let free = Topology::Symmetric(stability(0.0, 0.0, 0.1, 1.0));
/// assert_eq!(elastic_buckling_load(&free, 1.0e6, &ElasticLoadOptions::default()), 0.0);
/// ```
#[must_use]
pub fn elastic_buckling_load(
    topology: &Topology,
    reference_load: f64,
    options: &ElasticLoadOptions,
) -> f64 {
    let ke = topology.effective_length_factor(&options.scan_options(reference_load));
    if ke == f64::INFINITY {
        return 0.0;
    }
    reference_load / ke.powi(2)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::parameters::stability;

    fn brace() -> BraceProperties {
        BraceProperties {
            gusset_stiffness: 4.0e4,
            restrainer_stiffness: 4.0e4,
            connection_length: 500.0,
            connection_rigidity: 1.0e7,
            length: 5000.0,
            restrainer_rigidity: 1.0e7,
        }
    }

    #[test]
    fn normalizes_against_connection_zone() {
        let span = brace().stability_parameters();
        assert_relative_eq!(span.gusset, 2.0);
        assert_relative_eq!(span.restrainer, 2.0);
        assert_relative_eq!(span.length_ratio, 0.1);
        assert_relative_eq!(span.stiffness_ratio, 1.0);
        assert_relative_eq!(brace().reference_load(), PI * PI * 40.0, max_relative = 1.0e-12);
    }

    #[test]
    fn load_matches_normalized_eigenvalue() {
        let brace = brace();
        let topology = Topology::Symmetric(brace.stability_parameters());
        let reference = brace.reference_load();
        let options = ElasticLoadOptions {
            load_increment: reference * 1.0e-4,
            mode: 1,
        };
        let ke = topology.effective_length_factor(&ScanOptions {
            max_load: 1.0,
            ..ScanOptions::default()
        });
        assert_relative_eq!(
            elastic_buckling_load(&topology, reference, &options),
            reference / (ke * ke),
            max_relative = 1.0e-9
        );
    }

    #[test]
    fn degenerate_system_has_no_load() {
        let topology = Topology::Antisymmetric(stability(0.0, 0.0, 0.1, 1.0));
        assert_eq!(
            elastic_buckling_load(&topology, 100.0, &ElasticLoadOptions::default()),
            0.0
        );
    }

    #[test]
    fn no_root_below_reference_load_is_infinite() {
        // With step equal to the ceiling the scan never gets past its first sample.
        let topology = Topology::Symmetric(stability(2.0, 2.0, 0.1, 1.0));
        let options = ElasticLoadOptions {
            load_increment: 100.0,
            mode: 1,
        };
        assert_eq!(
            elastic_buckling_load(&topology, 100.0, &options),
            f64::INFINITY
        );
    }
}
