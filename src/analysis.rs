use brbstab::{
    critical_mode_crossover, interaction_capacity, GoverningMode, ModeCapacities, Topology,
};
use serde::Serialize;

use crate::case::BraceCase;

/// Summary of the stability checks for one brace case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    /// Inputs that generated the result, exposed for reporting.
    pub case: BraceCase,
    /// Elastic and reduced loads per buckling shape.
    pub capacities: ModeCapacities,
    /// Effective length factor of the one-sided shape.
    pub one_sided_effective_length: f64,
    /// Governing reduced critical load over both shapes.
    pub governing_load: f64,
    /// Shape with the lower reduced load.
    pub governing_mode: Option<GoverningMode>,
    /// Capacity from the two-hinge interaction limits.
    pub interaction_capacity: f64,
    /// Stiffness at which the governing shape switches, when searched.
    pub crossover: Option<f64>,
}

/// Run every check for `case`.
///
/// Results keep the numeric sentinels of the library: `NaN` or `0` in a field
/// means the corresponding search did not converge inside its range.
pub fn run_analysis(case: &BraceCase) -> AnalysisSummary {
    let parameters = case.parameters;
    let capacities = ModeCapacities::evaluate(&parameters, &case.hinges, &case.scan);

    let one_sided_effective_length =
        Topology::OneSided(parameters).effective_length_factor(&case.scan);

    // factor with the restrainer end pinned, for the restrainer hinge limit
    let pinned_effective_length =
        Topology::Symmetric(parameters.with_restrainer(0.0)).effective_length_factor(&case.scan);
    let interaction_capacity = interaction_capacity(
        capacities.symmetric.effective_length,
        pinned_effective_length,
        &parameters,
        &case.hinges,
    );

    let crossover = case
        .crossover
        .map(|search| critical_mode_crossover(&parameters, &case.hinges, &search));

    AnalysisSummary {
        case: *case,
        capacities,
        one_sided_effective_length,
        governing_load: capacities.governing_load(&case.hinges),
        governing_mode: capacities.governing_mode(&case.hinges),
        interaction_capacity,
        crossover,
    }
}
