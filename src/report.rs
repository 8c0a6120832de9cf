use std::fmt::{self, Write};

use brbstab::{GoverningMode, ModeCapacity};

use crate::analysis::AnalysisSummary;

/// Render a textual summary of a brace analysis.
///
/// Loads are printed in units of the connection Euler load `N⁰cr`, and the
/// effective length factors relative to the connection length `ξL0`.
pub fn render_summary(summary: &AnalysisSummary) -> Result<String, fmt::Error> {
    let mut output = String::new();
    let parameters = &summary.case.parameters;

    writeln!(
        &mut output,
        "BRB stability (κg = {:.3}, κr = {:.3}, ξ = {:.3}, γ = {:.3})",
        parameters.gusset,
        parameters.restrainer,
        parameters.length_ratio,
        parameters.stiffness_ratio
    )?;

    let xi = parameters.length_ratio;
    write_mode(&mut output, "symmetric", &summary.capacities.symmetric, xi)?;
    write_mode(&mut output, "antisymmetric", &summary.capacities.antisymmetric, xi)?;
    writeln!(
        &mut output,
        "One-sided: ke = {:.4}",
        summary.one_sided_effective_length
    )?;

    let mode = match summary.governing_mode {
        Some(GoverningMode::Symmetric) => "symmetric",
        Some(GoverningMode::Antisymmetric) => "antisymmetric",
        None => "undetermined",
    };
    writeln!(
        &mut output,
        "Governing reduced load: {:.5} N⁰cr ({mode} shape)",
        summary.governing_load
    )?;
    writeln!(
        &mut output,
        "Two-hinge interaction capacity: {:.5} N⁰cr",
        summary.interaction_capacity
    )?;

    match summary.crossover {
        Some(stiffness) if stiffness.is_nan() => {
            output.push_str("Crossover stiffness: not found in range\n");
        }
        Some(stiffness) => {
            writeln!(&mut output, "Crossover stiffness: {stiffness:.4}")?;
        }
        None => {}
    }

    Ok(output)
}

/// One line per buckling shape.
fn write_mode(output: &mut String, name: &str, mode: &ModeCapacity, xi: f64) -> fmt::Result {
    write!(
        output,
        "Mode {name}: ke = {:.4} (ke·ξ = {:.4}), elastic = {:.5}, ",
        mode.effective_length,
        mode.effective_length * xi,
        mode.elastic_load()
    )?;
    writeln!(
        output,
        "restrainer hinge = {:.5}, gusset hinge = {:.5}",
        mode.restrainer_load, mode.gusset_load
    )
}
