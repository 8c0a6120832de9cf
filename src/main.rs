mod analysis;
mod case;
mod report;

use analysis::run_analysis;
use case::load_case;
use report::render_summary;
use std::env;
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    // An optional JSON case file; the demonstration brace runs without one.
    let path = env::args_os().nth(1).map(PathBuf::from);
    let case = load_case(path.as_deref())?;

    // Solve both buckling shapes, the hinge limit states and, when requested,
    // the stiffness at which the governing shape switches.
    let summary = run_analysis(&case);

    println!("{}", render_summary(&summary)?);
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
