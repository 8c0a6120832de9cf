use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use brbstab::{
    stability, CrossoverParameter, CrossoverSearch, HingeCapacities, HingeRotation,
    ParameterError, ScanOptions, SearchRange, StabilityParameters,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inputs for one brace analysed by the command line tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BraceCase {
    /// Normalized stiffness and geometry.
    pub parameters: StabilityParameters,
    /// Hinge capacities and imperfection.
    pub hinges: HingeCapacities,
    /// Eigenvalue scan settings.
    #[serde(default)]
    pub scan: ScanOptions,
    /// Optional search for the stiffness at which the governing shape switches.
    #[serde(default)]
    pub crossover: Option<CrossoverSearch>,
}

impl Default for BraceCase {
    /// Brace whose governing shape switches as the restrainer end stiffens.
    fn default() -> Self {
        Self {
            parameters: stability(1.0, 0.5, 0.1, 0.1),
            hinges: HingeCapacities::new(
                HingeRotation::new(0.01, 0.0),
                HingeRotation::new(0.01, 0.0),
                0.1,
            ),
            scan: ScanOptions::default(),
            crossover: Some(CrossoverSearch::new(
                CrossoverParameter::Restrainer,
                SearchRange::new(0.3, 1.0, 0.01),
            )),
        }
    }
}

impl BraceCase {
    /// Check every input of the case.
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.parameters.validate()?;
        self.hinges.validate()?;
        self.scan.validate()?;
        if let Some(search) = &self.crossover {
            search.validate()?;
        }
        Ok(())
    }
}

/// Error returned when a case file cannot be used.
#[derive(Debug, Error)]
pub enum CaseError {
    /// Returned when the case file cannot be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Returned when the case file is not valid JSON for a [`BraceCase`].
    #[error("invalid case file: {0}")]
    Json(#[from] serde_json::Error),
    /// Returned when the case describes a non-physical brace.
    #[error("invalid case: {0}")]
    Parameter(#[from] ParameterError),
}

/// Load and validate a case, falling back to the demonstration case.
pub fn load_case(path: Option<&Path>) -> Result<BraceCase, CaseError> {
    let case = match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CaseError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&text)?
        }
        None => BraceCase::default(),
    };
    case.validate()?;
    Ok(case)
}
