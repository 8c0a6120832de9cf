#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod capacity;
pub mod characteristic;
pub mod crossover;
pub mod elastic;
pub mod errors;
pub mod mode_shape;
pub mod parameters;
pub mod scanner;

pub use capacity::{
    governing_critical_load, interaction_capacity, reduced_critical_load,
    restrainer_hinge_limit, two_hinge_limit, GoverningMode, ModeCapacities, ModeCapacity,
};
pub use characteristic::{characteristic_value, Topology};
pub use crossover::{
    critical_mode_crossover, mode_capacity_ratio, CrossoverParameter, CrossoverSearch,
};
pub use elastic::{
    elastic_buckling_load, normalized_stiffness, reference_load, BraceProperties,
    ElasticLoadOptions,
};
pub use errors::ParameterError;
pub use mode_shape::{mode_shape_ratio, HingeLocation, ModeShape};
pub use parameters::{
    stability, ChevronParameters, HingeCapacities, HingeRotation, StabilityParameters,
};
pub use scanner::{find_mode_root, solve_scalar, ScanOptions, SearchRange};
