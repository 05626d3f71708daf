//! Conformance execution engine
//!
//! Baseline checks, parameter propagation checks, and the runner that ties
//! them to the numbered scenarios.

mod assertions;
mod baseline;
mod probe;
mod propagation;
mod runner;

pub use assertions::CheckLog;
pub use probe::ProbeGenerator;
pub use propagation::ParameterPropagationChecker;
pub use runner::{assert_conformant, quick_check, run_scenario_by_number, ConformanceRunner};
