//! Data models for conformance runs
//!
//! This module contains the data structures shared by the contract, the
//! runner and the output layer.

mod parameter;
mod run_config;
mod test_result;
mod violation;

pub use parameter::{ParamValue, ParameterBag, ParameterDescriptor};
pub use run_config::{RunConfig, DEFAULT_PROBE_PREFIX};
pub use test_result::{ConformanceSummary, Scenario, ScenarioResult, TestStatus, SCENARIO_COUNT};
pub use violation::Violation;
