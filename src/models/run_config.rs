//! Run configuration
//!
//! Per-run settings handed to the conformance runner.

use serde::{Deserialize, Serialize};

use super::ParameterBag;

/// Default prefix for generated probe values
pub const DEFAULT_PROBE_PREFIX: &str = "probe-";

/// Conformance run configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunConfig {
    /// Scenario numbers to report as skipped
    #[serde(default)]
    pub skip_scenarios: Vec<u8>,

    /// Prefix for probe values
    #[serde(default = "default_probe_prefix")]
    pub probe_prefix: String,

    /// Parameters applied to every fresh gateway before a scenario runs
    #[serde(default)]
    pub parameters: ParameterBag,
}

fn default_probe_prefix() -> String {
    DEFAULT_PROBE_PREFIX.to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            skip_scenarios: Vec::new(),
            probe_prefix: default_probe_prefix(),
            parameters: ParameterBag::new(),
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_scenario(mut self, number: u8) -> Self {
        if !self.skip_scenarios.contains(&number) {
            self.skip_scenarios.push(number);
        }
        self
    }

    pub fn with_probe_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.probe_prefix = prefix.into();
        self
    }

    pub fn with_parameters(mut self, parameters: ParameterBag) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn is_skipped(&self, number: u8) -> bool {
        self.skip_scenarios.contains(&number)
    }
}
