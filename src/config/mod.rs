//! Configuration module
//!
//! Handles loading and managing configuration.

mod env;
mod file;
mod profile;

pub use env::{parse_scenario_list, print_env_help, EnvBuilder, EnvConfig, EnvGuard, ENV_PREFIX};
pub use file::ConfigFile;
pub use profile::{ProfileManager, ScenarioProfile};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{RunConfig, DEFAULT_PROBE_PREFIX};
use crate::output::OutputFormat;
use crate::utils::LogLevel;

/// Harness settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Gateway tested when none is named (dummy, manual, offsite, all)
    pub default_gateway: String,

    /// Output format
    pub format: OutputFormat,

    /// Colour table output
    pub colorize: bool,

    /// Prefix for generated probe values
    pub probe_prefix: String,

    /// Scenario numbers to skip
    pub skip_scenarios: Vec<u8>,

    pub log_level: LogLevel,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            default_gateway: "all".to_string(),
            format: OutputFormat::Table,
            colorize: true,
            probe_prefix: DEFAULT_PROBE_PREFIX.to_string(),
            skip_scenarios: Vec::new(),
            log_level: LogLevel::Info,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;

        let config: Self = if is_yaml(path.as_ref()) {
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?
        } else {
            serde_json::from_str(&content).context("Failed to parse JSON config")?
        };

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = if is_yaml(path.as_ref()) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Runner settings derived from these harness settings
    pub fn run_config(&self) -> RunConfig {
        let mut config = RunConfig::new().with_probe_prefix(self.probe_prefix.clone());
        for &number in &self.skip_scenarios {
            config = config.skip_scenario(number);
        }
        config
    }
}

pub(crate) fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
