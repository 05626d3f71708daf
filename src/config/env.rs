//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use anyhow::{bail, Context, Result};
use std::env;

use super::HarnessConfig;
use crate::models::{Scenario, SCENARIO_COUNT};
use crate::output::OutputFormat;
use crate::utils::LogLevel;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "GATEWAY_CONFORMANCE";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Gateway from GATEWAY_CONFORMANCE_GATEWAY
    pub gateway: Option<String>,
    /// Output format from GATEWAY_CONFORMANCE_FORMAT
    pub format: Option<String>,
    /// Config file from GATEWAY_CONFORMANCE_CONFIG
    pub config_file: Option<String>,
    /// Comma-separated scenario numbers from GATEWAY_CONFORMANCE_SKIP,
    /// validated when applied
    pub skip: Option<String>,
    /// Probe prefix from GATEWAY_CONFORMANCE_PROBE_PREFIX
    pub probe_prefix: Option<String>,
    /// Log level from GATEWAY_CONFORMANCE_LOG
    pub log: Option<String>,
    /// Disable colour from GATEWAY_CONFORMANCE_NO_COLOR
    pub no_color: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            gateway: get_env("GATEWAY"),
            format: get_env("FORMAT"),
            config_file: get_env("CONFIG"),
            skip: get_env("SKIP"),
            probe_prefix: get_env("PROBE_PREFIX"),
            log: get_env("LOG"),
            no_color: get_env_bool("NO_COLOR"),
        }
    }

    /// Overlay the variables that are set onto a file-level configuration.
    /// Unknown formats and log levels are ignored; a bad skip list is an error.
    pub fn apply_to(&self, config: &mut HarnessConfig) -> Result<()> {
        if let Some(gateway) = &self.gateway {
            config.default_gateway = gateway.clone();
        }
        if let Some(format) = self.format.as_deref().and_then(OutputFormat::from_str) {
            config.format = format;
        }
        if let Some(skip) = &self.skip {
            config.skip_scenarios = parse_scenario_list(skip)
                .with_context(|| format!("Invalid {ENV_PREFIX}_SKIP value"))?;
        }
        if let Some(prefix) = &self.probe_prefix {
            config.probe_prefix = prefix.clone();
        }
        if let Some(level) = self.log.as_deref().and_then(LogLevel::from_str) {
            config.log_level = level;
        }
        if let Some(no_color) = self.no_color {
            config.colorize = !no_color;
        }
        Ok(())
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_GATEWAY:       {:?}", ENV_PREFIX, self.gateway);
        println!("  {}_FORMAT:        {:?}", ENV_PREFIX, self.format);
        println!("  {}_CONFIG:        {:?}", ENV_PREFIX, self.config_file);
        println!("  {}_SKIP:          {:?}", ENV_PREFIX, self.skip);
        println!("  {}_PROBE_PREFIX:  {:?}", ENV_PREFIX, self.probe_prefix);
        println!("  {}_LOG:           {:?}", ENV_PREFIX, self.log);
        println!("  {}_NO_COLOR:      {:?}", ENV_PREFIX, self.no_color);
    }
}

/// Parse `1,2, 5` into scenario numbers. Empty entries are ignored.
pub fn parse_scenario_list(value: &str) -> Result<Vec<u8>> {
    let mut numbers = Vec::new();
    for entry in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let number: u8 = entry
            .parse()
            .with_context(|| format!("'{entry}' is not a scenario number"))?;
        if Scenario::from_number(number).is_none() {
            bail!("Invalid scenario number {number}. Valid range: 1-{SCENARIO_COUNT}");
        }
        numbers.push(number);
    }
    Ok(numbers)
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Builder for setting environment variables (useful for testing)
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

impl EnvBuilder {
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    pub fn gateway(mut self, gateway: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_GATEWAY"), gateway.into()));
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_FORMAT"), format.into()));
        self
    }

    pub fn skip(mut self, scenarios: &[u8]) -> Self {
        let list = scenarios
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.vars.push((format!("{ENV_PREFIX}_SKIP"), list));
        self
    }

    pub fn probe_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_PROBE_PREFIX"), prefix.into()));
        self
    }

    pub fn no_color(mut self, no_color: bool) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_NO_COLOR"), no_color.to_string()));
        self
    }

    /// Apply environment variables
    pub fn apply(self) {
        for (key, value) in self.vars {
            env::set_var(key, value);
        }
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        self.apply();

        EnvGuard { previous }
    }
}

impl Default for EnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that restores environment variables on drop
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

/// Print all GATEWAY_CONFORMANCE environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_GATEWAY       Gateway to test (dummy, manual, offsite, all)");
    println!("  {ENV_PREFIX}_FORMAT        Output format (table, json, json-pretty, csv, summary)");
    println!("  {ENV_PREFIX}_CONFIG        Path to configuration file");
    println!("  {ENV_PREFIX}_SKIP          Scenario numbers to skip (e.g. 3,17)");
    println!("  {ENV_PREFIX}_PROBE_PREFIX  Prefix for generated probe values");
    println!("  {ENV_PREFIX}_LOG           Log level (trace, debug, info, warn, error)");
    println!("  {ENV_PREFIX}_NO_COLOR      Disable coloured output (true/false)");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_GATEWAY=offsite");
    println!("  export {ENV_PREFIX}_SKIP=6");
    println!("  gateway-conformance test");
}
