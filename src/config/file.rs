//! Configuration file management
//!
//! Handles finding, loading, and validating configuration files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::profile::{ProfileManager, ScenarioProfile};
use super::{is_yaml, HarnessConfig};
use crate::gateways::ReferenceGateway;
use crate::models::{ParameterBag, RunConfig, Scenario, SCENARIO_COUNT};

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./gateway-conformance.yaml",
    "./gateway-conformance.yml",
    "./.gateway-conformance.yaml",
    "~/.config/gateway-conformance/config.yaml",
];

const SUPPORTED_VERSIONS: &[&str] = &["1.0"];

/// Full configuration file structure
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Version of config file format
    #[serde(default = "default_version")]
    pub version: String,

    /// Harness settings
    #[serde(default)]
    pub harness: HarnessConfig,

    /// Custom scenario profiles
    #[serde(default)]
    pub scenario_profiles: Vec<ScenarioProfile>,

    /// Parameter overrides per gateway, applied before every scenario
    #[serde(default)]
    pub gateways: BTreeMap<String, ParameterBag>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            version: default_version(),
            harness: HarnessConfig::default(),
            scenario_profiles: Vec::new(),
            gateways: BTreeMap::new(),
        }
    }
}

impl ConfigFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        CONFIG_LOCATIONS
            .iter()
            .map(|location| expand_path(location))
            .find(|path| path.exists())
    }

    /// Load configuration from default location
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::find() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_VERSIONS.contains(&self.version.as_str()) {
            anyhow::bail!("Unsupported config version: {}", self.version);
        }

        if self.harness.probe_prefix.is_empty() {
            anyhow::bail!("probe_prefix must not be empty");
        }

        let gateway = &self.harness.default_gateway;
        if gateway != "all" && ReferenceGateway::from_str(gateway).is_none() {
            anyhow::bail!("Unknown default gateway: {}", gateway);
        }

        for number in &self.harness.skip_scenarios {
            if Scenario::from_number(*number).is_none() {
                anyhow::bail!(
                    "Invalid scenario number {} in skip_scenarios. Valid range: 1-{}",
                    number,
                    SCENARIO_COUNT
                );
            }
        }

        for profile in &self.scenario_profiles {
            if let Some(number) = profile.invalid_scenarios().first() {
                anyhow::bail!(
                    "Invalid scenario number {} in profile '{}'. Valid range: 1-{}",
                    number,
                    profile.name,
                    SCENARIO_COUNT
                );
            }
        }

        for name in self.gateways.keys() {
            if ReferenceGateway::from_str(name).is_none() {
                anyhow::bail!("Parameter overrides for unknown gateway: {}", name);
            }
        }

        Ok(())
    }

    /// Generate example configuration
    pub fn example() -> Self {
        let mut gateways = BTreeMap::new();
        gateways.insert(
            "dummy".to_string(),
            ParameterBag::new()
                .with("apiKey", "sk_test_example")
                .with("testMode", true),
        );
        gateways.insert(
            "offsite".to_string(),
            ParameterBag::new().with("merchant_id", "m-1001"),
        );

        Self {
            version: "1.0".to_string(),
            harness: HarnessConfig::default(),
            scenario_profiles: vec![ScenarioProfile::new("smoke")
                .with_description("Names and supported capabilities")
                .with_scenarios(vec![1, 2, 7, 9, 10])
                .with_tag("quick")],
            gateways,
        }
    }

    /// Get scenario profile by name, custom profiles first
    pub fn scenario_profile(&self, name: &str) -> Option<ScenarioProfile> {
        self.profile_manager().get(name).cloned()
    }

    pub fn profile_manager(&self) -> ProfileManager {
        ProfileManager::with_custom(&self.scenario_profiles)
    }

    /// Parameter overrides configured for a gateway
    pub fn gateway_parameters(&self, gateway: ReferenceGateway) -> ParameterBag {
        self.gateways
            .get(gateway.name())
            .cloned()
            .unwrap_or_default()
    }

    /// Runner settings for one gateway
    pub fn run_config(&self, gateway: ReferenceGateway) -> RunConfig {
        self.harness
            .run_config()
            .with_parameters(self.gateway_parameters(gateway))
    }

    /// Merge with another config (other takes precedence)
    pub fn merge(&mut self, other: ConfigFile) {
        let defaults = HarnessConfig::default();
        if other.harness.default_gateway != defaults.default_gateway {
            self.harness.default_gateway = other.harness.default_gateway;
        }
        if other.harness.format != defaults.format {
            self.harness.format = other.harness.format;
        }
        if !other.harness.colorize {
            self.harness.colorize = false;
        }
        if other.harness.probe_prefix != defaults.probe_prefix {
            self.harness.probe_prefix = other.harness.probe_prefix;
        }
        if !other.harness.skip_scenarios.is_empty() {
            self.harness.skip_scenarios = other.harness.skip_scenarios;
        }
        if other.harness.log_level != defaults.log_level {
            self.harness.log_level = other.harness.log_level;
        }

        for profile in other.scenario_profiles {
            self.scenario_profiles.retain(|p| p.name != profile.name);
            self.scenario_profiles.push(profile);
        }
        for (gateway, parameters) in other.gateways {
            self.gateways.entry(gateway).or_default().merge(&parameters);
        }
    }
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_file_default() {
        let config = ConfigFile::default();
        assert_eq!(config.version, "1.0");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_example() {
        let config = ConfigFile::example();
        assert!(config.validate().is_ok());
        assert!(config.scenario_profile("smoke").is_some());
        assert!(config.scenario_profile("propagation").is_some());
        assert_eq!(
            config
                .gateway_parameters(ReferenceGateway::Dummy)
                .get_str("apiKey"),
            Some("sk_test_example")
        );
        assert!(config.gateway_parameters(ReferenceGateway::Manual).is_empty());
    }

    #[test]
    fn test_config_file_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = ConfigFile::example();
        config.save(&path).unwrap();

        let loaded = ConfigFile::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_config() {
        let mut config = ConfigFile::default();
        config
            .scenario_profiles
            .push(ScenarioProfile::new("invalid").with_scenarios(vec![27]));
        assert!(config.validate().is_err());

        let mut config = ConfigFile::default();
        config.version = "2.0".to_string();
        assert!(config.validate().is_err());

        let mut config = ConfigFile::default();
        config.harness.probe_prefix = String::new();
        assert!(config.validate().is_err());

        let mut config = ConfigFile::default();
        config
            .gateways
            .insert("stripe".to_string(), ParameterBag::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_run_config_carries_overrides() {
        let mut config = ConfigFile::example();
        config.harness.skip_scenarios = vec![6];

        let run = config.run_config(ReferenceGateway::Dummy);
        assert!(run.is_skipped(6));
        assert_eq!(run.parameters.get_str("apiKey"), Some("sk_test_example"));
    }

    #[test]
    fn test_merge() {
        let mut base = ConfigFile::example();
        let mut other = ConfigFile::default();
        other.harness.probe_prefix = "other-".to_string();
        other
            .gateways
            .insert("dummy".to_string(), ParameterBag::new().with("apiKey", "k2"));

        base.merge(other);
        assert_eq!(base.harness.probe_prefix, "other-");
        let dummy = base.gateway_parameters(ReferenceGateway::Dummy);
        assert_eq!(dummy.get_str("apiKey"), Some("k2"));
        assert_eq!(dummy.get_bool("testMode"), Some(true));
    }

    #[test]
    fn test_expand_path() {
        let path = expand_path("./test.yaml");
        assert_eq!(path, PathBuf::from("./test.yaml"));
    }
}
