//! Scenario profiles
//!
//! Named selections of scenarios, predefined or loaded from a config file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Scenario, SCENARIO_COUNT};

/// Scenario profile - collection of scenarios to run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProfile {
    /// Profile name
    pub name: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Scenario numbers to include
    pub scenarios: Vec<u8>,
    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ScenarioProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            scenarios: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Every scenario (1-26)
    pub fn all() -> Self {
        Self {
            name: "all".to_string(),
            description: format!("Run all {SCENARIO_COUNT} scenarios"),
            scenarios: (1..=SCENARIO_COUNT).collect(),
            tags: vec!["comprehensive".to_string()],
        }
    }

    /// Identity and normalization checks
    pub fn baseline() -> Self {
        Self {
            name: "baseline".to_string(),
            description: "Names, default parameters, test mode and currency".to_string(),
            scenarios: (1..=6).collect(),
            tags: vec!["quick".to_string(), "baseline".to_string()],
        }
    }

    /// Support flags against the capability surface
    pub fn capabilities() -> Self {
        Self {
            name: "capabilities".to_string(),
            description: "Support flags agree with capability factories".to_string(),
            scenarios: (7..=16).collect(),
            tags: vec!["capability".to_string()],
        }
    }

    /// Parameter propagation into requests
    pub fn propagation() -> Self {
        Self {
            name: "propagation".to_string(),
            description: "Gateway parameters propagate into every request".to_string(),
            scenarios: (17..=26).collect(),
            tags: vec!["propagation".to_string()],
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_scenarios(mut self, scenarios: Vec<u8>) -> Self {
        self.scenarios = scenarios;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Resolve scenario numbers; numbers outside 1-26 are dropped
    pub fn resolve(&self) -> Vec<Scenario> {
        self.scenarios
            .iter()
            .filter_map(|&n| Scenario::from_number(n))
            .collect()
    }

    /// Scenario numbers outside 1-26
    pub fn invalid_scenarios(&self) -> Vec<u8> {
        self.scenarios
            .iter()
            .copied()
            .filter(|&n| Scenario::from_number(n).is_none())
            .collect()
    }

    pub fn predefined() -> Vec<ScenarioProfile> {
        vec![
            Self::all(),
            Self::baseline(),
            Self::capabilities(),
            Self::propagation(),
        ]
    }

    pub fn find(name: &str) -> Option<ScenarioProfile> {
        Self::predefined().into_iter().find(|p| p.name == name)
    }
}

/// Profile manager holding predefined and custom profiles
pub struct ProfileManager {
    profiles: BTreeMap<String, ScenarioProfile>,
}

impl ProfileManager {
    /// Create a profile manager with the predefined profiles
    pub fn new() -> Self {
        let mut manager = Self {
            profiles: BTreeMap::new(),
        };
        for profile in ScenarioProfile::predefined() {
            manager.add(profile);
        }
        manager
    }

    /// Predefined profiles plus the given custom ones; custom names win
    pub fn with_custom(custom: &[ScenarioProfile]) -> Self {
        let mut manager = Self::new();
        for profile in custom {
            manager.add(profile.clone());
        }
        manager
    }

    pub fn get(&self, name: &str) -> Option<&ScenarioProfile> {
        self.profiles.get(name)
    }

    pub fn add(&mut self, profile: ScenarioProfile) {
        self.profiles.insert(profile.name.clone(), profile);
    }

    /// Profiles sorted by name
    pub fn list(&self) -> Vec<&ScenarioProfile> {
        self.profiles.values().collect()
    }
}

impl Default for ProfileManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Capability;

    #[test]
    fn test_profile_all() {
        let profile = ScenarioProfile::all();
        assert_eq!(profile.resolve(), Scenario::all());
    }

    #[test]
    fn test_profile_propagation() {
        let scenarios = ScenarioProfile::propagation().resolve();
        assert_eq!(scenarios.len(), 10);
        assert_eq!(scenarios[0], Scenario::Parameters(Capability::Authorize));
    }

    #[test]
    fn test_invalid_scenarios_dropped() {
        let profile = ScenarioProfile::new("custom").with_scenarios(vec![0, 1, 27]);
        assert_eq!(profile.resolve(), vec![Scenario::NameNotEmpty]);
        assert_eq!(profile.invalid_scenarios(), vec![0, 27]);
    }

    #[test]
    fn test_find_profile() {
        let profile = ScenarioProfile::find("baseline");
        assert!(profile.is_some());
        assert_eq!(profile.unwrap().scenarios, vec![1, 2, 3, 4, 5, 6]);
        assert!(ScenarioProfile::find("routing").is_none());
    }

    #[test]
    fn test_profile_manager_custom_overrides() {
        let custom = ScenarioProfile::new("baseline").with_scenarios(vec![1]);
        let manager = ProfileManager::with_custom(&[custom]);

        assert_eq!(manager.get("baseline").unwrap().scenarios, vec![1]);
        assert!(manager.get("propagation").is_some());
        assert_eq!(manager.list().len(), 4);
    }
}
