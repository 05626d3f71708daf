//! Reference gateways
//!
//! Bundled gateway implementations that satisfy the contract. The CLI runs
//! against these, and gateway authors can read them as worked examples.

mod dummy;
mod manual;
mod offsite;

pub use dummy::DummyGateway;
pub use manual::ManualGateway;
pub use offsite::{OffsiteGateway, RedirectRequest};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ScenarioProfile;
use crate::contract::{Capability, Gateway};
use crate::executor::ConformanceRunner;
use crate::models::{ConformanceSummary, ParameterDescriptor, RunConfig, Scenario};

/// Bundled gateway selector
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceGateway {
    Dummy,
    Manual,
    Offsite,
}

/// Static description of a gateway, for listings
#[derive(Clone, Debug, Serialize)]
pub struct GatewayInfo {
    pub name: String,
    pub short_name: String,
    pub parameters: Vec<ParameterDescriptor>,
    pub capabilities: Vec<Capability>,
}

impl GatewayInfo {
    pub fn of<G: Gateway>(gateway: &G) -> Self {
        Self {
            name: gateway.name().to_string(),
            short_name: gateway.short_name().to_string(),
            parameters: gateway.parameter_descriptors(),
            capabilities: gateway.supported_capabilities(),
        }
    }
}

impl ReferenceGateway {
    /// Get selector name, as accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            ReferenceGateway::Dummy => "dummy",
            ReferenceGateway::Manual => "manual",
            ReferenceGateway::Offsite => "offsite",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dummy" => Some(ReferenceGateway::Dummy),
            "manual" => Some(ReferenceGateway::Manual),
            "offsite" | "offsite-redirect" => Some(ReferenceGateway::Offsite),
            _ => None,
        }
    }

    pub fn all() -> Vec<ReferenceGateway> {
        vec![
            ReferenceGateway::Dummy,
            ReferenceGateway::Manual,
            ReferenceGateway::Offsite,
        ]
    }

    pub fn info(&self) -> GatewayInfo {
        match self {
            ReferenceGateway::Dummy => GatewayInfo::of(&DummyGateway::new()),
            ReferenceGateway::Manual => GatewayInfo::of(&ManualGateway::new()),
            ReferenceGateway::Offsite => GatewayInfo::of(&OffsiteGateway::new()),
        }
    }

    pub fn capabilities(&self) -> Vec<Capability> {
        self.info().capabilities
    }

    /// Run the given scenarios against fresh instances of this gateway
    pub fn run(&self, config: RunConfig, scenarios: &[Scenario]) -> ConformanceSummary {
        self.execute(config, Plan::Scenarios(scenarios))
    }

    /// Run the scenarios a profile names
    pub fn run_profile(&self, config: RunConfig, profile: &ScenarioProfile) -> ConformanceSummary {
        self.execute(config, Plan::Profile(profile))
    }

    fn execute(&self, config: RunConfig, plan: Plan<'_>) -> ConformanceSummary {
        match self {
            ReferenceGateway::Dummy => plan.drive(
                crate::conformance_runner!(DummyGateway, DummyGateway::new).with_config(config),
            ),
            ReferenceGateway::Manual => plan.drive(
                crate::conformance_runner!(ManualGateway, ManualGateway::new).with_config(config),
            ),
            ReferenceGateway::Offsite => plan.drive(
                crate::conformance_runner!(OffsiteGateway, OffsiteGateway::new).with_config(config),
            ),
        }
    }
}

enum Plan<'a> {
    Scenarios(&'a [Scenario]),
    Profile(&'a ScenarioProfile),
}

impl Plan<'_> {
    fn drive<G, F>(self, mut runner: ConformanceRunner<G, F>) -> ConformanceSummary
    where
        G: Gateway,
        F: Fn() -> G,
    {
        match self {
            Plan::Scenarios(scenarios) => runner.run_scenarios(scenarios),
            Plan::Profile(profile) => runner.run_profile(profile),
        }
    }
}

impl fmt::Display for ReferenceGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(ReferenceGateway::from_str("DUMMY"), Some(ReferenceGateway::Dummy));
        assert_eq!(
            ReferenceGateway::from_str("offsite-redirect"),
            Some(ReferenceGateway::Offsite)
        );
        assert_eq!(ReferenceGateway::from_str("stripe"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for gateway in ReferenceGateway::all() {
            assert_eq!(ReferenceGateway::from_str(gateway.name()), Some(gateway));
        }
    }

    #[test]
    fn test_info() {
        let info = ReferenceGateway::Offsite.info();
        assert_eq!(info.name, "Offsite Redirect");
        assert_eq!(info.short_name, "Offsite");
        assert_eq!(info.parameters[1].getter_name, "getSecretWord");
        assert_eq!(ReferenceGateway::Manual.capabilities().len(), 3);
    }

    #[test]
    fn test_reference_gateways_conform() {
        for gateway in ReferenceGateway::all() {
            let summary = gateway.run(RunConfig::default(), &Scenario::all());
            assert!(summary.is_conformant(), "{summary}");
            assert_eq!(summary.total, 26);
        }
    }

    #[test]
    fn test_run_profile() {
        let summary =
            ReferenceGateway::Manual.run_profile(RunConfig::default(), &ScenarioProfile::baseline());
        assert_eq!(summary.total, 6);
        assert_eq!(summary.results[5].scenario, Scenario::Currency);
        assert!(summary.is_conformant(), "{summary}");
    }
}
