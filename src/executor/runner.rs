//! Conformance runner
//!
//! Runs scenarios against fresh gateway instances and collects their results.

use anyhow::{Context, Result};
use chrono::Utc;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{error, info};

use super::assertions::CheckLog;
use super::baseline;
use super::probe::ProbeGenerator;
use super::propagation::ParameterPropagationChecker;
use crate::config::ScenarioProfile;
use crate::contract::{
    AccessorResolver, Capability, CapabilityDescriptor, CapabilityMatrix, Gateway,
};
use crate::models::{ConformanceSummary, RunConfig, Scenario, ScenarioResult, Violation};
use crate::utils::Timer;

/// What a scenario produced before it was turned into a result
enum Outcome {
    Checked(CheckLog),
    Skipped(String),
}

/// Conformance runner for one gateway type.
///
/// `factory` is called once per scenario so that no scenario observes state
/// left behind by another.
///
/// A runner built with [`new`](Self::new) sees only the gateway's surface:
/// an unsupported capability is reported when `as_<capability>()` exposes
/// it. Built through [`conformance_runner!`](crate::conformance_runner) it
/// also knows which capability traits the type implements, and an
/// implemented but unsupported capability is reported as well.
pub struct ConformanceRunner<G, F>
where
    F: Fn() -> G,
{
    factory: F,
    config: RunConfig,
    probes: ProbeGenerator,
    implemented: Option<Vec<Capability>>,
}

impl<G, F> ConformanceRunner<G, F>
where
    G: Gateway,
    F: Fn() -> G,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            config: RunConfig::default(),
            probes: ProbeGenerator::default(),
            implemented: None,
        }
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.probes = ProbeGenerator::new(config.probe_prefix.clone());
        self.config = config;
        self
    }

    /// Capability traits the gateway type implements
    pub fn with_implemented_capabilities(mut self, implemented: Vec<Capability>) -> Self {
        self.implemented = Some(implemented);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Probes issued so far in this run
    pub fn probes_issued(&self) -> u64 {
        self.probes.issued()
    }

    /// Run a single scenario
    pub fn run_scenario(&mut self, scenario: Scenario) -> ScenarioResult {
        if self.config.is_skipped(scenario.number()) {
            return ScenarioResult::skip(scenario, "Skipped by configuration");
        }

        info!("Running {}", scenario);
        let timer = Timer::start(scenario.to_string());

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.execute(scenario)));
        let duration_ms = timer.stop();

        match outcome {
            Ok(Outcome::Checked(log)) => log.into_result(scenario, duration_ms),
            Ok(Outcome::Skipped(reason)) => {
                ScenarioResult::skip(scenario, reason).with_duration(duration_ms)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("{} panicked: {}", scenario, message);
                ScenarioResult::error(scenario, format!("gateway panicked: {message}"))
                    .with_duration(duration_ms)
            }
        }
    }

    /// Run all 26 scenarios in order
    pub fn run_all(&mut self) -> ConformanceSummary {
        self.run_scenarios(&Scenario::all())
    }

    /// Run the scenarios named by a profile
    pub fn run_profile(&mut self, profile: &ScenarioProfile) -> ConformanceSummary {
        info!("Running profile '{}'", profile.name);
        self.run_scenarios(&profile.resolve())
    }

    /// Run specific scenarios, in the order given
    pub fn run_scenarios(&mut self, scenarios: &[Scenario]) -> ConformanceSummary {
        let started_at = Utc::now();
        let (name, short_name) = self.gateway_names();
        info!("Starting conformance run for {} Gateway", name);

        let timer = Timer::start(format!("{name} conformance run"));
        let mut results = Vec::with_capacity(scenarios.len());

        for &scenario in scenarios {
            let result = self.run_scenario(scenario);
            info!("  {}", result);
            results.push(result);
        }

        let summary = ConformanceSummary::new(name, short_name, started_at, results);

        info!(
            "Conformance run completed in {}ms - Pass: {}/{} ({:.1}%)",
            timer.stop(),
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        summary
    }

    fn fresh_gateway(&self) -> G {
        let mut gateway = (self.factory)();
        if !self.config.parameters.is_empty() {
            gateway.initialize(&self.config.parameters);
        }
        gateway
    }

    /// Names for the report; a gateway that panics here still gets a report
    fn gateway_names(&self) -> (String, String) {
        let names = panic::catch_unwind(AssertUnwindSafe(|| {
            let gateway = (self.factory)();
            (gateway.name().to_string(), gateway.short_name().to_string())
        }));
        names.unwrap_or_else(|_| ("<unknown>".to_string(), "<unknown>".to_string()))
    }

    fn implements(&self, capability: Capability) -> bool {
        self.implemented
            .as_ref()
            .is_some_and(|implemented| implemented.contains(&capability))
    }

    fn execute(&mut self, scenario: Scenario) -> Outcome {
        let mut gateway = self.fresh_gateway();
        let mut log = CheckLog::new();

        match scenario {
            Scenario::NameNotEmpty => baseline::check_name(&gateway, &mut log),
            Scenario::ShortNameNotEmpty => baseline::check_short_name(&gateway, &mut log),
            Scenario::DefaultParametersMap => {
                baseline::check_default_parameters(&gateway, &mut log)
            }
            Scenario::DefaultParameterAccessors => {
                ParameterPropagationChecker::new(&mut self.probes)
                    .check_round_trip(&mut gateway, &mut log)
            }
            Scenario::TestMode => baseline::check_test_mode(&mut gateway, &mut log),
            Scenario::Currency => baseline::check_currency(&mut gateway, &mut log),
            Scenario::Supports(capability) => {
                let descriptor = CapabilityMatrix::descriptor::<G>(capability);
                let implemented = self.implements(capability);
                check_support(&gateway, &descriptor, implemented, &mut log);
            }
            Scenario::Parameters(capability) => {
                let descriptor = CapabilityMatrix::descriptor::<G>(capability);
                if !descriptor.is_supported(&gateway) {
                    check_absent(&gateway, &descriptor, self.implements(capability), &mut log);
                    if log.is_clean() {
                        return Outcome::Skipped(format!(
                            "{}() is false",
                            capability.support_flag()
                        ));
                    }
                    return Outcome::Checked(log);
                }
                ParameterPropagationChecker::new(&mut self.probes).check_capability(
                    &mut gateway,
                    &descriptor,
                    &mut log,
                );
            }
        }

        Outcome::Checked(log)
    }
}

/// The support flag agrees with the factory surface, and a supported
/// factory builds requests that expose every shared parameter.
fn check_support<G: Gateway>(
    gateway: &G,
    descriptor: &CapabilityDescriptor<G>,
    implemented: bool,
    log: &mut CheckLog,
) {
    let capability = descriptor.capability;

    if !descriptor.is_supported(gateway) {
        check_absent(gateway, descriptor, implemented, log);
        return;
    }

    let Some(request) = descriptor.create_request(gateway) else {
        log.fail(Violation::MissingCapability { capability });
        return;
    };
    log.pass();

    let actual = request.capability();
    log.check(actual == capability, || Violation::RequestCapabilityMismatch {
        capability,
        actual,
    });

    for parameter in gateway.parameter_descriptors() {
        log.check(
            AccessorResolver::find_in_bag(request.parameters(), &parameter.key).is_some(),
            || Violation::MissingRequestParameter {
                capability,
                key: parameter.key.clone(),
                getter: parameter.getter_name.clone(),
            },
        );
    }
}

/// An unsupported capability has no reachable factory, and the type does not
/// implement its trait when that is known
fn check_absent<G: Gateway>(
    gateway: &G,
    descriptor: &CapabilityDescriptor<G>,
    implemented: bool,
    log: &mut CheckLog,
) {
    let reachable = implemented
        || descriptor.is_exposed(gateway)
        || descriptor.create_request(gateway).is_some();
    log.check(!reachable, || Violation::UnexpectedCapability {
        capability: descriptor.capability,
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Run every scenario against a gateway with default settings.
///
/// Only the gateway's surface is checked; use
/// [`conformance_runner!`](crate::conformance_runner) to also check the
/// capability traits its type implements.
pub fn quick_check<G, F>(factory: F) -> ConformanceSummary
where
    G: Gateway,
    F: Fn() -> G,
{
    ConformanceRunner::new(factory).run_all()
}

/// Run one scenario by number
pub fn run_scenario_by_number<G, F>(factory: F, number: u8) -> Result<ScenarioResult>
where
    G: Gateway,
    F: Fn() -> G,
{
    let scenario =
        Scenario::from_number(number).context(format!("Invalid scenario number: {number}"))?;
    Ok(ConformanceRunner::new(factory).run_scenario(scenario))
}

/// Panic with the full report unless the gateway conforms.
///
/// Like [`quick_check`] this sees only the gateway's surface;
/// [`conformance_tests!`](crate::conformance_tests) also checks the type.
/// Intended for a gateway crate's own test suite:
///
/// ```
/// use gateway_conformance::executor::assert_conformant;
/// use gateway_conformance::gateways::DummyGateway;
///
/// assert_conformant(DummyGateway::new);
/// ```
pub fn assert_conformant<G, F>(factory: F)
where
    G: Gateway,
    F: Fn() -> G,
{
    let summary = quick_check(factory);
    assert!(summary.is_conformant(), "gateway is not conformant:\n{summary}");
}
