//! Assertion bookkeeping
//!
//! Collects the checks a scenario performs and the violations they find, so
//! one failing check never stops the next one from running.

use tracing::warn;

use crate::models::{Scenario, ScenarioResult, Violation};

/// Running tally of checks and violations for one scenario
#[derive(Debug, Default)]
pub struct CheckLog {
    checks: usize,
    violations: Vec<Violation>,
}

impl CheckLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one assertion; record the violation if it does not hold
    pub fn check(&mut self, holds: bool, violation: impl FnOnce() -> Violation) -> bool {
        self.checks += 1;
        if !holds {
            self.record(violation());
        }
        holds
    }

    /// Count one assertion that held
    pub fn pass(&mut self) {
        self.checks += 1;
    }

    /// Count one assertion that already failed
    pub fn fail(&mut self, violation: Violation) {
        self.checks += 1;
        self.record(violation);
    }

    fn record(&mut self, violation: Violation) {
        warn!("{}", violation);
        self.violations.push(violation);
    }

    pub fn checks(&self) -> usize {
        self.checks
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_result(self, scenario: Scenario, duration_ms: u64) -> ScenarioResult {
        ScenarioResult::from_violations(scenario, duration_ms, self.checks, self.violations)
    }
}
