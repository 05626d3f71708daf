//! Scenario and result models for conformance runs
//!
//! Defines the 26 scenarios, their results, and run summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Violation;
use crate::contract::Capability;

/// Number of scenarios in a full run
pub const SCENARIO_COUNT: u8 = 26;

/// All 26 conformance scenarios
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    // Baseline checks (1-6)
    NameNotEmpty,
    ShortNameNotEmpty,
    DefaultParametersMap,
    DefaultParameterAccessors,
    TestMode,
    Currency,

    // Support flag vs. surface (7-16)
    Supports(Capability),

    // Parameter propagation into requests (17-26)
    Parameters(Capability),
}

impl Scenario {
    /// Get scenario number (1-26)
    pub fn number(&self) -> u8 {
        match self {
            Scenario::NameNotEmpty => 1,
            Scenario::ShortNameNotEmpty => 2,
            Scenario::DefaultParametersMap => 3,
            Scenario::DefaultParameterAccessors => 4,
            Scenario::TestMode => 5,
            Scenario::Currency => 6,
            Scenario::Supports(c) => 6 + c.number(),
            Scenario::Parameters(c) => 16 + c.number(),
        }
    }

    /// Get scenario name
    pub fn name(&self) -> String {
        match self {
            Scenario::NameNotEmpty => "Name Not Empty".to_string(),
            Scenario::ShortNameNotEmpty => "Short Name Not Empty".to_string(),
            Scenario::DefaultParametersMap => "Default Parameters Map".to_string(),
            Scenario::DefaultParameterAccessors => "Default Parameter Accessors".to_string(),
            Scenario::TestMode => "Test Mode".to_string(),
            Scenario::Currency => "Currency".to_string(),
            Scenario::Supports(c) => format!("Supports {}", c.label()),
            Scenario::Parameters(c) => format!("{} Parameters", c.label()),
        }
    }

    /// Get scenario category
    pub fn category(&self) -> &'static str {
        match self {
            Scenario::Supports(_) => "Capability",
            Scenario::Parameters(_) => "Propagation",
            _ => "Baseline",
        }
    }

    pub fn capability(&self) -> Option<Capability> {
        match self {
            Scenario::Supports(c) | Scenario::Parameters(c) => Some(*c),
            _ => None,
        }
    }

    /// Get all scenarios in run order
    pub fn all() -> Vec<Scenario> {
        let mut all = vec![
            Scenario::NameNotEmpty,
            Scenario::ShortNameNotEmpty,
            Scenario::DefaultParametersMap,
            Scenario::DefaultParameterAccessors,
            Scenario::TestMode,
            Scenario::Currency,
        ];
        all.extend(Capability::all().into_iter().map(Scenario::Supports));
        all.extend(Capability::all().into_iter().map(Scenario::Parameters));
        all
    }

    /// Parse from scenario number
    pub fn from_number(n: u8) -> Option<Scenario> {
        match n {
            1 => Some(Scenario::NameNotEmpty),
            2 => Some(Scenario::ShortNameNotEmpty),
            3 => Some(Scenario::DefaultParametersMap),
            4 => Some(Scenario::DefaultParameterAccessors),
            5 => Some(Scenario::TestMode),
            6 => Some(Scenario::Currency),
            7..=16 => Capability::from_number(n - 6).map(Scenario::Supports),
            17..=26 => Capability::from_number(n - 16).map(Scenario::Parameters),
            _ => None,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scenario {}: {}", self.number(), self.name())
    }
}

/// Scenario execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
    Error,
}

impl TestStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            TestStatus::Pass => "✓",
            TestStatus::Fail => "✗",
            TestStatus::Skip => "○",
            TestStatus::Error => "!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Pass)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Skip => write!(f, "SKIP"),
            TestStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single scenario
#[derive(Clone, Debug, Serialize)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub status: TestStatus,
    pub duration_ms: u64,
    /// Assertions performed
    pub checks: usize,
    pub message: Option<String>,
    pub violations: Vec<Violation>,
}

impl ScenarioResult {
    pub fn pass(scenario: Scenario, duration_ms: u64, checks: usize) -> Self {
        Self {
            scenario,
            status: TestStatus::Pass,
            duration_ms,
            checks,
            message: None,
            violations: Vec::new(),
        }
    }

    /// Pass when nothing was violated, Fail otherwise
    pub fn from_violations(
        scenario: Scenario,
        duration_ms: u64,
        checks: usize,
        violations: Vec<Violation>,
    ) -> Self {
        if violations.is_empty() {
            return Self::pass(scenario, duration_ms, checks);
        }

        let message = violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            scenario,
            status: TestStatus::Fail,
            duration_ms,
            checks,
            message: Some(message),
            violations,
        }
    }

    pub fn skip(scenario: Scenario, reason: impl Into<String>) -> Self {
        Self {
            scenario,
            status: TestStatus::Skip,
            duration_ms: 0,
            checks: 0,
            message: Some(reason.into()),
            violations: Vec::new(),
        }
    }

    pub fn error(scenario: Scenario, error: impl Into<String>) -> Self {
        Self {
            scenario,
            status: TestStatus::Error,
            duration_ms: 0,
            checks: 0,
            message: Some(error.into()),
            violations: Vec::new(),
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

impl fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.status.symbol(),
            self.scenario,
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Summary of one conformance run against one gateway
#[derive(Clone, Debug, Serialize)]
pub struct ConformanceSummary {
    pub gateway: String,
    pub short_name: String,
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl ConformanceSummary {
    pub fn new(
        gateway: impl Into<String>,
        short_name: impl Into<String>,
        started_at: DateTime<Utc>,
        results: Vec<ScenarioResult>,
    ) -> Self {
        let count = |status: TestStatus| results.iter().filter(|r| r.status == status).count();
        let total = results.len();
        let passed = count(TestStatus::Pass);
        let failed = count(TestStatus::Fail);
        let skipped = count(TestStatus::Skip);
        let errors = count(TestStatus::Error);
        let total_duration_ms = results.iter().map(|r| r.duration_ms).sum();

        Self {
            gateway: gateway.into(),
            short_name: short_name.into(),
            started_at,
            total,
            passed,
            failed,
            skipped,
            errors,
            total_duration_ms,
            results,
        }
    }

    /// Pass rate over the scenarios that actually ran
    pub fn pass_rate(&self) -> f64 {
        let ran = self.total - self.skipped;
        if ran == 0 {
            0.0
        } else {
            (self.passed as f64 / ran as f64) * 100.0
        }
    }

    /// No failures and no errors; skips are allowed
    pub fn is_conformant(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    pub fn result(&self, scenario: Scenario) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.scenario == scenario)
    }

    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.results.iter().flat_map(|r| r.violations.iter())
    }
}

impl fmt::Display for ConformanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Gateway ({})", self.gateway, self.short_name)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        for result in &self.results {
            writeln!(f, "  {result}")?;
        }
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            f,
            "Total: {} | Pass: {} | Fail: {} | Skip: {} | Error: {}",
            self.total, self.passed, self.failed, self.skipped, self.errors
        )?;
        writeln!(
            f,
            "Pass Rate: {:.1}% | Duration: {}ms",
            self.pass_rate(),
            self.total_duration_ms
        )
    }
}
