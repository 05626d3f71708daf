//! End-to-end runs of the conformance runner against fixture gateways

mod common;

use common::{FixtureGateway, Quirk};
use gateway_conformance::contract::{Capability, Gateway, Purchase, Request};
use gateway_conformance::executor::{quick_check, run_scenario_by_number, ConformanceRunner};
use gateway_conformance::gateways::{DummyGateway, ManualGateway, OffsiteGateway};
use gateway_conformance::{conformance_runner, conformance_tests, implemented_capabilities};
use gateway_conformance::gateways::ReferenceGateway;
use gateway_conformance::models::{
    ConformanceSummary, ParamValue, ParameterBag, RunConfig, Scenario, TestStatus, Violation,
};

fn run(quirk: Quirk) -> ConformanceSummary {
    quick_check(FixtureGateway::factory(quirk))
}

fn status(summary: &ConformanceSummary, scenario: Scenario) -> TestStatus {
    summary.result(scenario).expect("scenario was run").status
}

fn violations(summary: &ConformanceSummary, scenario: Scenario) -> Vec<Violation> {
    summary
        .result(scenario)
        .expect("scenario was run")
        .violations
        .clone()
}

#[test]
fn test_reference_gateways_conform() {
    for gateway in ReferenceGateway::all() {
        let summary = gateway.run(RunConfig::default(), &Scenario::all());
        assert_eq!(summary.total, 26);
        assert!(summary.is_conformant(), "{gateway} failed:\n{summary}");
    }
}

#[test]
fn test_conforming_fixture() {
    let summary = run(Quirk::None);

    assert!(summary.is_conformant(), "{summary}");
    assert_eq!(summary.passed, 17);
    assert_eq!(summary.skipped, 9);
    assert_eq!(
        status(&summary, Scenario::Parameters(Capability::Purchase)),
        TestStatus::Pass
    );

    let skipped = summary
        .result(Scenario::Parameters(Capability::Refund))
        .unwrap();
    assert_eq!(skipped.message.as_deref(), Some("supportsRefund() is false"));
}

#[test]
fn test_purchase_request_carries_current_amount() {
    let mut gateway = FixtureGateway::new(Quirk::None);
    gateway.set_amount("42");

    let request = gateway.purchase();
    assert_eq!(request.capability(), Capability::Purchase);
    assert_eq!(request.parameter("amount"), Some(&ParamValue::from("42")));
}

#[test]
fn test_last_set_wins() {
    let mut gateway = FixtureGateway::new(Quirk::None);
    gateway.set_amount("1").set_amount("2");

    assert_eq!(gateway.amount(), Some("2"));
    let request = gateway.purchase();
    assert_eq!(request.parameter("amount"), Some(&ParamValue::from("2")));
}

#[test]
fn test_unsupported_capability_has_no_factory() {
    let gateway = FixtureGateway::new(Quirk::None);
    assert!(!gateway.supports_refund());
    assert!(gateway.as_refund().is_none());
    assert!(!gateway.supported_capabilities().contains(&Capability::Refund));
}

#[test]
fn test_support_flag_without_factory() {
    let summary = run(Quirk::ClaimsRefund);

    assert!(!summary.is_conformant());
    assert_eq!(
        violations(&summary, Scenario::Supports(Capability::Refund)),
        vec![Violation::MissingCapability {
            capability: Capability::Refund
        }]
    );
    assert_eq!(
        status(&summary, Scenario::Parameters(Capability::Refund)),
        TestStatus::Fail
    );
}

#[test]
fn test_factory_without_support_flag() {
    let summary = run(Quirk::HidesRefund);

    let expected = vec![Violation::UnexpectedCapability {
        capability: Capability::Refund,
    }];
    assert_eq!(
        violations(&summary, Scenario::Supports(Capability::Refund)),
        expected
    );
    // Reported as a failure rather than a skip
    assert_eq!(
        violations(&summary, Scenario::Parameters(Capability::Refund)),
        expected
    );
}

#[test]
fn test_stale_request_accumulates_violations() {
    let summary = run(Quirk::StaleRequests);
    let found = violations(&summary, Scenario::Parameters(Capability::Purchase));

    assert_eq!(found.len(), 2);
    assert!(found
        .iter()
        .all(|v| matches!(v, Violation::PropagationMismatch { .. })));
    match &found[0] {
        Violation::PropagationMismatch {
            key,
            getter,
            actual,
            ..
        } => {
            assert_eq!(key, "amount");
            assert_eq!(getter, "getAmount");
            assert_eq!(actual, &Some(ParamValue::from("10.00")));
        }
        other => panic!("unexpected violation: {other:?}"),
    }

    // The supports scenario only checks presence
    assert_eq!(
        status(&summary, Scenario::Supports(Capability::Purchase)),
        TestStatus::Pass
    );
}

#[test]
fn test_missing_accessor() {
    let summary = run(Quirk::MissingAccessor);

    assert_eq!(
        status(&summary, Scenario::DefaultParametersMap),
        TestStatus::Pass
    );
    assert_eq!(
        violations(&summary, Scenario::DefaultParameterAccessors),
        vec![Violation::MissingAccessor {
            key: "secret".to_string(),
            getter: "getSecret".to_string(),
            setter: "setSecret".to_string(),
        }]
    );
}

#[test]
fn test_currency_not_normalized() {
    let summary = run(Quirk::LowercaseCurrency);

    assert_eq!(
        violations(&summary, Scenario::Currency),
        vec![Violation::CurrencyNotNormalized {
            input: "eur".to_string(),
            expected: "EUR".to_string(),
            actual: Some("eur".to_string()),
        }]
    );
    assert_eq!(summary.failed, 1);
}

#[test]
fn test_setter_not_chained() {
    let summary = run(Quirk::UnchainedSetter);

    assert!(violations(&summary, Scenario::DefaultParameterAccessors).contains(
        &Violation::SetterNotChained {
            setter: "setAmount".to_string()
        }
    ));
}

#[test]
fn test_mislabelled_request() {
    let summary = run(Quirk::MislabelledRequests);

    assert!(violations(&summary, Scenario::Supports(Capability::Purchase)).contains(
        &Violation::RequestCapabilityMismatch {
            capability: Capability::Purchase,
            actual: Capability::Capture,
        }
    ));
}

#[test]
fn test_empty_names() {
    let summary = run(Quirk::Nameless);

    assert_eq!(status(&summary, Scenario::NameNotEmpty), TestStatus::Fail);
    assert_eq!(status(&summary, Scenario::ShortNameNotEmpty), TestStatus::Fail);
    assert_eq!(summary.failed, 2);
}

#[test]
fn test_panic_is_contained() {
    let summary = run(Quirk::PanicsOnPurchase);

    assert_eq!(summary.total, 26);
    assert_eq!(summary.errors, 2);
    assert_eq!(
        status(&summary, Scenario::Supports(Capability::Purchase)),
        TestStatus::Error
    );
    let result = summary
        .result(Scenario::Parameters(Capability::Purchase))
        .unwrap();
    assert_eq!(result.status, TestStatus::Error);
    assert!(result
        .message
        .as_deref()
        .unwrap()
        .contains("purchase backend unavailable"));

    // Scenarios after the panic still ran
    assert_eq!(
        status(&summary, Scenario::Supports(Capability::Void)),
        TestStatus::Pass
    );
}

#[test]
fn test_configured_skips_and_overrides() {
    let config = RunConfig::new()
        .skip_scenario(6)
        .with_parameters(ParameterBag::new().with("amount", "99.00"));
    let summary = ConformanceRunner::new(FixtureGateway::factory(Quirk::LowercaseCurrency))
        .with_config(config)
        .run_all();

    let currency = summary.result(Scenario::Currency).unwrap();
    assert_eq!(currency.status, TestStatus::Skip);
    assert_eq!(currency.message.as_deref(), Some("Skipped by configuration"));
    assert!(summary.is_conformant());
}

#[test]
fn test_probes_are_fresh_per_run() {
    let mut runner = ConformanceRunner::new(FixtureGateway::factory(Quirk::None))
        .with_config(RunConfig::new().with_probe_prefix("it-"));
    runner.run_all();

    // Round trip and purchase propagation each probe both parameters
    assert_eq!(runner.probes_issued(), 4);
}

#[test]
fn test_implemented_but_unsupported_refund() {
    // Fixtures always implement Refund; only some quirks expose it
    assert_eq!(
        implemented_capabilities!(FixtureGateway),
        vec![Capability::Purchase, Capability::Refund]
    );

    let summary =
        conformance_runner!(FixtureGateway, FixtureGateway::factory(Quirk::None)).run_all();
    let expected = vec![Violation::UnexpectedCapability {
        capability: Capability::Refund,
    }];

    assert!(!summary.is_conformant());
    assert_eq!(
        violations(&summary, Scenario::Supports(Capability::Refund)),
        expected
    );
    assert_eq!(
        violations(&summary, Scenario::Parameters(Capability::Refund)),
        expected
    );
    assert_eq!(summary.failed, 2);
}

#[test]
fn test_implemented_and_supported_refund() {
    let summary =
        conformance_runner!(FixtureGateway, FixtureGateway::factory(Quirk::ClaimsRefund))
            .run_all();

    // Claimed and implemented, but still not exposed through as_refund()
    assert_eq!(
        violations(&summary, Scenario::Supports(Capability::Refund)),
        vec![Violation::MissingCapability {
            capability: Capability::Refund
        }]
    );
}

#[test]
fn test_run_profile_with_overrides() {
    let mut runner = ConformanceRunner::new(FixtureGateway::factory(Quirk::None)).with_config(
        RunConfig::new().with_parameters(ParameterBag::new().with("amount", "99.00")),
    );
    let summary = runner.run_profile(&gateway_conformance::config::ScenarioProfile::propagation());

    assert_eq!(summary.total, 10);
    assert_eq!(
        status(&summary, Scenario::Parameters(Capability::Purchase)),
        TestStatus::Pass
    );
    assert!(summary.is_conformant(), "{summary}");
}

mod dummy {
    use super::*;
    conformance_tests!(DummyGateway, DummyGateway::new);
}

mod manual {
    use super::*;
    conformance_tests!(ManualGateway, ManualGateway::new);
}

mod offsite {
    use super::*;
    conformance_tests!(OffsiteGateway, OffsiteGateway::new);
}

#[test]
fn test_run_scenario_by_number() {
    let result = run_scenario_by_number(FixtureGateway::factory(Quirk::LowercaseCurrency), 6)
        .unwrap();
    assert_eq!(result.scenario, Scenario::Currency);
    assert_eq!(result.status, TestStatus::Fail);

    assert!(run_scenario_by_number(FixtureGateway::factory(Quirk::None), 27).is_err());
}
