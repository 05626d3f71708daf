//! Baseline checks
//!
//! Identity and normalization checks that apply to every gateway regardless
//! of the capabilities it supports.

use std::collections::HashMap;
use tracing::debug;

use super::assertions::CheckLog;
use crate::contract::{AccessorResolver, Gateway};
use crate::models::Violation;

/// Currency code handed to `set_currency` by the currency check
const CURRENCY_INPUT: &str = "eur";

pub fn check_name<G: Gateway>(gateway: &G, log: &mut CheckLog) {
    log.check(!gateway.name().is_empty(), || Violation::EmptyField {
        field: "name".to_string(),
    });
}

pub fn check_short_name<G: Gateway>(gateway: &G, log: &mut CheckLog) {
    log.check(!gateway.short_name().is_empty(), || Violation::EmptyField {
        field: "short name".to_string(),
    });
}

/// Every default key is non-empty and maps to its own accessor stem
pub fn check_default_parameters<G: Gateway>(gateway: &G, log: &mut CheckLog) {
    let defaults = gateway.default_parameters();
    let mut stems: HashMap<String, String> = HashMap::new();

    for key in defaults.keys() {
        if !log.check(!key.trim().is_empty(), || Violation::EmptyField {
            field: "default parameter key".to_string(),
        }) {
            continue;
        }

        let stem = AccessorResolver::stem(key);
        debug!("Default parameter {} resolves to {}", key, stem);
        match stems.get(&stem) {
            Some(other) => log.fail(Violation::DuplicateParameterKey {
                key: key.to_string(),
                other: other.clone(),
                stem,
            }),
            None => {
                log.pass();
                stems.insert(stem, key.to_string());
            }
        }
    }
}

/// `set_test_mode` chains and reads back for both values
pub fn check_test_mode<G: Gateway>(gateway: &mut G, log: &mut CheckLog) {
    for expected in [false, true] {
        let before: *const G = &*gateway;
        let returned: *const G = gateway.set_test_mode(expected);
        log.check(std::ptr::eq(before, returned), || Violation::SetterNotChained {
            setter: "setTestMode".to_string(),
        });

        let actual = gateway.test_mode();
        log.check(actual == expected, || Violation::TestModeMismatch { expected, actual });
    }
}

/// `set_currency` chains and stores the code uppercase
pub fn check_currency<G: Gateway>(gateway: &mut G, log: &mut CheckLog) {
    let before: *const G = &*gateway;
    let returned: *const G = gateway.set_currency(CURRENCY_INPUT);
    log.check(std::ptr::eq(before, returned), || Violation::SetterNotChained {
        setter: "setCurrency".to_string(),
    });

    let expected = CURRENCY_INPUT.to_uppercase();
    let actual = gateway.currency();
    log.check(actual.as_deref() == Some(expected.as_str()), || {
        Violation::CurrencyNotNormalized {
            input: CURRENCY_INPUT.to_string(),
            expected: expected.clone(),
            actual: actual.clone(),
        }
    });
}
