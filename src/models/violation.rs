//! Conformance violations
//!
//! Every failed check is recorded as one of these values instead of aborting
//! the scenario it belongs to.

use serde::Serialize;
use thiserror::Error;

use super::ParamValue;
use crate::contract::Capability;

/// A single contract violation found by a check
#[derive(Error, Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    #[error("{field} must not be empty")]
    EmptyField { field: String },

    #[error("default parameters '{key}' and '{other}' both resolve to accessor stem {stem}")]
    DuplicateParameterKey {
        key: String,
        other: String,
        stem: String,
    },

    #[error("gateway must implement {getter}() and {setter}() for parameter '{key}'")]
    MissingAccessor {
        key: String,
        getter: String,
        setter: String,
    },

    #[error("{setter}() must return the gateway instance")]
    SetterNotChained { setter: String },

    #[error("{getter}() returned {} after setting {expected}", display_value(.actual))]
    RoundTripMismatch {
        key: String,
        getter: String,
        expected: ParamValue,
        actual: Option<ParamValue>,
    },

    #[error("getTestMode() returned {actual} after setTestMode({expected})")]
    TestModeMismatch { expected: bool, actual: bool },

    #[error("setCurrency({input:?}) should store {expected:?}, getCurrency() returned {actual:?}")]
    CurrencyNotNormalized {
        input: String,
        expected: String,
        actual: Option<String>,
    },

    #[error("{}() is true but the gateway exposes no {capability}() factory", .capability.support_flag())]
    MissingCapability { capability: Capability },

    #[error("{}() is false but {capability}() is part of the gateway surface", .capability.support_flag())]
    UnexpectedCapability { capability: Capability },

    #[error("{capability}() returned a request for {actual}")]
    RequestCapabilityMismatch {
        capability: Capability,
        actual: Capability,
    },

    #[error("{capability}() request does not expose {getter}() for parameter '{key}'")]
    MissingRequestParameter {
        capability: Capability,
        key: String,
        getter: String,
    },

    #[error("{capability}() request {getter}() returned {} but the gateway was set to {expected}", display_value(.actual))]
    PropagationMismatch {
        capability: Capability,
        key: String,
        getter: String,
        expected: ParamValue,
        actual: Option<ParamValue>,
    },
}

impl Violation {
    /// Capability the violation is scoped to, if any
    pub fn capability(&self) -> Option<Capability> {
        match self {
            Violation::MissingCapability { capability }
            | Violation::UnexpectedCapability { capability }
            | Violation::RequestCapabilityMismatch { capability, .. }
            | Violation::MissingRequestParameter { capability, .. }
            | Violation::PropagationMismatch { capability, .. } => Some(*capability),
            _ => None,
        }
    }
}

fn display_value(value: &Option<ParamValue>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "nothing".to_string(),
    }
}
