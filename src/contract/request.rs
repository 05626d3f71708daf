//! Request contract
//!
//! What a capability factory hands back: an object carrying the gateway's
//! configuration as it stood when the request was built.

use serde::Serialize;
use std::fmt;

use super::Capability;
use crate::models::{ParamValue, ParameterBag};

/// Object produced by a capability factory
pub trait Request: fmt::Debug {
    fn capability(&self) -> Capability;

    /// Parameters copied from the gateway at construction time
    fn parameters(&self) -> &ParameterBag;

    fn parameter(&self, key: &str) -> Option<&ParamValue> {
        self.parameters().get(key)
    }
}

/// Stock request type for gateways that have no request-specific state
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GatewayRequest {
    capability: Capability,
    parameters: ParameterBag,
}

impl GatewayRequest {
    pub fn new(capability: Capability, parameters: ParameterBag) -> Self {
        Self {
            capability,
            parameters,
        }
    }

    pub fn boxed(capability: Capability, parameters: ParameterBag) -> Box<dyn Request> {
        Box::new(Self::new(capability, parameters))
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.set(key, value);
        self
    }
}

impl Request for GatewayRequest {
    fn capability(&self) -> Capability {
        self.capability
    }

    fn parameters(&self) -> &ParameterBag {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_request_parameters() {
        let request = GatewayRequest::new(
            Capability::Purchase,
            ParameterBag::new().with("amount", "10.00"),
        )
        .with_parameter("description", "order #1");

        assert_eq!(request.capability(), Capability::Purchase);
        assert_eq!(request.parameter("amount"), Some(&ParamValue::from("10.00")));
        assert_eq!(request.parameters().len(), 2);
        assert!(request.parameter("missing").is_none());
    }
}
