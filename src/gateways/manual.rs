//! Manual gateway
//!
//! Records payments taken outside any processor. It can authorize, capture
//! and void, and nothing else.
//!
//! ```
//! use gateway_conformance::contract::{Authorize, Capability, Request};
//! use gateway_conformance::gateways::ManualGateway;
//!
//! let gateway = ManualGateway::new();
//! assert_eq!(gateway.authorize().capability(), Capability::Authorize);
//! ```
//!
//! Operations it lacks are absent from its type:
//!
//! ```compile_fail,E0599
//! use gateway_conformance::contract::{Refund, Request};
//! use gateway_conformance::gateways::ManualGateway;
//!
//! let gateway = ManualGateway::new();
//! gateway.refund().capability();
//! ```

use crate::contract::{
    Authorize, Capability, Capture, Gateway, GatewayRequest, ParameterBinding, Request, Void,
};
use crate::models::ParameterBag;

#[derive(Clone, Debug)]
pub struct ManualGateway {
    parameters: ParameterBag,
}

impl ManualGateway {
    pub fn new() -> Self {
        let mut gateway = Self {
            parameters: ParameterBag::new(),
        };
        gateway.initialize(&ParameterBag::new());
        gateway
    }
}

impl Default for ManualGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl Gateway for ManualGateway {
    fn name(&self) -> &str {
        "Manual"
    }

    fn short_name(&self) -> &str {
        "Manual"
    }

    fn default_parameters(&self) -> ParameterBag {
        ParameterBag::new().with("testMode", false)
    }

    fn parameter_bindings() -> Vec<ParameterBinding<Self>> {
        vec![ParameterBinding::<Self>::new(
            "testMode",
            |g| g.parameters.get("testMode").cloned(),
            |g, v| {
                g.parameters.set("testMode", v);
                g
            },
        )]
    }

    fn parameters(&self) -> &ParameterBag {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut ParameterBag {
        &mut self.parameters
    }

    fn as_authorize(&self) -> Option<&dyn Authorize> {
        Some(self)
    }

    fn as_capture(&self) -> Option<&dyn Capture> {
        Some(self)
    }

    fn as_void(&self) -> Option<&dyn Void> {
        Some(self)
    }
}

impl Authorize for ManualGateway {
    fn authorize(&self) -> Box<dyn Request> {
        GatewayRequest::boxed(Capability::Authorize, self.parameters.clone())
    }
}

impl Capture for ManualGateway {
    fn capture(&self) -> Box<dyn Request> {
        GatewayRequest::boxed(Capability::Capture, self.parameters.clone())
    }
}

impl Void for ManualGateway {
    fn void(&self) -> Box<dyn Request> {
        GatewayRequest::boxed(Capability::Void, self.parameters.clone())
    }
}
