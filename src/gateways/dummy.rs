//! Dummy gateway
//!
//! A card gateway that supports every operation except the two-step
//! completions. Requests carry a snapshot of the gateway configuration.

use crate::contract::{
    Authorize, Capability, Capture, CreateCard, DeleteCard, Gateway, GatewayRequest,
    ParameterBinding, Purchase, Refund, Request, UpdateCard, Void,
};
use crate::models::{ParamValue, ParameterBag};

#[derive(Clone, Debug)]
pub struct DummyGateway {
    parameters: ParameterBag,
}

impl DummyGateway {
    pub fn new() -> Self {
        let mut gateway = Self {
            parameters: ParameterBag::new(),
        };
        gateway.initialize(&ParameterBag::new());
        gateway
    }

    pub fn api_key(&self) -> Option<&str> {
        self.parameters.get_str("apiKey")
    }

    pub fn set_api_key(&mut self, value: impl Into<ParamValue>) -> &mut Self {
        self.parameters.set("apiKey", value);
        self
    }

    pub fn merchant_id(&self) -> Option<&str> {
        self.parameters.get_str("merchantId")
    }

    pub fn set_merchant_id(&mut self, value: impl Into<ParamValue>) -> &mut Self {
        self.parameters.set("merchantId", value);
        self
    }

    fn request(&self, capability: Capability) -> Box<dyn Request> {
        GatewayRequest::boxed(capability, self.parameters.clone())
    }
}

impl Default for DummyGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl Gateway for DummyGateway {
    fn name(&self) -> &str {
        "Dummy"
    }

    fn short_name(&self) -> &str {
        "Dummy"
    }

    fn default_parameters(&self) -> ParameterBag {
        ParameterBag::new()
            .with("apiKey", "")
            .with("merchantId", "")
            .with("testMode", false)
    }

    fn parameter_bindings() -> Vec<ParameterBinding<Self>> {
        vec![
            ParameterBinding::<Self>::new(
                "apiKey",
                |g| g.parameters.get("apiKey").cloned(),
                |g, v| g.set_api_key(v),
            ),
            ParameterBinding::<Self>::new(
                "merchantId",
                |g| g.parameters.get("merchantId").cloned(),
                |g, v| g.set_merchant_id(v),
            ),
            ParameterBinding::<Self>::new(
                "testMode",
                |g| g.parameters.get("testMode").cloned(),
                |g, v| {
                    g.parameters.set("testMode", v);
                    g
                },
            ),
        ]
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

    fn as_purchase(&self) -> Option<&dyn Purchase> {
        Some(self)
    }

    fn as_refund(&self) -> Option<&dyn Refund> {
        Some(self)
    }

    fn as_void(&self) -> Option<&dyn Void> {
        Some(self)
    }

    fn as_create_card(&self) -> Option<&dyn CreateCard> {
        Some(self)
    }

    fn as_delete_card(&self) -> Option<&dyn DeleteCard> {
        Some(self)
    }

    fn as_update_card(&self) -> Option<&dyn UpdateCard> {
        Some(self)
    }
}

impl Authorize for DummyGateway {
    fn authorize(&self) -> Box<dyn Request> {
        self.request(Capability::Authorize)
    }
}

impl Capture for DummyGateway {
    fn capture(&self) -> Box<dyn Request> {
        self.request(Capability::Capture)
    }
}

impl Purchase for DummyGateway {
    fn purchase(&self) -> Box<dyn Request> {
        self.request(Capability::Purchase)
    }
}

impl Refund for DummyGateway {
    fn refund(&self) -> Box<dyn Request> {
        self.request(Capability::Refund)
    }
}

impl Void for DummyGateway {
    fn void(&self) -> Box<dyn Request> {
        self.request(Capability::Void)
    }
}

impl CreateCard for DummyGateway {
    fn create_card(&self) -> Box<dyn Request> {
        self.request(Capability::CreateCard)
    }
}

impl DeleteCard for DummyGateway {
    fn delete_card(&self) -> Box<dyn Request> {
        self.request(Capability::DeleteCard)
    }
}

impl UpdateCard for DummyGateway {
    fn update_card(&self) -> Box<dyn Request> {
        self.request(Capability::UpdateCard)
    }
}
