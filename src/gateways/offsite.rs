//! Offsite redirect gateway
//!
//! Sends the customer to a hosted payment page and completes the payment
//! when they return. Its configuration keys use mixed separators, and its
//! requests re-key them to camel case.

use crate::contract::{
    Authorize, Capability, CompleteAuthorize, CompletePurchase, Gateway, ParameterBinding,
    Purchase, Request,
};
use crate::models::{ParamValue, ParameterBag};

/// Request for the hosted payment page, or for completing on return
#[derive(Clone, Debug)]
pub struct RedirectRequest {
    capability: Capability,
    parameters: ParameterBag,
}

impl RedirectRequest {
    fn new(capability: Capability, gateway: &OffsiteGateway) -> Self {
        let mut parameters = ParameterBag::new();
        for (key, value) in gateway.parameters.iter() {
            parameters.set(camel_case(key), value.clone());
        }
        Self {
            capability,
            parameters,
        }
    }

    /// Whether the customer is sent away (true) or has come back (false)
    pub fn is_redirect(&self) -> bool {
        matches!(self.capability, Capability::Authorize | Capability::Purchase)
    }
}

impl Request for RedirectRequest {
    fn capability(&self) -> Capability {
        self.capability
    }

    fn parameters(&self) -> &ParameterBag {
        &self.parameters
    }
}

fn camel_case(key: &str) -> String {
    let stem = crate::contract::AccessorResolver::stem(key);
    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Clone, Debug)]
pub struct OffsiteGateway {
    parameters: ParameterBag,
}

impl OffsiteGateway {
    pub fn new() -> Self {
        let mut gateway = Self {
            parameters: ParameterBag::new(),
        };
        gateway.initialize(&ParameterBag::new());
        gateway
    }

    pub fn merchant_id(&self) -> Option<&str> {
        self.parameters.get_str("merchant_id")
    }

    pub fn set_merchant_id(&mut self, value: impl Into<ParamValue>) -> &mut Self {
        self.parameters.set("merchant_id", value);
        self
    }

    pub fn secret_word(&self) -> Option<&str> {
        self.parameters.get_str("secret-word")
    }

    pub fn set_secret_word(&mut self, value: impl Into<ParamValue>) -> &mut Self {
        self.parameters.set("secret-word", value);
        self
    }
}

impl Default for OffsiteGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl Gateway for OffsiteGateway {
    fn name(&self) -> &str {
        "Offsite Redirect"
    }

    fn short_name(&self) -> &str {
        "Offsite"
    }

    fn default_parameters(&self) -> ParameterBag {
        ParameterBag::new()
            .with("merchant_id", "")
            .with("secret-word", "")
            .with("testMode", false)
    }

    fn parameter_bindings() -> Vec<ParameterBinding<Self>> {
        vec![
            ParameterBinding::<Self>::new(
                "merchant_id",
                |g| g.merchant_id().map(ParamValue::from),
                |g, v| g.set_merchant_id(v),
            ),
            ParameterBinding::<Self>::new(
                "secret-word",
                |g| g.secret_word().map(ParamValue::from),
                |g, v| g.set_secret_word(v),
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

    fn as_complete_authorize(&self) -> Option<&dyn CompleteAuthorize> {
        Some(self)
    }

    fn as_purchase(&self) -> Option<&dyn Purchase> {
        Some(self)
    }

    fn as_complete_purchase(&self) -> Option<&dyn CompletePurchase> {
        Some(self)
    }
}

impl Authorize for OffsiteGateway {
    fn authorize(&self) -> Box<dyn Request> {
        Box::new(RedirectRequest::new(Capability::Authorize, self))
    }
}

impl CompleteAuthorize for OffsiteGateway {
    fn complete_authorize(&self) -> Box<dyn Request> {
        Box::new(RedirectRequest::new(Capability::CompleteAuthorize, self))
    }
}

impl Purchase for OffsiteGateway {
    fn purchase(&self) -> Box<dyn Request> {
        Box::new(RedirectRequest::new(Capability::Purchase, self))
    }
}

impl CompletePurchase for OffsiteGateway {
    fn complete_purchase(&self) -> Box<dyn Request> {
        Box::new(RedirectRequest::new(Capability::CompletePurchase, self))
    }
}
