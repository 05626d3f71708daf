//! Fixture gateways shared by the integration tests
//!
//! One gateway type with a `Quirk` switch, so each contract breach can be
//! provoked in isolation.

#![allow(dead_code)]

use gateway_conformance::contract::{
    Capability, Gateway, GatewayRequest, ParameterBinding, Purchase, Refund, Request,
};
use gateway_conformance::models::{ParamValue, ParameterBag};

/// The single contract breach a fixture commits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quirk {
    None,
    /// `supports_refund` is true but no refund factory is exposed
    ClaimsRefund,
    /// A refund factory is exposed but `supports_refund` is false
    HidesRefund,
    /// Requests are built from the defaults, not the current configuration
    StaleRequests,
    /// Declares a default with no accessor binding
    MissingAccessor,
    /// `set_currency` stores the code as given
    LowercaseCurrency,
    /// The amount setter hands back a different gateway instance
    UnchainedSetter,
    /// The purchase factory panics
    PanicsOnPurchase,
    /// Name and short name are empty
    Nameless,
    /// Purchase requests report themselves as captures
    MislabelledRequests,
}

#[derive(Debug)]
pub struct FixtureGateway {
    quirk: Quirk,
    parameters: ParameterBag,
}

impl FixtureGateway {
    pub fn new(quirk: Quirk) -> Self {
        let mut gateway = Self::bare(quirk);
        gateway.initialize(&ParameterBag::new());
        gateway
    }

    /// Factory closure for the runner
    pub fn factory(quirk: Quirk) -> impl Fn() -> FixtureGateway {
        move || FixtureGateway::new(quirk)
    }

    fn bare(quirk: Quirk) -> Self {
        Self {
            quirk,
            parameters: ParameterBag::new(),
        }
    }

    pub fn amount(&self) -> Option<&str> {
        self.parameters.get_str("amount")
    }

    pub fn set_amount(&mut self, value: impl Into<ParamValue>) -> &mut Self {
        self.parameters.set("amount", value);
        if self.quirk == Quirk::UnchainedSetter {
            return Box::leak(Box::new(Self::bare(Quirk::UnchainedSetter)));
        }
        self
    }
}

impl Gateway for FixtureGateway {
    fn name(&self) -> &str {
        match self.quirk {
            Quirk::Nameless => "",
            _ => "Fixture Card Gateway",
        }
    }

    fn short_name(&self) -> &str {
        match self.quirk {
            Quirk::Nameless => "",
            _ => "Fixture",
        }
    }

    fn default_parameters(&self) -> ParameterBag {
        let defaults = ParameterBag::new()
            .with("amount", "10.00")
            .with("testMode", false);
        match self.quirk {
            Quirk::MissingAccessor => defaults.with("secret", ""),
            _ => defaults,
        }
    }

    fn parameter_bindings() -> Vec<ParameterBinding<Self>> {
        vec![
            ParameterBinding::<Self>::new(
                "amount",
                |g| g.parameters.get("amount").cloned(),
                |g, v| g.set_amount(v),
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

    fn set_currency(&mut self, value: &str) -> &mut Self {
        let value = match self.quirk {
            Quirk::LowercaseCurrency => value.to_string(),
            _ => value.to_uppercase(),
        };
        self.parameters.set("currency", value);
        self
    }

    fn supports_refund(&self) -> bool {
        match self.quirk {
            Quirk::ClaimsRefund => true,
            Quirk::HidesRefund => false,
            _ => self.as_refund().is_some(),
        }
    }

    fn as_purchase(&self) -> Option<&dyn Purchase> {
        Some(self)
    }

    fn as_refund(&self) -> Option<&dyn Refund> {
        match self.quirk {
            Quirk::HidesRefund => Some(self),
            _ => None,
        }
    }
}

impl Purchase for FixtureGateway {
    fn purchase(&self) -> Box<dyn Request> {
        match self.quirk {
            Quirk::PanicsOnPurchase => panic!("purchase backend unavailable"),
            Quirk::StaleRequests => {
                GatewayRequest::boxed(Capability::Purchase, self.default_parameters())
            }
            Quirk::MislabelledRequests => {
                GatewayRequest::boxed(Capability::Capture, self.parameters.clone())
            }
            _ => GatewayRequest::boxed(Capability::Purchase, self.parameters.clone()),
        }
    }
}

impl Refund for FixtureGateway {
    fn refund(&self) -> Box<dyn Request> {
        GatewayRequest::boxed(Capability::Refund, self.parameters.clone())
    }
}
