//! Gateway contract
//!
//! The trait every gateway under test implements, and the declarative
//! binding table it uses to expose its configuration accessors.

use std::fmt;
use tracing::debug;

use super::accessor::{AccessorPair, AccessorResolver};
use super::capability::{
    Authorize, Capability, CapabilityMatrix, Capture, CompleteAuthorize, CompletePurchase,
    CreateCard, DeleteCard, Purchase, Refund, UpdateCard, Void,
};
use crate::models::{ParamValue, ParameterBag, ParameterDescriptor};

/// Reads one parameter off a gateway
pub type Getter<G> = fn(&G) -> Option<ParamValue>;

/// Writes one parameter and hands the gateway back for chaining
pub type Setter<G> = fn(&mut G, ParamValue) -> &mut G;

/// A `{key, getter, setter}` entry of a gateway's binding table
pub struct ParameterBinding<G> {
    pub key: &'static str,
    getter: Getter<G>,
    setter: Setter<G>,
}

impl<G> ParameterBinding<G> {
    pub fn new(key: &'static str, getter: Getter<G>, setter: Setter<G>) -> Self {
        Self { key, getter, setter }
    }

    pub fn get(&self, gateway: &G) -> Option<ParamValue> {
        (self.getter)(gateway)
    }

    pub fn set<'a>(&self, gateway: &'a mut G, value: ParamValue) -> &'a mut G {
        (self.setter)(gateway, value)
    }

    pub fn accessors(&self) -> AccessorPair {
        AccessorResolver::resolve(self.key)
    }
}

impl<G> fmt::Debug for ParameterBinding<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterBinding")
            .field("key", &self.key)
            .finish()
    }
}

/// A payment gateway integration under test.
///
/// Implementors own their configuration in a [`ParameterBag`] and declare how
/// each configuration key is read and written through
/// [`Gateway::parameter_bindings`]. Capabilities are opt-in: implement the
/// capability trait (for example [`Purchase`]) and override the matching
/// `as_*` accessor to return `Some(self)`. The `supports_*` flags default to
/// whatever the `as_*` accessors expose.
pub trait Gateway {
    fn name(&self) -> &str;

    fn short_name(&self) -> &str;

    /// Ordered defaults for every configuration key the gateway accepts
    fn default_parameters(&self) -> ParameterBag;

    /// Getter/setter bindings for the configuration keys
    fn parameter_bindings() -> Vec<ParameterBinding<Self>>
    where
        Self: Sized;

    fn parameters(&self) -> &ParameterBag;

    fn parameters_mut(&mut self) -> &mut ParameterBag;

    /// Reset to the declared defaults, then apply `overrides` through the
    /// bindings. Override keys with no binding are ignored.
    fn initialize(&mut self, overrides: &ParameterBag) -> &mut Self
    where
        Self: Sized,
    {
        let bindings = Self::parameter_bindings();
        let defaults = self.default_parameters();
        self.parameters_mut().clear();

        for (key, value) in defaults.iter() {
            match AccessorResolver::find_binding(&bindings, key) {
                Some(binding) => {
                    binding.set(self, value.clone());
                }
                None => self.parameters_mut().set(key, value.clone()),
            }
        }

        for (key, value) in overrides.iter() {
            match AccessorResolver::find_binding(&bindings, key) {
                Some(binding) => {
                    binding.set(self, value.clone());
                }
                None => debug!("Ignoring parameter {} with no accessor on {}", key, self.name()),
            }
        }

        self
    }

    /// Descriptors derived from the default parameters
    fn parameter_descriptors(&self) -> Vec<ParameterDescriptor> {
        AccessorResolver::describe(&self.default_parameters())
    }

    fn test_mode(&self) -> bool {
        self.parameters().get_bool("testMode").unwrap_or(false)
    }

    fn set_test_mode(&mut self, value: bool) -> &mut Self {
        self.parameters_mut().set("testMode", value);
        self
    }

    fn currency(&self) -> Option<String> {
        self.parameters().get_str("currency").map(str::to_string)
    }

    /// Currency codes are stored uppercase
    fn set_currency(&mut self, value: &str) -> &mut Self {
        self.parameters_mut().set("currency", value.to_uppercase());
        self
    }

    /// Capabilities this gateway reports as supported, in catalog order
    fn supported_capabilities(&self) -> Vec<Capability>
    where
        Self: Sized,
    {
        CapabilityMatrix::catalog::<Self>()
            .into_iter()
            .filter(|d| d.is_supported(self))
            .map(|d| d.capability)
            .collect()
    }

    fn supports_authorize(&self) -> bool {
        self.as_authorize().is_some()
    }

    fn supports_complete_authorize(&self) -> bool {
        self.as_complete_authorize().is_some()
    }

    fn supports_capture(&self) -> bool {
        self.as_capture().is_some()
    }

    fn supports_purchase(&self) -> bool {
        self.as_purchase().is_some()
    }

    fn supports_complete_purchase(&self) -> bool {
        self.as_complete_purchase().is_some()
    }

    fn supports_refund(&self) -> bool {
        self.as_refund().is_some()
    }

    fn supports_void(&self) -> bool {
        self.as_void().is_some()
    }

    fn supports_create_card(&self) -> bool {
        self.as_create_card().is_some()
    }

    fn supports_delete_card(&self) -> bool {
        self.as_delete_card().is_some()
    }

    fn supports_update_card(&self) -> bool {
        self.as_update_card().is_some()
    }

    fn as_authorize(&self) -> Option<&dyn Authorize> {
        None
    }

    fn as_complete_authorize(&self) -> Option<&dyn CompleteAuthorize> {
        None
    }

    fn as_capture(&self) -> Option<&dyn Capture> {
        None
    }

    fn as_purchase(&self) -> Option<&dyn Purchase> {
        None
    }

    fn as_complete_purchase(&self) -> Option<&dyn CompletePurchase> {
        None
    }

    fn as_refund(&self) -> Option<&dyn Refund> {
        None
    }

    fn as_void(&self) -> Option<&dyn Void> {
        None
    }

    fn as_create_card(&self) -> Option<&dyn CreateCard> {
        None
    }

    fn as_delete_card(&self) -> Option<&dyn DeleteCard> {
        None
    }

    fn as_update_card(&self) -> Option<&dyn UpdateCard> {
        None
    }
}
