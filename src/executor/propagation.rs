//! Parameter propagation checks
//!
//! Sets each declared parameter to a fresh probe value and verifies that the
//! value reads back from the gateway, and that requests built by a capability
//! factory carry it.

use tracing::debug;

use super::assertions::CheckLog;
use super::probe::ProbeGenerator;
use crate::contract::{AccessorResolver, CapabilityDescriptor, Gateway, ParameterBinding};
use crate::models::{ParamValue, ParameterDescriptor, Violation};

/// Drives probe values through gateway setters and capability factories
pub struct ParameterPropagationChecker<'a> {
    probes: &'a mut ProbeGenerator,
}

impl<'a> ParameterPropagationChecker<'a> {
    pub fn new(probes: &'a mut ProbeGenerator) -> Self {
        Self { probes }
    }

    /// Every declared parameter has accessors, the setter chains, and the
    /// getter returns what was set.
    pub fn check_round_trip<G: Gateway>(&mut self, gateway: &mut G, log: &mut CheckLog) {
        let bindings = G::parameter_bindings();

        for parameter in gateway.parameter_descriptors() {
            let Some(binding) = lookup_binding(&bindings, &parameter, log) else {
                continue;
            };

            let probe = self.probes.next_probe();
            set_chained(binding, gateway, probe.clone(), &parameter, log);

            let actual = binding.get(gateway);
            log.check(actual.as_ref() == Some(&probe), || Violation::RoundTripMismatch {
                key: parameter.key.clone(),
                getter: parameter.getter_name.clone(),
                expected: probe.clone(),
                actual: actual.clone(),
            });
        }
    }

    /// Every declared parameter set on the gateway shows up unchanged on a
    /// request built right after the set.
    pub fn check_capability<G: Gateway>(
        &mut self,
        gateway: &mut G,
        descriptor: &CapabilityDescriptor<G>,
        log: &mut CheckLog,
    ) {
        let capability = descriptor.capability;
        let bindings = G::parameter_bindings();
        let mut kind_checked = false;

        for parameter in gateway.parameter_descriptors() {
            let Some(binding) = lookup_binding(&bindings, &parameter, log) else {
                continue;
            };

            let probe = self.probes.next_probe();
            set_chained(binding, gateway, probe.clone(), &parameter, log);

            let Some(request) = descriptor.create_request(gateway) else {
                log.fail(Violation::MissingCapability { capability });
                return;
            };

            if !kind_checked {
                let actual = request.capability();
                log.check(actual == capability, || Violation::RequestCapabilityMismatch {
                    capability,
                    actual,
                });
                kind_checked = true;
            }

            match AccessorResolver::find_in_bag(request.parameters(), &parameter.key) {
                Some(actual) => {
                    debug!("{}() carried {} = {}", capability, parameter.key, actual);
                    log.check(*actual == probe, || Violation::PropagationMismatch {
                        capability,
                        key: parameter.key.clone(),
                        getter: parameter.getter_name.clone(),
                        expected: probe.clone(),
                        actual: Some(actual.clone()),
                    });
                }
                None => log.fail(Violation::MissingRequestParameter {
                    capability,
                    key: parameter.key.clone(),
                    getter: parameter.getter_name.clone(),
                }),
            }
        }
    }
}

fn lookup_binding<'b, G>(
    bindings: &'b [ParameterBinding<G>],
    parameter: &ParameterDescriptor,
    log: &mut CheckLog,
) -> Option<&'b ParameterBinding<G>> {
    let binding = AccessorResolver::find_binding(bindings, &parameter.key);
    log.check(binding.is_some(), || Violation::MissingAccessor {
        key: parameter.key.clone(),
        getter: parameter.getter_name.clone(),
        setter: parameter.setter_name.clone(),
    });
    binding
}

fn set_chained<G>(
    binding: &ParameterBinding<G>,
    gateway: &mut G,
    value: ParamValue,
    parameter: &ParameterDescriptor,
    log: &mut CheckLog,
) {
    let before: *const G = &*gateway;
    let returned: *const G = binding.set(gateway, value);
    log.check(std::ptr::eq(before, returned), || Violation::SetterNotChained {
        setter: parameter.setter_name.clone(),
    });
}
