//! Capability catalog
//!
//! The ten optional gateway operations, the trait each one is expressed as,
//! and the fixed matrix the runner walks for every gateway under test.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Gateway, Request};

/// All 10 gateway capabilities, in catalog order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    Authorize,
    CompleteAuthorize,
    Capture,
    Purchase,
    CompletePurchase,
    Refund,
    Void,
    CreateCard,
    DeleteCard,
    UpdateCard,
}

impl Capability {
    /// Get capability number (1-10)
    pub fn number(&self) -> u8 {
        match self {
            Capability::Authorize => 1,
            Capability::CompleteAuthorize => 2,
            Capability::Capture => 3,
            Capability::Purchase => 4,
            Capability::CompletePurchase => 5,
            Capability::Refund => 6,
            Capability::Void => 7,
            Capability::CreateCard => 8,
            Capability::DeleteCard => 9,
            Capability::UpdateCard => 10,
        }
    }

    /// Contract name of the factory operation
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Authorize => "authorize",
            Capability::CompleteAuthorize => "completeAuthorize",
            Capability::Capture => "capture",
            Capability::Purchase => "purchase",
            Capability::CompletePurchase => "completePurchase",
            Capability::Refund => "refund",
            Capability::Void => "void",
            Capability::CreateCard => "createCard",
            Capability::DeleteCard => "deleteCard",
            Capability::UpdateCard => "updateCard",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Capability::Authorize => "Authorize",
            Capability::CompleteAuthorize => "Complete Authorize",
            Capability::Capture => "Capture",
            Capability::Purchase => "Purchase",
            Capability::CompletePurchase => "Complete Purchase",
            Capability::Refund => "Refund",
            Capability::Void => "Void",
            Capability::CreateCard => "Create Card",
            Capability::DeleteCard => "Delete Card",
            Capability::UpdateCard => "Update Card",
        }
    }

    /// Name of the support-flag query
    pub fn support_flag(&self) -> String {
        format!("supports{}", super::AccessorResolver::stem(self.name()))
    }

    pub fn all() -> Vec<Capability> {
        vec![
            Capability::Authorize,
            Capability::CompleteAuthorize,
            Capability::Capture,
            Capability::Purchase,
            Capability::CompletePurchase,
            Capability::Refund,
            Capability::Void,
            Capability::CreateCard,
            Capability::DeleteCard,
            Capability::UpdateCard,
        ]
    }

    pub fn from_number(n: u8) -> Option<Capability> {
        Self::all().into_iter().find(|c| c.number() == n)
    }

    /// Parse from any casing of the contract name (`create_card`, `CreateCard`, ...)
    pub fn from_name(s: &str) -> Option<Capability> {
        let stem = super::AccessorResolver::stem(s);
        Self::all()
            .into_iter()
            .find(|c| super::AccessorResolver::stem(c.name()) == stem)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub trait Authorize {
    fn authorize(&self) -> Box<dyn Request>;
}

pub trait CompleteAuthorize {
    fn complete_authorize(&self) -> Box<dyn Request>;
}

pub trait Capture {
    fn capture(&self) -> Box<dyn Request>;
}

pub trait Purchase {
    fn purchase(&self) -> Box<dyn Request>;
}

pub trait CompletePurchase {
    fn complete_purchase(&self) -> Box<dyn Request>;
}

pub trait Refund {
    fn refund(&self) -> Box<dyn Request>;
}

pub trait Void {
    fn void(&self) -> Box<dyn Request>;
}

pub trait CreateCard {
    fn create_card(&self) -> Box<dyn Request>;
}

pub trait DeleteCard {
    fn delete_card(&self) -> Box<dyn Request>;
}

pub trait UpdateCard {
    fn update_card(&self) -> Box<dyn Request>;
}

/// One catalog entry: a capability bound to its support flag and factory
pub struct CapabilityDescriptor<G> {
    pub capability: Capability,
    supports: fn(&G) -> bool,
    exposed: fn(&G) -> bool,
    factory: fn(&G) -> Option<Box<dyn Request>>,
}

impl<G> CapabilityDescriptor<G> {
    /// What the gateway claims
    pub fn is_supported(&self, gateway: &G) -> bool {
        (self.supports)(gateway)
    }

    /// Whether the factory is part of the gateway's surface
    pub fn is_exposed(&self, gateway: &G) -> bool {
        (self.exposed)(gateway)
    }

    /// Invoke the factory, if the gateway has one
    pub fn create_request(&self, gateway: &G) -> Option<Box<dyn Request>> {
        (self.factory)(gateway)
    }
}

impl<G> fmt::Debug for CapabilityDescriptor<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityDescriptor")
            .field("capability", &self.capability)
            .finish()
    }
}

/// The fixed capability catalog
pub struct CapabilityMatrix;

impl CapabilityMatrix {
    /// All ten descriptors in catalog order
    pub fn catalog<G: Gateway>() -> Vec<CapabilityDescriptor<G>> {
        Capability::all()
            .into_iter()
            .map(Self::descriptor::<G>)
            .collect()
    }

    pub fn descriptor<G: Gateway>(capability: Capability) -> CapabilityDescriptor<G> {
        match capability {
            Capability::Authorize => CapabilityDescriptor {
                capability,
                supports: |g| g.supports_authorize(),
                exposed: |g| g.as_authorize().is_some(),
                factory: |g| g.as_authorize().map(|c| c.authorize()),
            },
            Capability::CompleteAuthorize => CapabilityDescriptor {
                capability,
                supports: |g| g.supports_complete_authorize(),
                exposed: |g| g.as_complete_authorize().is_some(),
                factory: |g| g.as_complete_authorize().map(|c| c.complete_authorize()),
            },
            Capability::Capture => CapabilityDescriptor {
                capability,
                supports: |g| g.supports_capture(),
                exposed: |g| g.as_capture().is_some(),
                factory: |g| g.as_capture().map(|c| c.capture()),
            },
            Capability::Purchase => CapabilityDescriptor {
                capability,
                supports: |g| g.supports_purchase(),
                exposed: |g| g.as_purchase().is_some(),
                factory: |g| g.as_purchase().map(|c| c.purchase()),
            },
            Capability::CompletePurchase => CapabilityDescriptor {
                capability,
                supports: |g| g.supports_complete_purchase(),
                exposed: |g| g.as_complete_purchase().is_some(),
                factory: |g| g.as_complete_purchase().map(|c| c.complete_purchase()),
            },
            Capability::Refund => CapabilityDescriptor {
                capability,
                supports: |g| g.supports_refund(),
                exposed: |g| g.as_refund().is_some(),
                factory: |g| g.as_refund().map(|c| c.refund()),
            },
            Capability::Void => CapabilityDescriptor {
                capability,
                supports: |g| g.supports_void(),
                exposed: |g| g.as_void().is_some(),
                factory: |g| g.as_void().map(|c| c.void()),
            },
            Capability::CreateCard => CapabilityDescriptor {
                capability,
                supports: |g| g.supports_create_card(),
                exposed: |g| g.as_create_card().is_some(),
                factory: |g| g.as_create_card().map(|c| c.create_card()),
            },
            Capability::DeleteCard => CapabilityDescriptor {
                capability,
                supports: |g| g.supports_delete_card(),
                exposed: |g| g.as_delete_card().is_some(),
                factory: |g| g.as_delete_card().map(|c| c.delete_card()),
            },
            Capability::UpdateCard => CapabilityDescriptor {
                capability,
                supports: |g| g.supports_update_card(),
                exposed: |g| g.as_update_card().is_some(),
                factory: |g| g.as_update_card().map(|c| c.update_card()),
            },
        }
    }
}
