//! The gateway contract
//!
//! Traits a gateway implementation satisfies, the capability catalog, and
//! accessor resolution for configuration keys.

mod accessor;
mod capability;
pub mod detect;
mod gateway;
mod request;

pub use accessor::{AccessorPair, AccessorResolver};
pub use capability::{
    Authorize, Capability, CapabilityDescriptor, CapabilityMatrix, Capture, CompleteAuthorize,
    CompletePurchase, CreateCard, DeleteCard, Purchase, Refund, UpdateCard, Void,
};
pub use gateway::{Gateway, Getter, ParameterBinding, Setter};
pub use request::{GatewayRequest, Request};
