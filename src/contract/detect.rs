//! Capability detection on concrete types
//!
//! `as_<capability>()` only reports what a gateway chooses to expose. A type
//! can still implement a capability trait and leave it unexposed, so these
//! helpers ask the type itself which of the ten traits it implements.
//!
//! Detection relies on method resolution preferring a by-value receiver
//! match over an autoref one: `(&ImplDetector::<T>::new()).implements_x()`
//! resolves to the `true` impl when `T: X` and falls back to the `false`
//! impl on `&ImplDetector<T>` otherwise. It only works on a concrete type,
//! which is why it is exposed through [`implemented_capabilities!`].
//!
//! [`implemented_capabilities!`]: crate::implemented_capabilities

use std::marker::PhantomData;

use super::capability::{
    Authorize, Capture, CompleteAuthorize, CompletePurchase, CreateCard, DeleteCard, Purchase,
    Refund, UpdateCard, Void,
};

#[doc(hidden)]
pub struct ImplDetector<T: ?Sized>(PhantomData<T>);

impl<T: ?Sized> ImplDetector<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: ?Sized> Default for ImplDetector<T> {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! detectors {
    ($($capability:ident => $implements:ident, $lacks:ident, $method:ident;)*) => {$(
        #[doc(hidden)]
        pub trait $implements {
            fn $method(&self) -> bool {
                true
            }
        }

        impl<T: ?Sized + $capability> $implements for ImplDetector<T> {}

        #[doc(hidden)]
        pub trait $lacks {
            fn $method(&self) -> bool {
                false
            }
        }

        impl<T: ?Sized> $lacks for &ImplDetector<T> {}
    )*};
}

detectors! {
    Authorize => ImplementsAuthorize, LacksAuthorize, implements_authorize;
    CompleteAuthorize => ImplementsCompleteAuthorize, LacksCompleteAuthorize, implements_complete_authorize;
    Capture => ImplementsCapture, LacksCapture, implements_capture;
    Purchase => ImplementsPurchase, LacksPurchase, implements_purchase;
    CompletePurchase => ImplementsCompletePurchase, LacksCompletePurchase, implements_complete_purchase;
    Refund => ImplementsRefund, LacksRefund, implements_refund;
    Void => ImplementsVoid, LacksVoid, implements_void;
    CreateCard => ImplementsCreateCard, LacksCreateCard, implements_create_card;
    DeleteCard => ImplementsDeleteCard, LacksDeleteCard, implements_delete_card;
    UpdateCard => ImplementsUpdateCard, LacksUpdateCard, implements_update_card;
}

/// Capabilities whose trait the given concrete type implements, in catalog
/// order.
///
/// ```
/// use gateway_conformance::contract::Capability;
/// use gateway_conformance::gateways::ManualGateway;
/// use gateway_conformance::implemented_capabilities;
///
/// assert_eq!(
///     implemented_capabilities!(ManualGateway),
///     vec![Capability::Authorize, Capability::Capture, Capability::Void]
/// );
/// ```
#[macro_export]
macro_rules! implemented_capabilities {
    ($ty:ty) => {{
        #[allow(unused_imports)]
        use $crate::contract::detect::*;
        use $crate::contract::Capability;

        let detector = $crate::contract::detect::ImplDetector::<$ty>::new();
        let checks = [
            (Capability::Authorize, (&detector).implements_authorize()),
            (Capability::CompleteAuthorize, (&detector).implements_complete_authorize()),
            (Capability::Capture, (&detector).implements_capture()),
            (Capability::Purchase, (&detector).implements_purchase()),
            (Capability::CompletePurchase, (&detector).implements_complete_purchase()),
            (Capability::Refund, (&detector).implements_refund()),
            (Capability::Void, (&detector).implements_void()),
            (Capability::CreateCard, (&detector).implements_create_card()),
            (Capability::DeleteCard, (&detector).implements_delete_card()),
            (Capability::UpdateCard, (&detector).implements_update_card()),
        ];
        checks
            .into_iter()
            .filter(|(_, implemented)| *implemented)
            .map(|(capability, _)| capability)
            .collect::<::std::vec::Vec<Capability>>()
    }};
}

/// A [`ConformanceRunner`] for a concrete gateway type that also checks the
/// capability traits the type implements against its support flags.
///
/// ```
/// use gateway_conformance::conformance_runner;
/// use gateway_conformance::gateways::DummyGateway;
///
/// let summary = conformance_runner!(DummyGateway, DummyGateway::new).run_all();
/// assert!(summary.is_conformant());
/// ```
///
/// [`ConformanceRunner`]: crate::executor::ConformanceRunner
#[macro_export]
macro_rules! conformance_runner {
    ($ty:ty, $factory:expr) => {
        $crate::executor::ConformanceRunner::<$ty, _>::new($factory)
            .with_implemented_capabilities($crate::implemented_capabilities!($ty))
    };
}

/// Generate a `#[test]` that runs every scenario against a gateway type and
/// fails with the full report unless it conforms.
///
/// ```ignore
/// gateway_conformance::conformance_tests!(MyGateway, MyGateway::new);
/// ```
#[macro_export]
macro_rules! conformance_tests {
    ($ty:ty, $factory:expr) => {
        #[test]
        fn gateway_conforms() {
            let summary = $crate::conformance_runner!($ty, $factory).run_all();
            assert!(
                summary.is_conformant(),
                "gateway is not conformant:\n{summary}"
            );
        }
    };
}
