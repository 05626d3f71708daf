//! Payment gateway conformance harness
//!
//! Verifies that a payment gateway implementation honours the gateway
//! contract: it names itself, declares its configuration with working
//! accessors, reports exactly the capabilities it exposes, and copies its
//! configuration into every request it builds.
//!
//! A gateway implements [`contract::Gateway`] plus one capability trait per
//! supported operation, then runs the scenarios from its own test suite:
//!
//! ```
//! use gateway_conformance::executor::ConformanceRunner;
//! use gateway_conformance::gateways::DummyGateway;
//!
//! let summary = ConformanceRunner::new(DummyGateway::new).run_all();
//! assert!(summary.is_conformant());
//! assert_eq!(summary.total, 26);
//! ```
//!
//! A runner built this way only sees what the gateway exposes through
//! `as_<capability>()`. [`conformance_tests!`] also checks which capability
//! traits the type implements, so a gateway that implements `Refund` while
//! reporting `supports_refund() == false` fails:
//!
//! ```ignore
//! mod conformance {
//!     use my_gateway::MyGateway;
//!     gateway_conformance::conformance_tests!(MyGateway, MyGateway::new);
//! }
//! ```

pub mod config;
pub mod contract;
pub mod executor;
pub mod gateways;
pub mod models;
pub mod output;
pub mod utils;
