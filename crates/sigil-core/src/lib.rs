#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for sigil identifiers.
//!
//! Three layers:
//! - **Factory** (`Identifiers`): arena that mints identity-compared handles
//! - **Registry** (`Registry`): string key to identifier, with reverse lookup
//! - **Realm** (`Realm`): both of the above plus a tracer, injected into callers
//!
//! Identifiers are plain `Copy` handles. Equality is handle equality, so two
//! identifiers minted with the same description never compare equal.

pub mod colors;
pub mod error;
pub mod global;
pub mod identifier;
pub mod property;
pub mod realm;
pub mod registry;
pub mod trace;
pub mod well_known;

#[cfg(test)]
mod property_tests;
#[cfg(test)]
mod registry_tests;
#[cfg(test)]
mod trace_tests;

pub use colors::Colors;
pub use error::{Error, Result};
pub use identifier::{Identifier, Identifiers, Invocation};
pub use property::{PropertyKey, PropertyMap};
pub use realm::Realm;
pub use registry::Registry;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
pub use well_known::WellKnown;
