//! # yang-verify: Schema-Driven Value Verification
//!
//! Verifies JSON leaf and leaf-list values against the JSON encoding of
//! YANG schema nodes, for use inside a RESTCONF server before a payload is
//! accepted or served.
//!
//! ## Entry Points
//!
//! - [`Verifier::verify_leaf`] / [`verify_leaf`]: one scalar value.
//! - [`Verifier::verify_leaf_list`] / [`verify_leaf_list`]: an array of
//!   scalars, each type-checked, then checked for uniqueness.
//! - [`is_mandatory`]: whether `mandatory` applies to a node.
//! - [`classify`]: coarse category of a type name.
//!
//! ## Collaborators
//!
//! Typedefs (type names outside YANG's built-in set) are resolved through
//! a [`TypeLookup`]. [`TypeRegistry`] is the bundled in-memory store,
//! loadable from a directory of JSON/YAML typedef files.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - No state across calls: every entry point is safe to call
//!   concurrently given a `Sync` lookup.
//! - Every failure is one of three [`VerifyError`] kinds, returned on the
//!   first violation found.

pub mod config;
pub mod error;
pub mod lookup;
pub mod pattern;
pub mod range;
pub mod schema;
pub mod types;
pub mod verify;

pub use config::{VerifierConfig, DEFAULT_MAX_RESOLUTION_DEPTH};
pub use error::{ConfigError, FailureKind, Outcome, RegistryError, VerifyError};
pub use lookup::{NoImports, TypeLookup, TypeRegistry};
pub use schema::{is_mandatory, NodeKind, TypeDescriptor};
pub use types::{classify, is_compatible, JsonKind, YangType};
pub use verify::{string_form, verify_leaf, verify_leaf_list, Verifier};
