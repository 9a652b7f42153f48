#![cfg_attr(test, allow(unused_crate_dependencies))]

//! Type references and their wrapping types.
//!
//! Every named type, and every forward reference to a type that is only known by name at
//! declaration time, can be wrapped as non-null or as a list. Wrappers are memoized by the
//! [`TypeRegistry`]: wrapping the same inner type with the same flavor always yields the same
//! [`TypeId`]. Lists additionally carry the `skip_nodes_on_raise` flag, which is part of their
//! identity.

mod builder;
mod error;
mod ids;
mod interner;
mod record;
mod registry;
mod schema;
mod walker;

pub use builder::*;
pub use error::*;
pub use ids::*;
pub use record::*;
pub use registry::*;
pub use schema::*;
pub use walker::*;
