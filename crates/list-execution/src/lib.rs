#![cfg_attr(test, allow(unused_crate_dependencies))]

//! Concurrent resolution of list and connection fields.
//!
//! Items of a list are resolved concurrently, each in its own [`ItemContext`]. When an item
//! raises, the error is always recorded with the item's path and then either nulls the item,
//! nulls the list (propagating further up if the list is non-null), or, for lists and
//! connections declared with `skip_nodes_on_raise`, simply drops the item.

mod config;
mod connection;
mod context;
mod error;
mod list;
mod path;

pub use config::*;
pub use connection::*;
pub use context::*;
pub use error::*;
pub use list::*;
pub use path::*;
