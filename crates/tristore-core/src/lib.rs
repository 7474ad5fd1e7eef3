//! # tristore-core
//!
//! An in-memory triple store that keeps three sorted indexes (SPO, POS, OSP)
//! over the same set of triples, so a lookup with any combination of bound
//! subject, predicate and object is a single range scan.
//!
//! ## Modules
//!
//! - [`order`] - Total order over resources, including identity-only local nodes
//! - [`index`] - The three indexes and the range planner
//! - [`store`] - [`TripleStore`], its [`Cursor`] and [`FrozenStore`] snapshots
//! - [`config`] - [`StoreConfig`]
//!
//! The resource model lives in `tristore_common::types` and is re-exported here.

pub mod config;
pub mod index;
pub mod order;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use store::{Cursor, FrozenStore, TripleStore};
pub use tristore_common::types::{
    Literal, LiteralTag, LocalNode, NamedNode, Node, Position, Resource, Triple, TriplePattern,
};
pub use tristore_common::utils::error::{Error, Result};
