//! Shared building blocks for tristore.
//!
//! - [`types`] - The resource model: [`NamedNode`](types::NamedNode),
//!   [`LocalNode`](types::LocalNode), [`Literal`](types::Literal),
//!   [`Triple`](types::Triple) and [`TriplePattern`](types::TriplePattern)
//! - [`collections`] - Hash map and set aliases with a consistent hasher
//! - [`utils`] - Errors and hashing helpers
//!
//! Most users want `tristore-core`, which builds the indexed store on top of
//! these types.

pub mod collections;
pub mod types;
pub mod utils;

pub use utils::error::{Error, Result};
