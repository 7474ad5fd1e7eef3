//! The resource model shared by every tristore crate.
//!
//! | Type | What it is |
//! |------|------------|
//! | [`Resource`] | Any value that can sit in a triple |
//! | [`Node`] | A non-literal resource (subject/predicate positions) |
//! | [`Triple`] | A subject-predicate-object statement |
//! | [`TriplePattern`] | A triple with optional wildcards, used for lookups |

mod resource;
mod triple;

pub use resource::{Literal, LiteralTag, LocalNode, NamedNode, Node, Resource, WeakLocalNode};
pub use triple::{Position, Triple, TriplePattern};
