//! The public store API.

mod cursor;
mod snapshot;
mod triple_store;

pub use cursor::Cursor;
pub use snapshot::FrozenStore;
pub use triple_store::TripleStore;
