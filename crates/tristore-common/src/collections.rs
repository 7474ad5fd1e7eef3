//! Standard collection type aliases for tristore.
//!
//! Use these instead of direct HashMap/HashSet so every map in the workspace
//! hashes the same way.
//!
//! | Type | Use Case |
//! |------|----------|
//! | [`TriMap`] | Single-threaded hash map |
//! | [`TriSet`] | Single-threaded hash set |
//!
//! # Example
//!
//! ```rust
//! use tristore_common::collections::{TriMap, TriSet};
//!
//! let mut map: TriMap<u64, &str> = TriMap::default();
//! map.insert(7, "seven");
//!
//! let mut set: TriSet<u64> = TriSet::default();
//! set.insert(1);
//! ```

use rustc_hash::FxBuildHasher;

/// Standard HashMap with FxHash (fast, non-cryptographic).
pub type TriMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Standard HashSet with FxHash.
pub type TriSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Create a new empty [`TriMap`].
#[inline]
#[must_use]
pub fn tri_map<K, V>() -> TriMap<K, V> {
    TriMap::with_hasher(FxBuildHasher)
}
