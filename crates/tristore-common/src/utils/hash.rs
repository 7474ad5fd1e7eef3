//! Fast hashing with FxHash.
//!
//! Resource ordering keys start with a hash of the canonical form, so the hash
//! must be deterministic for the lifetime of the process. `RandomState` would
//! work for that too, but FxHash is cheaper for the short strings IRIs and
//! labels usually are.

use std::hash::Hasher;

pub use rustc_hash::FxHasher;

/// Hashes a byte string with FxHash.
///
/// Same input, same output, for the whole process lifetime.
#[inline]
#[must_use]
pub fn stable_hash(bytes: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(bytes);
    hasher.finish()
}

/// Hashes a single integer with FxHash.
#[inline]
#[must_use]
pub fn stable_hash_u64(value: u64) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_u64(value);
    hasher.finish()
}
