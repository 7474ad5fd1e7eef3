//! Common utilities used throughout tristore.
//!
//! - [`error`] - The crate-wide [`Error`] type
//! - [`hash`] - Fast, deterministic hashing with FxHash (non-cryptographic)

pub mod error;
pub mod hash;

pub use error::{Error, Result};
pub use hash::{FxHasher, stable_hash};
