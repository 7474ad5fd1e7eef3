//! Error types for tristore.
//!
//! Everything fallible in the store returns [`Result<T>`]. Duplicate adds and
//! removals of absent triples are *not* errors; those report through `bool`
//! return values.

use thiserror::Error;

use crate::types::Position;

/// The main error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A cursor was asked to remove its current element, but nothing is pinned.
    ///
    /// Happens when the cursor was never advanced or the current element was
    /// already removed.
    #[error("illegal cursor state: no current element to remove")]
    IllegalCursorState,

    /// The store was mutated through some path other than this cursor while
    /// the cursor was still in use.
    #[error("concurrent modification: store generation is {found}, cursor expected {expected}")]
    ConcurrentModification {
        /// Generation captured by the cursor.
        expected: u64,
        /// Generation the store is at now.
        found: u64,
    },

    /// A cursor was used with a store other than the one that created it.
    #[error("cursor does not belong to this store")]
    ForeignCursor,

    /// A literal was given where only named or local nodes are allowed.
    #[error("a literal cannot be used as the {0} of a triple")]
    LiteralNotAllowed(Position),

    /// The three indexes no longer describe the same set of triples.
    #[error("index desync: {0}")]
    IndexDesync(String),
}

/// Result type alias for tristore operations.
pub type Result<T> = std::result::Result<T, Error>;
