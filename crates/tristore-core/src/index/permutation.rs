//! The three triple orderings.
//!
//! | Index | Order | Serves |
//! |-------|-------|--------|
//! | SPO | s, p, o | nothing bound, subject, subject+predicate, all three |
//! | POS | p, o, s | predicate, predicate+object |
//! | OSP | o, s, p | object, subject+object |
//!
//! Each index stores keys rotated into its own order, so the lexicographic
//! order of the rotated array is that index's comparator.

use std::cmp::Ordering;
use std::fmt;

use crate::order::TripleKey;

/// One of the three rotations of (subject, predicate, object).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexOrder {
    /// Subject, predicate, object.
    Spo,
    /// Predicate, object, subject.
    Pos,
    /// Object, subject, predicate.
    Osp,
}

impl IndexOrder {
    /// All orders, SPO first.
    pub const ALL: [IndexOrder; 3] = [IndexOrder::Spo, IndexOrder::Pos, IndexOrder::Osp];

    /// Rearranges a value in SPO order into this index's order.
    #[must_use]
    pub fn rotate<T>(self, spo: [T; 3]) -> [T; 3] {
        let [s, p, o] = spo;
        match self {
            Self::Spo => [s, p, o],
            Self::Pos => [p, o, s],
            Self::Osp => [o, s, p],
        }
    }

    /// Inverse of [`rotate`](Self::rotate).
    #[must_use]
    pub fn unrotate<T>(self, rotated: [T; 3]) -> [T; 3] {
        match self {
            Self::Spo => rotated,
            Self::Pos => {
                let [p, o, s] = rotated;
                [s, p, o]
            }
            Self::Osp => {
                let [o, s, p] = rotated;
                [s, p, o]
            }
        }
    }

    /// Compares two SPO keys under this index's order.
    ///
    /// Stops at the first component that differs.
    #[must_use]
    pub fn compare(self, a: &TripleKey, b: &TripleKey) -> Ordering {
        let [a0, a1, a2] = self.rotate([&a[0], &a[1], &a[2]]);
        let [b0, b1, b2] = self.rotate([&b[0], &b[1], &b[2]]);
        a0.cmp(b0)
            .then_with(|| a1.cmp(b1))
            .then_with(|| a2.cmp(b2))
    }

    /// Short lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Spo => "spo",
            Self::Pos => "pos",
            Self::Osp => "osp",
        }
    }
}

impl fmt::Display for IndexOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
