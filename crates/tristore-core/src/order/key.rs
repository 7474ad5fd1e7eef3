//! Comparison keys.
//!
//! A [`ResourceKey`] is computed once per resource when it enters a store. Its
//! derived `Ord` is the resource order: hash first, canonical form second,
//! collision rank last. [`TermKey`] wraps it with the two sentinels used to
//! build range bounds.

use arcstr::ArcStr;

/// The ordering key of a single resource.
///
/// Field order matters: the derived `Ord` compares `hash`, then `form`, then
/// `rank`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceKey {
    hash: u64,
    form: ArcStr,
    rank: usize,
}

impl ResourceKey {
    pub(crate) fn new(hash: u64, form: ArcStr, rank: usize) -> Self {
        Self { hash, form, rank }
    }

    /// Returns the primary hash.
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Returns the canonical string form.
    #[must_use]
    pub fn form(&self) -> &str {
        &self.form
    }

    /// Returns the position in the collision bucket (0 for named nodes and
    /// literals).
    #[must_use]
    pub fn rank(&self) -> usize {
        self.rank
    }
}

/// A resource key, or one of the range sentinels.
///
/// Variant order gives `Min < Term(_) < Max` for every key, whatever its hash.
/// Sentinels only ever appear in range bounds, never in an index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TermKey {
    /// Sorts below every resource.
    Min,
    /// A real resource.
    Term(ResourceKey),
    /// Sorts above every resource.
    Max,
}

impl From<ResourceKey> for TermKey {
    fn from(key: ResourceKey) -> Self {
        Self::Term(key)
    }
}

/// Keys of a triple's three components, in subject-predicate-object order
/// unless stated otherwise.
pub type TripleKey = [TermKey; 3];
