//! Read-only shared snapshots.

use std::sync::Arc;

use tristore_common::types::{Triple, TriplePattern};

use super::TripleStore;
use crate::index::Matches;

/// An immutable copy of a store's content.
///
/// Cloning is an `Arc` bump, so a snapshot can be handed to many readers
/// (including across threads) while the original store keeps changing.
#[derive(Debug, Clone)]
pub struct FrozenStore {
    inner: Arc<TripleStore>,
}

impl FrozenStore {
    pub(crate) fn new(store: TripleStore) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Number of triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the snapshot holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns true if the snapshot holds `triple`.
    #[must_use]
    pub fn contains(&self, triple: &Triple) -> bool {
        self.inner.contains(triple)
    }

    /// Iterates over the triples matching `pattern`.
    #[must_use]
    pub fn matching(&self, pattern: &TriplePattern) -> Matches<'_> {
        self.inner.matching(pattern)
    }

    /// Number of triples matching `pattern`.
    #[must_use]
    pub fn count(&self, pattern: &TriplePattern) -> usize {
        self.inner.count(pattern)
    }

    /// Iterates over every triple in SPO order.
    #[must_use]
    pub fn iter(&self) -> Matches<'_> {
        self.inner.iter()
    }

    /// Copies the content into a new mutable store.
    #[must_use]
    pub fn to_store(&self) -> TripleStore {
        TripleStore::clone(&self.inner)
    }
}

impl From<TripleStore> for FrozenStore {
    fn from(store: TripleStore) -> Self {
        Self::new(store)
    }
}

impl<'a> IntoIterator for &'a FrozenStore {
    type Item = &'a Triple;
    type IntoIter = Matches<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tristore_common::types::NamedNode;

    fn make_triple(s: &str, p: &str, o: &str) -> Triple {
        Triple::new(NamedNode::new(s), NamedNode::new(p), NamedNode::new(o))
    }

    #[test]
    fn test_freeze_is_isolated_from_later_writes() {
        let mut store = TripleStore::new();
        store.add(make_triple("a", "p", "b"));
        let frozen = store.freeze();

        store.add(make_triple("c", "p", "d"));
        assert_eq!(frozen.len(), 1);
        assert_eq!(store.len(), 2);
        assert!(frozen.contains(&make_triple("a", "p", "b")));
        assert!(!frozen.contains(&make_triple("c", "p", "d")));
    }

    #[test]
    fn test_queries() {
        let frozen = FrozenStore::from(TripleStore::from_collection([
            make_triple("a", "p", "b"),
            make_triple("b", "p", "b"),
            make_triple("a", "q", "c"),
        ]));
        let pattern = TriplePattern::with_object(NamedNode::new("b"));
        assert_eq!(frozen.count(&pattern), 2);
        assert_eq!(frozen.matching(&pattern).count(), 2);
        assert_eq!(frozen.iter().count(), 3);
        assert_eq!((&frozen).into_iter().count(), 3);
        assert!(!frozen.is_empty());
    }

    #[test]
    fn test_to_store_is_mutable_copy() {
        let frozen = TripleStore::from_collection([make_triple("a", "p", "b")]).freeze();
        let shared = frozen.clone();
        let mut store = frozen.to_store();
        store.add(make_triple("x", "y", "z"));

        assert_eq!(store.len(), 2);
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_frozen_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FrozenStore>();
    }
}
