//! The triple store facade.

use std::sync::atomic::{AtomicU64, Ordering};

use tristore_common::types::{Resource, Triple, TriplePattern};
use tristore_common::utils::error::Result;

use super::{Cursor, FrozenStore};
use crate::config::{ConfigError, StoreConfig};
use crate::index::{IndexOrder, Matches, RangePlan, TriIndex};
use crate::order::{ResourceOrder, TripleKey};

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(0);

fn next_store_id() -> u64 {
    NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed)
}

/// An in-memory set of triples with SPO, POS and OSP indexes.
///
/// Every lookup shape (any subset of subject, predicate and object bound) is
/// answered by one contiguous range scan on one index, so a lookup costs
/// O(log n + k) for k results. The three indexes are always updated together;
/// no caller can observe a triple that is in one index but not the others.
///
/// The store does no locking. It is `Send + Sync`, so callers that share it
/// across threads wrap it in their own lock.
///
/// # Example
///
/// ```
/// use tristore_core::TripleStore;
/// use tristore_common::types::{Literal, NamedNode, Triple, TriplePattern};
///
/// let mut store = TripleStore::new();
/// let alix = NamedNode::new("http://example.org/alix");
/// let name = NamedNode::new("http://xmlns.com/foaf/0.1/name");
/// store.add(Triple::new(alix.clone(), name.clone(), Literal::plain("Alix")));
///
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.count(&TriplePattern::with_subject(alix)), 1);
/// ```
#[derive(Debug)]
pub struct TripleStore {
    id: u64,
    index: TriIndex,
    order: ResourceOrder,
    generation: u64,
    config: StoreConfig,
}

impl TripleStore {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::build(StoreConfig::default())
    }

    /// Creates an empty store with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn with_config(config: StoreConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: StoreConfig) -> Self {
        Self {
            id: next_store_id(),
            index: TriIndex::new(),
            order: ResourceOrder::new(config.collision_warn_threshold),
            generation: 0,
            config,
        }
    }

    /// Creates a store holding every triple of a finite collection.
    ///
    /// The indexes are bulk-built from sorted keys rather than filled one
    /// triple at a time. Duplicates collapse.
    #[must_use]
    pub fn from_collection(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut store = Self::new();
        store.bulk_insert(triples);
        store
    }

    /// Creates a store by draining `triples` one triple at a time.
    #[must_use]
    pub fn from_iterator(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut store = Self::new();
        store.extend(triples);
        store
    }

    /// Adds `triples` with a single rebuild of all three indexes.
    ///
    /// Cheaper than repeated [`add`](Self::add) for large batches. Runs
    /// [`check_consistency`](Self::check_consistency) afterwards when
    /// [`StoreConfig::verify_on_bulk_load`] is set.
    ///
    /// Returns the number of triples that were not already present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexDesync`](tristore_common::Error::IndexDesync) if
    /// verification is enabled and fails.
    pub fn bulk_load(&mut self, triples: impl IntoIterator<Item = Triple>) -> Result<usize> {
        let added = self.bulk_insert(triples);
        if self.config.verify_on_bulk_load {
            self.index.check_consistency()?;
        }
        Ok(added)
    }

    fn bulk_insert(&mut self, triples: impl IntoIterator<Item = Triple>) -> usize {
        let before = self.index.len();
        let existing = std::mem::take(&mut self.index);
        let mut entries: Vec<(TripleKey, Triple)> = existing
            .iter()
            .map(|triple| (self.order.triple_key(triple), triple.clone()))
            .collect();
        entries.extend(
            triples
                .into_iter()
                .map(|triple| (self.order.triple_key(&triple), triple)),
        );
        let offered = entries.len() - before;

        self.index = TriIndex::bulk_build(entries);
        let added = self.index.len() - before;
        if added > 0 {
            self.generation += 1;
        }
        tracing::debug!(offered, added, total = self.index.len(), "bulk-built triple indexes");
        added
    }

    /// Adds a triple. Returns `false` if it was already present.
    pub fn add(&mut self, triple: Triple) -> bool {
        let key = self.order.triple_key(&triple);
        let added = self.index.insert(key, triple);
        if added {
            self.generation += 1;
        }
        added
    }

    /// Removes a triple. Returns `false` if it was not present.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        let Some(key) = self.order.lookup_triple(triple) else {
            return false;
        };
        let removed = self.index.remove(&key).is_some();
        if removed {
            self.generation += 1;
        }
        removed
    }

    pub(crate) fn remove_at(&mut self, order: IndexOrder, rotated: &TripleKey) -> Option<Triple> {
        let removed = self.index.remove_from(order, rotated)?;
        self.generation += 1;
        Some(removed)
    }

    /// Removes every triple matching `pattern`, returning how many went.
    ///
    /// # Errors
    ///
    /// Propagates cursor errors. The cursor is private to this call, so
    /// none are expected.
    pub fn remove_matching(&mut self, pattern: &TriplePattern) -> Result<usize> {
        let mut cursor = self.cursor(pattern);
        let mut removed = 0;
        while cursor.advance(self)?.is_some() {
            cursor.remove_current(self)?;
            removed += 1;
        }
        Ok(removed)
    }

    /// Removes each of `triples`, returning how many were present.
    pub fn remove_all<'a>(&mut self, triples: impl IntoIterator<Item = &'a Triple>) -> usize {
        triples
            .into_iter()
            .filter(|triple| self.remove(triple))
            .count()
    }

    /// Removes every triple and forgets every local node.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
        self.generation += 1;
    }

    /// Drops collision-table slots left by dropped local nodes.
    ///
    /// The table also does this on its own as it grows. Returns the number of
    /// slots removed.
    pub fn purge_collision_table(&mut self) -> usize {
        self.order.purge()
    }

    /// Returns true if the store holds `triple`.
    #[must_use]
    pub fn contains(&self, triple: &Triple) -> bool {
        self.order
            .lookup_triple(triple)
            .is_some_and(|key| self.index.contains(&key))
    }

    /// Number of triples.
    #[must_use]
    pub fn size(&self) -> usize {
        self.index.len()
    }

    /// Number of triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the store holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of triples matching `pattern`.
    #[must_use]
    pub fn count(&self, pattern: &TriplePattern) -> usize {
        self.matching(pattern).count()
    }

    /// Iterates over the triples matching `pattern`.
    ///
    /// Borrows the store, so it cannot be mutated while iterating; use
    /// [`cursor`](Self::cursor) to delete while traversing.
    #[must_use]
    pub fn matching(&self, pattern: &TriplePattern) -> Matches<'_> {
        let plan = RangePlan::for_pattern(&self.order, pattern);
        self.index.matching(plan.as_ref())
    }

    /// Iterates over every triple in SPO order.
    #[must_use]
    pub fn iter(&self) -> Matches<'_> {
        self.index.matching(Some(&RangePlan::new(None, None, None)))
    }

    /// Opens a cursor over the triples matching the bound components.
    ///
    /// `None` is a wildcard.
    #[must_use]
    pub fn filter(
        &self,
        subject: Option<&Resource>,
        predicate: Option<&Resource>,
        object: Option<&Resource>,
    ) -> Cursor {
        self.cursor(&TriplePattern::new(
            subject.cloned(),
            predicate.cloned(),
            object.cloned(),
        ))
    }

    /// Opens a cursor over the triples matching `pattern`.
    #[must_use]
    pub fn cursor(&self, pattern: &TriplePattern) -> Cursor {
        Cursor::new(self, RangePlan::for_pattern(&self.order, pattern))
    }

    /// Cardinalities of the SPO, POS and OSP indexes.
    ///
    /// All three always equal [`len`](Self::len).
    #[must_use]
    pub fn index_sizes(&self) -> [usize; 3] {
        self.index.lens()
    }

    /// Verifies that the three indexes hold the same triples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexDesync`](tristore_common::Error::IndexDesync)
    /// describing the first disagreement.
    pub fn check_consistency(&self) -> Result<()> {
        self.index.check_consistency()
    }

    /// Returns the mutation counter. It changes whenever the content does.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the resource order used by all three indexes.
    #[must_use]
    pub fn resource_order(&self) -> &ResourceOrder {
        &self.order
    }

    /// Takes an immutable, shareable copy of the current content.
    #[must_use]
    pub fn freeze(&self) -> FrozenStore {
        FrozenStore::new(self.clone())
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn index(&self) -> &TriIndex {
        &self.index
    }
}

impl Default for TripleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TripleStore {
    /// Copies the content into a new store; cursors of the original do not
    /// work on the copy.
    fn clone(&self) -> Self {
        Self {
            id: next_store_id(),
            index: self.index.clone(),
            order: self.order.clone(),
            generation: 0,
            config: self.config.clone(),
        }
    }
}

impl Extend<Triple> for TripleStore {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.add(triple);
        }
    }
}

impl FromIterator<Triple> for TripleStore {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self::from_collection(iter)
    }
}

impl<'a> IntoIterator for &'a TripleStore {
    type Item = &'a Triple;
    type IntoIter = Matches<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
