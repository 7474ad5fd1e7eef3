//! Mutable traversal over one planned range.

use std::ops::Bound;

use tristore_common::types::Triple;
use tristore_common::utils::error::{Error, Result};

use super::TripleStore;
use crate::index::{IndexOrder, RangePlan};
use crate::order::TripleKey;

/// A lazy, forward-only traversal of the triples matching a pattern.
///
/// A cursor does not borrow its store. Each step takes the store as an
/// argument instead, which lets [`remove_current`](Self::remove_current)
/// mutate the store between steps. The cursor captures the store's
/// generation when created; if the store is mutated through any other path,
/// the next step fails with [`Error::ConcurrentModification`].
///
/// Triples come out in ascending order of the index chosen for the pattern.
///
/// # Example
///
/// ```
/// use tristore_core::TripleStore;
/// use tristore_common::types::{NamedNode, Resource, Triple};
///
/// let mut store = TripleStore::new();
/// store.add(Triple::new(NamedNode::new("a"), NamedNode::new("p"), NamedNode::new("b")));
/// store.add(Triple::new(NamedNode::new("a"), NamedNode::new("q"), NamedNode::new("c")));
///
/// let subject: Resource = NamedNode::new("a").into();
/// let mut cursor = store.filter(Some(&subject), None, None);
/// while cursor.advance(&store)?.is_some() {
///     cursor.remove_current(&mut store)?;
/// }
/// assert!(store.is_empty());
/// # Ok::<(), tristore_common::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    store_id: u64,
    generation: u64,
    plan: Option<RangePlan>,
    /// Rotated key of the last element produced; the scan resumes after it.
    position: Option<TripleKey>,
    /// The element `remove_current` would delete.
    current: Option<Triple>,
}

impl Cursor {
    pub(crate) fn new(store: &TripleStore, plan: Option<RangePlan>) -> Self {
        Self {
            store_id: store.id(),
            generation: store.generation(),
            plan,
            position: None,
            current: None,
        }
    }

    /// The index this cursor walks, or `None` if nothing can match.
    #[must_use]
    pub fn index(&self) -> Option<IndexOrder> {
        self.plan.as_ref().map(RangePlan::order)
    }

    /// Returns the element most recently produced and not yet removed.
    #[must_use]
    pub fn current(&self) -> Option<&Triple> {
        self.current.as_ref()
    }

    /// Produces the next matching triple, or `Ok(None)` once the range is
    /// exhausted.
    ///
    /// After exhaustion the last produced element stays current, so it can
    /// still be removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignCursor`] if `store` did not create this cursor
    /// and [`Error::ConcurrentModification`] if it was mutated behind the
    /// cursor's back.
    pub fn advance(&mut self, store: &TripleStore) -> Result<Option<Triple>> {
        self.check(store)?;
        let Some(plan) = &self.plan else {
            return Ok(None);
        };

        let from = match &self.position {
            Some(key) => Bound::Excluded(key),
            None => Bound::Included(plan.low()),
        };
        let Some((key, triple)) = store.index().next_in_range(plan.order(), from, plan.high())
        else {
            return Ok(None);
        };

        self.position = Some(key.clone());
        self.current = Some(triple.clone());
        Ok(Some(triple.clone()))
    }

    /// Removes the current element from all three indexes and returns it.
    ///
    /// The cursor stays valid and continues after the removed element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalCursorState`] if there is no current element
    /// (the cursor was never advanced, or the element was already removed),
    /// plus the errors of [`advance`](Self::advance).
    pub fn remove_current(&mut self, store: &mut TripleStore) -> Result<Triple> {
        self.check(store)?;
        let (Some(plan), Some(key)) = (&self.plan, &self.position) else {
            return Err(Error::IllegalCursorState);
        };
        if self.current.is_none() {
            return Err(Error::IllegalCursorState);
        }

        let removed = store
            .remove_at(plan.order(), key)
            .ok_or(Error::IllegalCursorState)?;
        self.current = None;
        self.generation = store.generation();
        Ok(removed)
    }

    fn check(&self, store: &TripleStore) -> Result<()> {
        if store.id() != self.store_id {
            return Err(Error::ForeignCursor);
        }
        if store.generation() != self.generation {
            return Err(Error::ConcurrentModification {
                expected: self.generation,
                found: store.generation(),
            });
        }
        Ok(())
    }
}
