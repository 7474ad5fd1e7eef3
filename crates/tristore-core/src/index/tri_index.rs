//! Three sorted maps over one set of triples.
//!
//! SPO membership is the source of truth: an insert that finds the SPO key
//! already present touches nothing else, and a removal that misses in SPO does
//! not look at the other two maps. All three maps are keyed by rotations of the
//! same per-triple key, so they cannot disagree on which triples are equal.

use std::collections::BTreeMap;
use std::collections::btree_map::{self, Entry};
use std::ops::Bound;

use tristore_common::types::Triple;
use tristore_common::utils::error::{Error, Result};

use super::{IndexOrder, RangePlan};
use crate::order::TripleKey;

type IndexMap = BTreeMap<TripleKey, Triple>;

/// The SPO, POS and OSP indexes, kept in lockstep.
#[derive(Debug, Clone, Default)]
pub struct TriIndex {
    spo: IndexMap,
    pos: IndexMap,
    osp: IndexMap,
}

impl TriIndex {
    /// Creates three empty indexes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds all three indexes at once from SPO keys.
    ///
    /// Each map is bulk-built from a sorted sequence, which beats inserting
    /// entries one at a time. Duplicate keys collapse.
    #[must_use]
    pub fn bulk_build(entries: Vec<(TripleKey, Triple)>) -> Self {
        let pos = entries
            .iter()
            .map(|(key, triple)| (IndexOrder::Pos.rotate(key.clone()), triple.clone()))
            .collect();
        let osp = entries
            .iter()
            .map(|(key, triple)| (IndexOrder::Osp.rotate(key.clone()), triple.clone()))
            .collect();
        let spo = entries.into_iter().collect();
        Self { spo, pos, osp }
    }

    /// Inserts a triple under its SPO key.
    ///
    /// Returns `false`, and leaves POS and OSP alone, if the key is already in
    /// SPO.
    pub fn insert(&mut self, key: TripleKey, triple: Triple) -> bool {
        let Entry::Vacant(slot) = self.spo.entry(key) else {
            return false;
        };
        let key = slot.key().clone();
        slot.insert(triple.clone());

        let fresh_pos = self
            .pos
            .insert(IndexOrder::Pos.rotate(key.clone()), triple.clone())
            .is_none();
        let fresh_osp = self
            .osp
            .insert(IndexOrder::Osp.rotate(key), triple)
            .is_none();
        debug_assert!(fresh_pos && fresh_osp, "POS/OSP held a triple SPO did not");
        true
    }

    /// Removes the triple with the given SPO key from all three indexes.
    pub fn remove(&mut self, key: &TripleKey) -> Option<Triple> {
        self.remove_from(IndexOrder::Spo, key)
    }

    /// Removes an entry from the `order` index by its rotated key, then removes
    /// the same triple from the other two indexes.
    pub fn remove_from(&mut self, order: IndexOrder, rotated: &TripleKey) -> Option<Triple> {
        let removed = self.map_mut(order).remove(rotated)?;
        let spo_key = order.unrotate(rotated.clone());
        for other in IndexOrder::ALL {
            if other != order {
                let gone = self.map_mut(other).remove(&other.rotate(spo_key.clone()));
                debug_assert!(gone.is_some(), "{other} lacked a triple {order} held");
            }
        }
        Some(removed)
    }

    /// Returns true if the SPO key is present.
    #[must_use]
    pub fn contains(&self, key: &TripleKey) -> bool {
        self.spo.contains_key(key)
    }

    /// Number of triples (the SPO cardinality).
    #[must_use]
    pub fn len(&self) -> usize {
        self.spo.len()
    }

    /// Returns true if there are no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spo.is_empty()
    }

    /// Cardinalities of SPO, POS and OSP, in that order.
    #[must_use]
    pub fn lens(&self) -> [usize; 3] {
        [self.spo.len(), self.pos.len(), self.osp.len()]
    }

    /// Empties all three indexes.
    pub fn clear(&mut self) {
        self.spo.clear();
        self.pos.clear();
        self.osp.clear();
    }

    /// Iterates over every triple in SPO order.
    pub fn iter(&self) -> impl Iterator<Item = &Triple> + '_ {
        self.spo.values()
    }

    /// Iterates over the triples inside `plan`, or nothing for `None`.
    #[must_use]
    pub fn matching(&self, plan: Option<&RangePlan>) -> Matches<'_> {
        Matches {
            range: plan.map(|plan| {
                let bounds = (Bound::Included(plan.low()), Bound::Included(plan.high()));
                self.map(plan.order()).range::<TripleKey, _>(bounds)
            }),
        }
    }

    /// Returns the first entry of the `order` index after `from` and no greater
    /// than `high`.
    pub(crate) fn next_in_range(
        &self,
        order: IndexOrder,
        from: Bound<&TripleKey>,
        high: &TripleKey,
    ) -> Option<(&TripleKey, &Triple)> {
        self.map(order)
            .range::<TripleKey, _>((from, Bound::Included(high)))
            .next()
    }

    /// Verifies that the three indexes describe the same set of triples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexDesync`] on the first disagreement found.
    pub fn check_consistency(&self) -> Result<()> {
        let [spo, pos, osp] = self.lens();
        if spo != pos || spo != osp {
            let msg = format!("index sizes differ: spo={spo}, pos={pos}, osp={osp}");
            tracing::error!("{msg}");
            return Err(Error::IndexDesync(msg));
        }

        for (key, triple) in &self.spo {
            for order in [IndexOrder::Pos, IndexOrder::Osp] {
                match self.map(order).get(&order.rotate(key.clone())) {
                    Some(found) if found == triple => {}
                    Some(found) => {
                        let msg = format!("{order} maps the key of {triple} to {found}");
                        tracing::error!("{msg}");
                        return Err(Error::IndexDesync(msg));
                    }
                    None => {
                        let msg = format!("{triple} is missing from {order}");
                        tracing::error!("{msg}");
                        return Err(Error::IndexDesync(msg));
                    }
                }
            }
        }
        Ok(())
    }

    fn map(&self, order: IndexOrder) -> &IndexMap {
        match order {
            IndexOrder::Spo => &self.spo,
            IndexOrder::Pos => &self.pos,
            IndexOrder::Osp => &self.osp,
        }
    }

    fn map_mut(&mut self, order: IndexOrder) -> &mut IndexMap {
        match order {
            IndexOrder::Spo => &mut self.spo,
            IndexOrder::Pos => &mut self.pos,
            IndexOrder::Osp => &mut self.osp,
        }
    }
}

/// Borrowing iterator over the triples in one planned range.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    range: Option<btree_map::Range<'a, TripleKey, Triple>>,
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a Triple;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.as_mut()?.next().map(|(_, triple)| triple)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.as_ref().map_or((0, Some(0)), Iterator::size_hint)
    }
}

impl DoubleEndedIterator for Matches<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range.as_mut()?.next_back().map(|(_, triple)| triple)
    }
}
