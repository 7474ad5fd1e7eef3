//! Range-query planning.
//!
//! Every pattern shape is a contiguous prefix range on exactly one index:
//!
//! | Bound | Index | Range |
//! |-------|-------|-------|
//! | - | SPO | `[(MIN,MIN,MIN), (MAX,MAX,MAX)]` |
//! | S,P,O | SPO | `[(S,P,O), (S,P,O)]` |
//! | S,P | SPO | `[(S,P,MIN), (S,P,MAX)]` |
//! | S | SPO | `[(S,MIN,MIN), (S,MAX,MAX)]` |
//! | P / P,O | POS | `[(P,O?,MIN), (P,O?,MAX)]` |
//! | O / S,O | OSP | `[(O,S?,MIN), (O,S?,MAX)]` |
//!
//! So a scan touches exactly the matching triples: O(log n + k), no
//! post-filtering.

use tristore_common::types::{Resource, TriplePattern};

use super::IndexOrder;
use crate::order::{ResourceKey, ResourceOrder, TermKey, TripleKey};

/// Picks the index whose key prefix covers the bound components.
#[must_use]
pub fn select_index(subject_bound: bool, predicate_bound: bool, object_bound: bool) -> IndexOrder {
    match (subject_bound, predicate_bound, object_bound) {
        (true, _, false) | (true, true, true) | (false, false, false) => IndexOrder::Spo,
        (false, true, _) => IndexOrder::Pos,
        (_, false, true) => IndexOrder::Osp,
    }
}

/// An inclusive key range on one index.
///
/// Bounds are stored already rotated into the index's order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangePlan {
    order: IndexOrder,
    low: TripleKey,
    high: TripleKey,
}

impl RangePlan {
    /// Plans a scan from resolved component keys (`None` = wildcard).
    #[must_use]
    pub fn new(
        subject: Option<ResourceKey>,
        predicate: Option<ResourceKey>,
        object: Option<ResourceKey>,
    ) -> Self {
        let order = select_index(subject.is_some(), predicate.is_some(), object.is_some());
        let bound = [subject, predicate, object];
        let low = bound
            .clone()
            .map(|k| k.map_or(TermKey::Min, TermKey::Term));
        let high = bound.map(|k| k.map_or(TermKey::Max, TermKey::Term));
        Self {
            order,
            low: order.rotate(low),
            high: order.rotate(high),
        }
    }

    /// Plans a scan for `pattern` using the store's resource order.
    ///
    /// Returns `None` when a bound resource is unknown to the order, in which
    /// case nothing can match.
    #[must_use]
    pub fn for_pattern(order: &ResourceOrder, pattern: &TriplePattern) -> Option<Self> {
        let resolve = |slot: &Option<Resource>| match slot {
            None => Some(None),
            Some(resource) => order.lookup(resource).map(Some),
        };
        let plan = Self::new(
            resolve(&pattern.subject)?,
            resolve(&pattern.predicate)?,
            resolve(&pattern.object)?,
        );
        tracing::trace!(index = %plan.order, point = plan.is_point(), "planned range scan");
        Some(plan)
    }

    /// The index to scan.
    #[must_use]
    pub fn order(&self) -> IndexOrder {
        self.order
    }

    /// Inclusive lower bound, in index order.
    #[must_use]
    pub fn low(&self) -> &TripleKey {
        &self.low
    }

    /// Inclusive upper bound, in index order.
    #[must_use]
    pub fn high(&self) -> &TripleKey {
        &self.high
    }

    /// Returns true when all three components are bound.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.low == self.high
    }
}
