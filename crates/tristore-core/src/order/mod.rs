//! The resource ordering engine.
//!
//! Every index in a store sorts by the same resource order:
//!
//! 1. the resource hash (cheap, decides almost every comparison),
//! 2. the canonical string form (decides named nodes and literals),
//! 3. the collision rank (decides distinct local nodes that share both).
//!
//! [`ResourceOrder`] owns the [`CollisionTable`] that step 3 needs, so the
//! order is scoped to a single store and never leaks between instances.

mod collision;
mod key;

use std::cmp::Ordering;

use tristore_common::types::{Resource, Triple};

pub use collision::CollisionTable;
pub use key::{ResourceKey, TermKey, TripleKey};

/// Turns resources into ordering keys for one store.
#[derive(Debug, Clone)]
pub struct ResourceOrder {
    collisions: CollisionTable,
}

impl ResourceOrder {
    /// Creates an ordering with an empty collision table.
    #[must_use]
    pub fn new(collision_warn_threshold: usize) -> Self {
        Self {
            collisions: CollisionTable::new(collision_warn_threshold),
        }
    }

    /// Returns the key of `resource`, registering local nodes on first sight.
    pub fn key(&mut self, resource: &Resource) -> ResourceKey {
        let form = resource.canonical_form();
        let hash = resource.ordering_hash(&form);
        let rank = match resource {
            Resource::Local(node) => self.collisions.rank_or_insert(hash, node),
            Resource::Named(_) | Resource::Literal(_) => 0,
        };
        ResourceKey::new(hash, form, rank)
    }

    /// Returns the key of `resource` without registering anything.
    ///
    /// `None` means `resource` is a local node this order has never seen, so
    /// no triple in the store can mention it.
    #[must_use]
    pub fn lookup(&self, resource: &Resource) -> Option<ResourceKey> {
        let form = resource.canonical_form();
        let hash = resource.ordering_hash(&form);
        let rank = match resource {
            Resource::Local(node) => self.collisions.rank(hash, node)?,
            Resource::Named(_) | Resource::Literal(_) => 0,
        };
        Some(ResourceKey::new(hash, form, rank))
    }

    /// Returns the SPO key of `triple`, registering its local nodes.
    pub fn triple_key(&mut self, triple: &Triple) -> TripleKey {
        [
            TermKey::Term(self.key(triple.subject())),
            TermKey::Term(self.key(triple.predicate())),
            TermKey::Term(self.key(triple.object())),
        ]
    }

    /// Returns the SPO key of `triple` if all of its resources are known.
    #[must_use]
    pub fn lookup_triple(&self, triple: &Triple) -> Option<TripleKey> {
        Some([
            TermKey::Term(self.lookup(triple.subject())?),
            TermKey::Term(self.lookup(triple.predicate())?),
            TermKey::Term(self.lookup(triple.object())?),
        ])
    }

    /// Compares two resources under this order.
    ///
    /// Identical local nodes short-circuit to `Equal`. Local nodes seen here
    /// for the first time are registered, which fixes their relative order for
    /// as long as both stay alive.
    pub fn compare(&mut self, a: &Resource, b: &Resource) -> Ordering {
        if let (Resource::Local(x), Resource::Local(y)) = (a, b)
            && x.ptr_eq(y)
        {
            return Ordering::Equal;
        }
        let ka = self.key(a);
        let kb = self.key(b);
        ka.cmp(&kb)
    }

    /// Returns the collision table.
    #[must_use]
    pub fn collisions(&self) -> &CollisionTable {
        &self.collisions
    }

    /// Drops collision slots of dropped local nodes where that leaves live
    /// ranks untouched. Returns the number of slots removed.
    pub fn purge(&mut self) -> usize {
        self.collisions.purge_dead()
    }

    /// Forgets every registered local node.
    pub fn clear(&mut self) {
        self.collisions.clear();
    }
}

impl Default for ResourceOrder {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_COLLISION_WARN_THRESHOLD)
    }
}
