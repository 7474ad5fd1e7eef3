//! Collision table for local nodes.
//!
//! Local nodes carry no comparable value, and distinct ones may share both a
//! hash and a label. To still give them a strict, repeatable order, each store
//! remembers, per hash value, the order in which it first saw each local node.
//! A node's position in that bucket is its rank.
//!
//! Buckets hold [`WeakLocalNode`]s, so the table does not keep nodes alive.
//! A live node's rank never changes. The slot of a dropped node is handed to
//! the next new node in its bucket, and the table drops dead trailing slots
//! and dead buckets on its own once it has grown to twice its size after the
//! previous purge. A dropped node cannot be in any store, so no stored key
//! still refers to a slot that is reused or dropped.

use smallvec::SmallVec;
use tristore_common::collections::{TriMap, tri_map};
use tristore_common::types::{LocalNode, WeakLocalNode};

type Bucket = SmallVec<[WeakLocalNode; 2]>;

/// Slot count below which the table never purges itself.
const MIN_PURGE_SLOTS: usize = 64;

/// Per-store table of local nodes grouped by hash.
#[derive(Debug, Clone)]
pub struct CollisionTable {
    buckets: TriMap<u64, Bucket>,
    slots: usize,
    next_purge: usize,
    warn_threshold: usize,
}

impl CollisionTable {
    /// Creates an empty table that warns once a bucket outgrows
    /// `warn_threshold`.
    #[must_use]
    pub fn new(warn_threshold: usize) -> Self {
        Self {
            buckets: tri_map(),
            slots: 0,
            next_purge: MIN_PURGE_SLOTS,
            warn_threshold,
        }
    }

    /// Returns the rank of `node` in the bucket for `hash`, without
    /// registering it.
    #[must_use]
    pub fn rank(&self, hash: u64, node: &LocalNode) -> Option<usize> {
        self.buckets
            .get(&hash)
            .and_then(|bucket| bucket.iter().position(|slot| slot.is(node)))
    }

    /// Returns the rank of `node`, registering it first if this table has
    /// never seen it.
    ///
    /// A new node takes the first slot left behind by a dropped node, or is
    /// appended to the bucket.
    pub fn rank_or_insert(&mut self, hash: u64, node: &LocalNode) -> usize {
        let bucket = self.buckets.entry(hash).or_default();
        if let Some(rank) = bucket.iter().position(|slot| slot.is(node)) {
            return rank;
        }

        if let Some(rank) = bucket.iter().position(|slot| !slot.is_alive()) {
            bucket[rank] = node.downgrade();
            return rank;
        }

        let rank = bucket.len();
        bucket.push(node.downgrade());
        self.slots += 1;
        if rank > 0 {
            tracing::debug!(hash, bucket_len = rank + 1, node = %node, "local node hash collision");
        }
        if rank == self.warn_threshold {
            tracing::warn!(
                hash,
                bucket_len = rank + 1,
                "collision bucket exceeds {} local nodes; ordering these nodes is now linear",
                self.warn_threshold
            );
        }

        if self.slots > self.next_purge {
            let removed = self.purge_dead();
            tracing::trace!(removed, slots = self.slots, "purged collision table");
        }
        rank
    }

    /// Number of slots in the bucket for `hash`.
    #[must_use]
    pub fn bucket_len(&self, hash: u64) -> usize {
        self.buckets.get(&hash).map_or(0, SmallVec::len)
    }

    /// Total number of slots across all buckets, dead ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots
    }

    /// Returns true if the table holds no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots == 0
    }

    /// Drops the dead trailing slots of every bucket, and buckets left empty.
    ///
    /// Slots before a live one stay, so live ranks never move. Returns the
    /// number of slots removed.
    pub fn purge_dead(&mut self) -> usize {
        let before = self.slots;
        self.buckets.retain(|_, bucket| {
            while bucket.last().is_some_and(|slot| !slot.is_alive()) {
                bucket.pop();
            }
            !bucket.is_empty()
        });
        self.slots = self.buckets.values().map(SmallVec::len).sum();
        self.next_purge = MIN_PURGE_SLOTS.max(self.slots * 2);
        before - self.slots
    }

    /// Forgets every node.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.slots = 0;
        self.next_purge = MIN_PURGE_SLOTS;
    }
}
