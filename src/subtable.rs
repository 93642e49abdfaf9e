//! Per-level subtables backing the unique table.
//!
//! The store keeps one subtable per level of the variable order. A subtable
//! maps `(lo, hi)` child pairs to the canonical node with those children ---
//! the level itself is implicit, so the triple `(level, lo, hi)` is unique
//! across the whole store once every level has its own table.
//!
//! Collision chains are intrusive: the `Node.next` field links nodes that
//! hash to the same bucket, so no separate entry wrapper is needed.
//!
//! ```text
//! Subtable for level k:
//! ┌────────────────────────────────────────┐
//! │ buckets: [NodeId; 2^bits]              │
//! │   [0] ─────► Node@5 ──► Node@12 ──► ∅  │
//! │   [1] ─────► ∅                         │
//! │   [2] ─────► Node@3 ──► ∅              │
//! └────────────────────────────────────────┘
//! ```
//!
//! Only canonical nodes (created through [`NodeStore::make`]) are indexed
//! here. Unshared nodes from the Builder bypass the table entirely; the
//! Reducer is what folds them back into canonical form.
//!
//! [`NodeStore::make`]: crate::store::NodeStore::make

use std::hash::{Hash, Hasher};

use crate::node::Node;
use crate::types::{Level, NodeId};

/// Default number of bucket bits (2^12 = 4096 buckets per level).
pub const DEFAULT_BUCKET_BITS: usize = 12;

/// A unique-table subtable for a single level.
#[derive(Debug, Clone)]
pub struct Subtable {
    /// The level this subtable indexes.
    pub level: Level,

    /// Bucket array: each entry is the head of a collision chain.
    /// `NodeId::ZERO` marks an empty bucket.
    buckets: Vec<NodeId>,

    /// Bitmask for the hash function: `bucket = hash & bitmask`.
    bitmask: u64,

    /// Number of nodes in this subtable.
    count: usize,
}

impl Subtable {
    /// Creates an empty subtable for the given level.
    pub fn new(level: Level) -> Self {
        Self::with_bucket_bits(level, DEFAULT_BUCKET_BITS)
    }

    /// Creates a subtable with `2^bits` buckets.
    pub fn with_bucket_bits(level: Level, bits: usize) -> Self {
        assert!(bits <= 31, "Bucket bits should be in the range 0..=31");
        let num_buckets = 1usize << bits;
        Self {
            level,
            buckets: vec![NodeId::ZERO; num_buckets],
            bitmask: (num_buckets - 1) as u64,
            count: 0,
        }
    }

    #[inline]
    fn bucket_index(&self, lo: NodeId, hi: NodeId) -> usize {
        (hash_children(lo, hi) & self.bitmask) as usize
    }

    /// Looks up the canonical node with the given children.
    pub fn find(&self, lo: NodeId, hi: NodeId, nodes: &[Node]) -> Option<NodeId> {
        let mut current = self.buckets[self.bucket_index(lo, hi)];

        while current != Node::NO_NEXT {
            let node = &nodes[current.index()];
            if node.lo == lo && node.hi == hi {
                return Some(current);
            }
            current = node.next;
        }

        None
    }

    /// Inserts a node, prepending it to its collision chain and updating its
    /// `next` pointer in the arena.
    pub fn insert(&mut self, lo: NodeId, hi: NodeId, id: NodeId, nodes: &mut [Node]) {
        debug_assert!(!id.is_terminal(), "terminals are never chained");
        let bucket = self.bucket_index(lo, hi);
        nodes[id.index()].next = self.buckets[bucket];
        self.buckets[bucket] = id;
        self.count += 1;
    }

    /// Number of nodes indexed by this subtable.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the subtable indexes no nodes.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of buckets.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }
}

/// Hash for a `(lo, hi)` child pair.
#[inline]
fn hash_children(lo: NodeId, hi: NodeId) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    lo.raw().hash(&mut hasher);
    hi.raw().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_nodes() -> Vec<Node> {
        // Indices 0 and 1 are the terminal slots.
        let mut nodes = vec![Node::default(); 2];
        nodes.push(Node::new(Level::new(1), NodeId::ZERO, NodeId::ONE)); // @2
        nodes.push(Node::new(Level::new(1), NodeId::ONE, NodeId::ZERO)); // @3
        nodes.push(Node::new(Level::new(1), NodeId::ZERO, NodeId::new(2))); // @4
        nodes
    }

    #[test]
    fn test_find_and_insert() {
        let mut nodes = make_test_nodes();
        let mut st = Subtable::new(Level::new(1));

        assert!(st.is_empty());
        assert!(st.find(NodeId::ZERO, NodeId::ONE, &nodes).is_none());

        st.insert(NodeId::ZERO, NodeId::ONE, NodeId::new(2), &mut nodes);
        assert_eq!(st.find(NodeId::ZERO, NodeId::ONE, &nodes), Some(NodeId::new(2)));
        assert_eq!(st.len(), 1);
        assert!(!st.is_empty());
    }

    #[test]
    fn test_collision_chain() {
        // Force collisions with a single bucket.
        let mut nodes = make_test_nodes();
        let mut st = Subtable::with_bucket_bits(Level::new(1), 0);
        assert_eq!(st.num_buckets(), 1);

        st.insert(NodeId::ZERO, NodeId::ONE, NodeId::new(2), &mut nodes);
        st.insert(NodeId::ONE, NodeId::ZERO, NodeId::new(3), &mut nodes);
        st.insert(NodeId::ZERO, NodeId::new(2), NodeId::new(4), &mut nodes);

        assert_eq!(st.len(), 3);

        // All findable despite sharing one chain.
        assert_eq!(st.find(NodeId::ZERO, NodeId::ONE, &nodes), Some(NodeId::new(2)));
        assert_eq!(st.find(NodeId::ONE, NodeId::ZERO, &nodes), Some(NodeId::new(3)));
        assert_eq!(st.find(NodeId::ZERO, NodeId::new(2), &nodes), Some(NodeId::new(4)));
        assert!(st.find(NodeId::ONE, NodeId::ONE, &nodes).is_none());
    }
}
