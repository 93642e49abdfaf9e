//! Memoization cache for apply.
//!
//! Each top-level apply call owns one [`OpCache`]; keys reference node
//! handles, which stay valid for the store's lifetime, so a cache may be
//! retained across calls against the same store --- but never across stores.

use std::cell::Cell;
use std::collections::HashMap;

use crate::apply::Op;
use crate::types::NodeId;

/// Cache key for a binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub op: Op,
    pub f: NodeId,
    pub g: NodeId,
}

impl CacheKey {
    /// Builds the key for `op(f, g)`, normalizing operand order for
    /// commutative operators so that `op(f, g)` and `op(g, f)` share an
    /// entry.
    pub fn new(op: Op, f: NodeId, g: NodeId) -> Self {
        if op.is_commutative() && f.raw() > g.raw() {
            Self { op, f: g, g: f }
        } else {
            Self { op, f, g }
        }
    }
}

/// Operation cache with hit/miss counters.
#[derive(Debug, Default)]
pub struct OpCache {
    map: HashMap<CacheKey, NodeId>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl OpCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a cached result.
    pub fn get(&self, op: Op, f: NodeId, g: NodeId) -> Option<NodeId> {
        match self.map.get(&CacheKey::new(op, f, g)) {
            Some(&result) => {
                self.hits.set(self.hits.get() + 1);
                Some(result)
            }
            None => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    /// Records a result.
    pub fn insert(&mut self, op: Op, f: NodeId, g: NodeId, result: NodeId) {
        self.map.insert(CacheKey::new(op, f, g), result);
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    /// Number of lookups that missed.
    pub fn misses(&self) -> usize {
        self.misses.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commutative_normalization() {
        let k1 = CacheKey::new(Op::And, NodeId::new(5), NodeId::new(3));
        let k2 = CacheKey::new(Op::And, NodeId::new(3), NodeId::new(5));
        assert_eq!(k1, k2);

        // Implies is not commutative; orientation matters.
        let k3 = CacheKey::new(Op::Implies, NodeId::new(5), NodeId::new(3));
        let k4 = CacheKey::new(Op::Implies, NodeId::new(3), NodeId::new(5));
        assert_ne!(k3, k4);
    }

    #[test]
    fn test_hits_and_misses() {
        let mut cache = OpCache::new();
        assert!(cache.is_empty());
        assert!(cache.get(Op::And, NodeId::new(2), NodeId::new(3)).is_none());
        assert_eq!(cache.misses(), 1);

        cache.insert(Op::And, NodeId::new(2), NodeId::new(3), NodeId::ONE);
        assert!(!cache.is_empty());
        assert_eq!(cache.get(Op::And, NodeId::new(3), NodeId::new(2)), Some(NodeId::ONE));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.len(), 1);
    }
}
