//! The node store: arena, unique table, and interned terminals.
//!
//! All nodes of all BDDs built against one store live here. The store
//! guarantees, by construction:
//!
//! 1. **Terminals unique** — exactly one ⊥ and one ⊤ record, at arena
//!    indices 0 and 1.
//! 2. **Non-redundant** — [`make`] and [`fresh`] both refuse to allocate a
//!    node with `lo == hi` and return the child instead.
//! 3. **Uniqueness** — [`make`] hash-conses `(level, lo, hi)` triples through
//!    per-level subtables, so no two canonical nodes share a triple.
//!
//! The variable-ordering invariant (children strictly deeper than their
//! parent) is the caller's responsibility; both constructors debug-assert it.
//!
//! [`fresh`] is the deliberate escape hatch for the Builder: it applies the
//! redundancy rule but skips the unique table, producing the "quasi-reduced"
//! decision structure that the Reducer later folds into canonical form.
//!
//! Nodes are never reclaimed; a store is discarded whole.
//!
//! [`make`]: NodeStore::make
//! [`fresh`]: NodeStore::fresh

use std::cell::RefCell;

use log::debug;

use crate::node::Node;
use crate::subtable::{Subtable, DEFAULT_BUCKET_BITS};
use crate::types::{Level, NodeId};

/// A tagged view of one node, for inspection.
///
/// External tooling (visualizers, debug dumps) walks the graph through this;
/// unlike the raw [`Node`] record it cannot misread a terminal's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeView {
    /// One of the two interned terminals.
    Terminal(bool),
    /// A decision node splitting on the variable at `level`.
    Decision { level: Level, lo: NodeId, hi: NodeId },
}

pub struct NodeStore {
    /// Node arena. Index 0 = ⊥, index 1 = ⊤, decision nodes from 2.
    nodes: RefCell<Vec<Node>>,

    /// Per-level unique-table subtables, grown on demand.
    subtables: RefCell<Vec<Subtable>>,

    /// Bucket bits for newly created subtables.
    bucket_bits: usize,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Creates a new store holding only the two terminals.
    pub fn new() -> Self {
        Self::with_bucket_bits(DEFAULT_BUCKET_BITS)
    }

    /// Creates a store whose subtables use `2^bits` buckets per level.
    pub fn with_bucket_bits(bits: usize) -> Self {
        // The two terminal slots; their identity is their index.
        let nodes = vec![Node::default(), Node::default()];
        Self {
            nodes: RefCell::new(nodes),
            subtables: RefCell::new(Vec::new()),
            bucket_bits: bits,
        }
    }

    // ========================================================================
    // Terminals
    // ========================================================================

    /// Returns the interned terminal for the given value.
    #[inline]
    pub fn terminal(&self, value: bool) -> NodeId {
        if value {
            NodeId::ONE
        } else {
            NodeId::ZERO
        }
    }

    /// Returns the ⊥ terminal.
    #[inline]
    pub fn zero(&self) -> NodeId {
        NodeId::ZERO
    }

    /// Returns the ⊤ terminal.
    #[inline]
    pub fn one(&self) -> NodeId {
        NodeId::ONE
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Returns a copy of the node record for `id`.
    ///
    /// Terminal records carry [`Level::TERMINAL`] and invalid children;
    /// distinguish them by `id`, not by content. This is the inspection
    /// surface external tooling (e.g. a visualizer) walks the graph through.
    pub fn node(&self, id: NodeId) -> Node {
        self.nodes.borrow()[id.index()]
    }

    /// Returns the tagged view of a node.
    pub fn view(&self, id: NodeId) -> NodeView {
        if id.is_terminal() {
            NodeView::Terminal(id.is_one())
        } else {
            let node = self.nodes.borrow()[id.index()];
            NodeView::Decision {
                level: node.level,
                lo: node.lo,
                hi: node.hi,
            }
        }
    }

    /// Level of the node. Terminals report [`Level::TERMINAL`], which orders
    /// after every decision level.
    #[inline]
    pub fn level(&self, id: NodeId) -> Level {
        self.nodes.borrow()[id.index()].level
    }

    /// Low child of a decision node.
    #[inline]
    pub fn lo(&self, id: NodeId) -> NodeId {
        debug_assert!(!id.is_terminal(), "terminals have no children");
        self.nodes.borrow()[id.index()].lo
    }

    /// High child of a decision node.
    #[inline]
    pub fn hi(&self, id: NodeId) -> NodeId {
        debug_assert!(!id.is_terminal(), "terminals have no children");
        self.nodes.borrow()[id.index()].hi
    }

    /// Total number of nodes ever allocated, terminals included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.borrow().len()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    fn ensure_level(&self, level: Level) {
        let mut subtables = self.subtables.borrow_mut();
        while subtables.len() <= level.index() {
            let l = Level::new(subtables.len() as u32);
            subtables.push(Subtable::with_bucket_bits(l, self.bucket_bits));
        }
    }

    /// The canonical node constructor: redundancy rule plus hash-consing.
    ///
    /// - If `lo == hi`, returns `lo` without allocating.
    /// - Otherwise looks up `(level, lo, hi)` in the unique table; on a hit
    ///   the existing handle is returned, on a miss a node is allocated and
    ///   indexed.
    ///
    /// Exclusive use of `make` keeps the produced graph canonical.
    pub fn make(&self, level: Level, lo: NodeId, hi: NodeId) -> NodeId {
        assert!(!level.is_terminal(), "make needs a decision level");
        debug_assert!(
            self.level(lo) > level && self.level(hi) > level,
            "children must be strictly later in the order"
        );

        if lo == hi {
            debug!("make({}, {}, {}): redundant, reusing {}", level, lo, hi, lo);
            return lo;
        }

        self.ensure_level(level);

        {
            let subtables = self.subtables.borrow();
            let nodes = self.nodes.borrow();
            if let Some(id) = subtables[level.index()].find(lo, hi, &nodes) {
                debug!("make({}, {}, {}): found {}", level, lo, hi, id);
                return id;
            }
        }

        let id = self.push(Node::new(level, lo, hi));
        {
            let mut subtables = self.subtables.borrow_mut();
            let mut nodes = self.nodes.borrow_mut();
            subtables[level.index()].insert(lo, hi, id, &mut nodes);
        }
        debug!("make({}, {}, {}): created {}", level, lo, hi, id);
        id
    }

    /// The Builder's constructor: redundancy rule only, always allocates.
    ///
    /// The resulting node is *not* entered into the unique table, so two
    /// `fresh` calls with the same arguments yield distinct handles. The
    /// Reducer merges such duplicates and re-roots through [`make`].
    pub fn fresh(&self, level: Level, lo: NodeId, hi: NodeId) -> NodeId {
        assert!(!level.is_terminal(), "fresh needs a decision level");
        debug_assert!(
            self.level(lo) > level && self.level(hi) > level,
            "children must be strictly later in the order"
        );

        if lo == hi {
            return lo;
        }

        let id = self.push(Node::new(level, lo, hi));
        debug!("fresh({}, {}, {}): created {}", level, lo, hi, id);
        id
    }

    fn push(&self, node: Node) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        assert!(nodes.len() < NodeId::INVALID.index(), "node store is full");
        let id = NodeId::new(nodes.len() as u32);
        nodes.push(node);
        id
    }
}

impl std::fmt::Debug for NodeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeStore")
            .field("nodes", &self.num_nodes())
            .field("levels", &self.subtables.borrow().len())
            .field("bucket_bits", &self.bucket_bits)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminals_interned() {
        let store = NodeStore::new();
        assert_eq!(store.terminal(false), NodeId::ZERO);
        assert_eq!(store.terminal(true), NodeId::ONE);
        assert_eq!(store.zero(), NodeId::ZERO);
        assert_eq!(store.one(), NodeId::ONE);
        assert_eq!(store.num_nodes(), 2);
        assert!(store.node(NodeId::ZERO).is_terminal());
        assert!(store.node(NodeId::ONE).is_terminal());
    }

    #[test]
    fn test_make_redundancy_rule() {
        let store = NodeStore::new();
        let n = store.make(Level::new(0), NodeId::ONE, NodeId::ONE);
        assert_eq!(n, NodeId::ONE);
        assert_eq!(store.num_nodes(), 2); // nothing allocated
    }

    #[test]
    fn test_make_hash_consing() {
        let store = NodeStore::new();
        let a = store.make(Level::new(0), NodeId::ZERO, NodeId::ONE);
        let b = store.make(Level::new(0), NodeId::ZERO, NodeId::ONE);
        let c = store.make(Level::new(0), NodeId::ONE, NodeId::ZERO);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(store.num_nodes(), 4);
    }

    #[test]
    fn test_make_distinguishes_levels() {
        let store = NodeStore::new();
        let a = store.make(Level::new(0), NodeId::ZERO, NodeId::ONE);
        let b = store.make(Level::new(1), NodeId::ZERO, NodeId::ONE);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fresh_always_allocates() {
        let store = NodeStore::new();
        let a = store.fresh(Level::new(0), NodeId::ZERO, NodeId::ONE);
        let b = store.fresh(Level::new(0), NodeId::ZERO, NodeId::ONE);
        assert_ne!(a, b);

        // But the redundancy rule still applies.
        let c = store.fresh(Level::new(0), NodeId::ONE, NodeId::ONE);
        assert_eq!(c, NodeId::ONE);
    }

    #[test]
    fn test_fresh_invisible_to_make() {
        let store = NodeStore::new();
        let f = store.fresh(Level::new(0), NodeId::ZERO, NodeId::ONE);
        let m = store.make(Level::new(0), NodeId::ZERO, NodeId::ONE);
        // fresh nodes are not in the unique table, so make allocates its own.
        assert_ne!(f, m);
        // ...and a second make finds the canonical one.
        assert_eq!(store.make(Level::new(0), NodeId::ZERO, NodeId::ONE), m);
    }

    #[test]
    fn test_tagged_view() {
        let store = NodeStore::new();
        let n = store.make(Level::new(0), NodeId::ZERO, NodeId::ONE);

        assert_eq!(store.view(NodeId::ZERO), NodeView::Terminal(false));
        assert_eq!(store.view(NodeId::ONE), NodeView::Terminal(true));
        assert_eq!(
            store.view(n),
            NodeView::Decision {
                level: Level::new(0),
                lo: NodeId::ZERO,
                hi: NodeId::ONE,
            }
        );
    }

    #[test]
    fn test_node_view() {
        let store = NodeStore::new();
        let inner = store.make(Level::new(1), NodeId::ZERO, NodeId::ONE);
        let root = store.make(Level::new(0), inner, NodeId::ONE);

        let node = store.node(root);
        assert_eq!(node.level, Level::new(0));
        assert_eq!(node.lo, inner);
        assert_eq!(node.hi, NodeId::ONE);
        assert_eq!(store.lo(root), inner);
        assert_eq!(store.hi(root), NodeId::ONE);
        assert_eq!(store.level(NodeId::ZERO), Level::TERMINAL);
    }
}
