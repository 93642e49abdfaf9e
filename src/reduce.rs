//! Reduction to canonical form: Bryant's bottom-up merging pass.
//!
//! The pass walks the reachable graph once to group decision nodes by level,
//! then sweeps the levels bottom-up. Within each level, a node whose children
//! collapsed to the same representative is redundant and takes its child's
//! place; otherwise a per-level table keyed by the children's representatives
//! detects isomorphic nodes and merges them. Survivors are rebuilt through
//! the store's canonical constructor, whose unique table guarantees
//! cross-level uniqueness as well --- so a node's "label" in the classical
//! algorithm is simply its canonical handle here.
//!
//! The pass preserves the encoded function: every redirection replaces a node
//! with a functionally equal representative. Afterwards all four structural
//! invariants hold and the BDD is canonical for its variable order.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use log::debug;

use crate::bdd::Bdd;
use crate::types::NodeId;

/// What a reduction pass did.
///
/// A pass over an already-canonical BDD reports zero removals and merges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReduceStats {
    /// Redundant nodes eliminated (`lo == hi` after canonicalizing children).
    pub nodes_removed: usize,
    /// Isomorphic nodes merged into a previously seen representative.
    pub nodes_merged: usize,
    /// Reachable node count before the pass.
    pub nodes_before: usize,
    /// Reachable node count after the pass.
    pub nodes_after: usize,
}

impl Bdd {
    /// Reduces this BDD in place (the root is redirected to its canonical
    /// representative) and reports statistics.
    pub fn reduce(&mut self) -> ReduceStats {
        let nodes_before = self.count_nodes();

        if self.root.is_terminal() {
            return ReduceStats {
                nodes_before,
                nodes_after: nodes_before,
                ..ReduceStats::default()
            };
        }

        // Collect reachable decision nodes, grouped by level.
        let mut by_level: Vec<Vec<NodeId>> = vec![Vec::new(); self.order.len()];
        {
            let mut visited = HashSet::new();
            let mut stack = vec![self.root];
            while let Some(id) = stack.pop() {
                if id.is_terminal() || !visited.insert(id) {
                    continue;
                }
                let node = self.store.node(id);
                by_level[node.level.index()].push(id);
                stack.push(node.lo);
                stack.push(node.hi);
            }
        }

        // Canonical representative of every processed node. Terminals are
        // their own representatives (the interned handles).
        let mut canonical: HashMap<NodeId, NodeId> = HashMap::new();
        canonical.insert(NodeId::ZERO, NodeId::ZERO);
        canonical.insert(NodeId::ONE, NodeId::ONE);

        let mut nodes_removed = 0;
        let mut nodes_merged = 0;

        // Deepest level first: children are always canonicalized before
        // their parents.
        for level_nodes in by_level.iter().rev() {
            let mut seen: HashMap<(NodeId, NodeId), NodeId> = HashMap::new();

            for &id in level_nodes {
                let node = self.store.node(id);
                let lo = canonical[&node.lo];
                let hi = canonical[&node.hi];

                if lo == hi {
                    // Redundant: both edges reach the same representative.
                    nodes_removed += 1;
                    canonical.insert(id, lo);
                    continue;
                }

                match seen.entry((lo, hi)) {
                    Entry::Occupied(entry) => {
                        nodes_merged += 1;
                        canonical.insert(id, *entry.get());
                    }
                    Entry::Vacant(entry) => {
                        let representative = self.store.make(node.level, lo, hi);
                        entry.insert(representative);
                        canonical.insert(id, representative);
                    }
                }
            }
        }

        self.root = canonical[&self.root];
        let nodes_after = self.count_nodes();
        debug!(
            "reduce: {} -> {} nodes ({} removed, {} merged)",
            nodes_before, nodes_after, nodes_removed, nodes_merged
        );

        ReduceStats {
            nodes_removed,
            nodes_merged,
            nodes_before,
            nodes_after,
        }
    }

    /// Checks the structural invariants of reduced form over the reachable
    /// subgraph: no redundant node, no duplicated `(level, lo, hi)` triple,
    /// children strictly deeper than their parent.
    pub fn is_reduced(&self) -> bool {
        let mut visited = HashSet::new();
        let mut signatures = HashSet::new();
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            if id.is_terminal() || !visited.insert(id) {
                continue;
            }
            let node = self.store.node(id);

            if node.lo == node.hi {
                return false;
            }
            if self.store.level(node.lo) <= node.level || self.store.level(node.hi) <= node.level {
                return false;
            }
            if !signatures.insert((node.level, node.lo, node.hi)) {
                return false;
            }

            stack.push(node.lo);
            stack.push(node.hi);
        }

        true
    }
}
