use crate::types::{Level, NodeId};

/// A BDD node: one decision point in the diagram.
///
/// # Fields
///
/// - `level`: position of the decision variable in the order
/// - `lo`: low child (followed when the variable is false)
/// - `hi`: high child (followed when the variable is true)
/// - `next`: next node in the hash collision chain (intrusive linked list)
///
/// # Structure
///
/// Each node represents a Shannon decomposition:
/// ```text
/// f = (¬v ∧ f_lo) ∨ (v ∧ f_hi)
/// ```
///
/// Canonical nodes are indexed by per-level subtables; the `next` field
/// implements collision chaining for those tables, following CUDD's
/// intrusive design. Unshared nodes (produced by the Builder before
/// reduction) never enter a chain and keep `next == NodeId::ZERO`.
///
/// The two terminal records live at arena indices 0 and 1 and are plain
/// [`Node::default()`] values: their identity is their index, not their
/// content.
#[derive(Debug, Copy, Clone)]
pub struct Node {
    pub level: Level,
    pub lo: NodeId,
    pub hi: NodeId,
    /// Next node in the collision chain. [`NO_NEXT`][Node::NO_NEXT] means end of chain.
    pub next: NodeId,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            level: Level::TERMINAL,
            lo: NodeId::INVALID,
            hi: NodeId::INVALID,
            next: Self::NO_NEXT,
        }
    }
}

impl Node {
    /// End-of-chain sentinel. Terminals never participate in chains, so the
    /// ZERO index is free to mean "no next node".
    pub const NO_NEXT: NodeId = NodeId::ZERO;

    /// Creates a new decision node with the given level and children.
    pub fn new(level: Level, lo: NodeId, hi: NodeId) -> Self {
        debug_assert!(!level.is_terminal(), "decision nodes need a real level");
        Self {
            level,
            lo,
            hi,
            next: Self::NO_NEXT,
        }
    }

    /// Returns true if this record is one of the two terminal slots.
    pub fn is_terminal(&self) -> bool {
        self.level.is_terminal()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        // The chain pointer is bookkeeping, not identity.
        self.level == other.level && self.lo == other.lo && self.hi == other.hi
    }
}

impl Eq for Node {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = Node::new(Level::new(0), NodeId::ZERO, NodeId::ONE);
        assert_eq!(node.level, Level::new(0));
        assert_eq!(node.lo, NodeId::ZERO);
        assert_eq!(node.hi, NodeId::ONE);
        assert_eq!(node.next, Node::NO_NEXT);
        assert!(!node.is_terminal());
    }

    #[test]
    fn test_node_equality_ignores_chain() {
        let mut n1 = Node::new(Level::new(1), NodeId::ZERO, NodeId::ONE);
        let n2 = Node::new(Level::new(1), NodeId::ZERO, NodeId::ONE);
        let n3 = Node::new(Level::new(2), NodeId::ZERO, NodeId::ONE);

        n1.next = NodeId::new(7);
        assert_eq!(n1, n2);
        assert_ne!(n1, n3);
    }

    #[test]
    fn test_terminal_record() {
        let t = Node::default();
        assert!(t.is_terminal());
        assert_eq!(t.next, Node::NO_NEXT);
    }
}
