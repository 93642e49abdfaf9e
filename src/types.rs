use std::fmt;

/// A node identifier (index into the store's node arena).
///
/// `NodeId` is a type-safe wrapper around `u32` that identifies a node
/// within a single [`NodeStore`][crate::store::NodeStore]. Handles compare
/// by identity: two nodes are "the same node" iff their `NodeId`s are equal.
///
/// # Invariants
///
/// - `NodeId(0)` is the ZERO terminal (⊥)
/// - `NodeId(1)` is the ONE terminal (⊤)
/// - Decision nodes start at index 2
///
/// Handles are only meaningful against the store that produced them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// The ZERO terminal (⊥): the constant-false function.
    pub const ZERO: NodeId = NodeId(0);

    /// The ONE terminal (⊤): the constant-true function.
    pub const ONE: NodeId = NodeId(1);

    /// Sentinel for invalid/uninitialized references.
    pub const INVALID: NodeId = NodeId(0xFFFF_FFFF);

    /// Creates a NodeId from a raw index.
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    /// Returns the raw value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the index as a `usize` for arena access.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if this is a terminal (ZERO or ONE).
    pub const fn is_terminal(self) -> bool {
        self.0 <= 1
    }

    /// Returns true if this is the ZERO terminal.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this is the ONE terminal.
    pub const fn is_one(self) -> bool {
        self.0 == 1
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "⊥"),
            1 => write!(f, "⊤"),
            _ => write!(f, "@{}", self.0),
        }
    }
}

impl From<u32> for NodeId {
    fn from(index: u32) -> Self {
        NodeId::new(index)
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// A position in the variable order (0 = outermost decision variable).
///
/// Decision nodes are labeled with levels rather than variable names: the
/// [`VarOrder`][crate::order::VarOrder] owns the name <-> level mapping, and
/// names never enter the node store. Within a single order, "earlier in the
/// order" is simply `<` on levels.
///
/// # Invariants
///
/// - Level 0 is the topmost level (closest to the root)
/// - Levels increase downward toward the terminals
/// - [`Level::TERMINAL`] is a sentinel carried by the two terminal records,
///   ordered after every real level
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Level(u32);

impl Level {
    /// Sentinel level carried by terminal records. Compares greater than
    /// every decision level, so ordering checks need no special casing.
    pub const TERMINAL: Level = Level(u32::MAX);

    /// Creates a new level.
    pub const fn new(index: u32) -> Self {
        debug_assert!(index != u32::MAX, "Level index is reserved for terminals");
        Level(index)
    }

    /// Returns the raw level value.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the level as `usize` for indexing.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if this is the terminal sentinel.
    pub const fn is_terminal(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_terminal() {
            write!(f, "L∞")
        } else {
            write!(f, "L{}", self.0)
        }
    }
}

impl From<usize> for Level {
    fn from(index: usize) -> Self {
        Level::new(index as u32)
    }
}
