//! The variable order: a total order on variable names.
//!
//! Every BDD is built against one [`VarOrder`] and keeps it for life. The
//! order owns the name <-> level mapping; inside the node store, variables
//! appear only as [`Level`]s. Two BDDs may interact through apply or
//! equivalence checks only when their orders are equal.

use std::collections::HashMap;
use std::fmt;

use crate::types::Level;

/// A total order on variable names, immutable after construction.
#[derive(Debug, Clone)]
pub struct VarOrder {
    /// Names by level: `names[l]` is the variable at level `l`.
    names: Vec<String>,
    /// Levels by name.
    index: HashMap<String, Level>,
}

impl VarOrder {
    /// Creates an order from names in sequence.
    ///
    /// # Panics
    ///
    /// Panics if a name appears twice.
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            let prev = index.insert(name.clone(), Level::new(i as u32));
            assert!(prev.is_none(), "duplicate variable {:?} in order", name);
        }
        Self { names, index }
    }

    /// Number of variables in the order.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the order contains no variables.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Level of a variable, or `None` if the name is not in the order.
    pub fn index(&self, name: &str) -> Option<Level> {
        self.index.get(name).copied()
    }

    /// Returns true if the order contains the variable.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Name of the variable at a level.
    ///
    /// # Panics
    ///
    /// Panics if `level` is out of range or the terminal sentinel.
    pub fn name(&self, level: Level) -> &str {
        &self.names[level.index()]
    }

    /// Of two variables, the one earlier in the order.
    ///
    /// # Panics
    ///
    /// Panics if either name is not in the order.
    pub fn earliest<'a>(&self, v1: &'a str, v2: &'a str) -> &'a str {
        let l1 = self.index(v1).unwrap_or_else(|| panic!("unknown variable {:?}", v1));
        let l2 = self.index(v2).unwrap_or_else(|| panic!("unknown variable {:?}", v2));
        if l1 <= l2 {
            v1
        } else {
            v2
        }
    }

    /// Iterates names from level 0 downward.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl PartialEq for VarOrder {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for VarOrder {}

impl fmt::Display for VarOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", name)?;
        }
        write!(f, "]")
    }
}

impl<S: Into<String>> FromIterator<S> for VarOrder {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        VarOrder::new(iter)
    }
}
