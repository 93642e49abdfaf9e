//! The [`Bdd`] value: a root handle plus shared store and variable order.
//!
//! A `Bdd` is cheap to clone --- the node store and the order are shared
//! through `Rc`, and all BDDs produced from one another (by the Builder,
//! apply, or reduction) stay in the same store. Handle equality within a
//! store is function equality once both sides are reduced; that is the
//! canonicity this whole crate exists for.
//!
//! Construction goes through [`Bdd::build`] (fresh store) or
//! [`Bdd::build_in`] (caller-chosen store, required when the result is meant
//! to interact with other BDDs). The Builder performs the full Shannon
//! decomposition over the variable order, evaluating the formula at each
//! complete assignment --- exponential in the variable count by nature, so
//! large functions should be assembled from small built BDDs via apply
//! instead.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::error::{Error, Result};
use crate::formula::{Formula, Interpretation};
use crate::order::VarOrder;
use crate::store::NodeStore;
use crate::types::{Level, NodeId};

/// A binary decision diagram over a fixed variable order.
///
/// Freshly built BDDs are *quasi-reduced*: terminals are interned and no node
/// has equal children, but isomorphic subgraphs may still be duplicated.
/// [`reduce`][crate::reduce] restores full canonical form.
#[derive(Clone)]
pub struct Bdd {
    pub(crate) root: NodeId,
    pub(crate) store: Rc<NodeStore>,
    pub(crate) order: Rc<VarOrder>,
}

impl Bdd {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Builds a BDD for `formula` in a fresh store.
    ///
    /// When `order` is `None`, the formula's free variables in source order
    /// become the order.
    pub fn build(formula: &Formula, order: Option<VarOrder>) -> Result<Bdd> {
        let order = order.unwrap_or_else(|| VarOrder::new(formula.free_vars()));
        Self::build_in(&Rc::new(NodeStore::new()), Rc::new(order), formula)
    }

    /// Builds a BDD for `formula` in an existing store.
    ///
    /// Every free variable of the formula must appear in `order`
    /// ([`Error::UnknownVariable`] otherwise); the order may contain more.
    pub fn build_in(store: &Rc<NodeStore>, order: Rc<VarOrder>, formula: &Formula) -> Result<Bdd> {
        for name in formula.free_vars() {
            if !order.contains(&name) {
                return Err(Error::UnknownVariable { name });
            }
        }

        let mut assignment = vec![false; order.len()];
        let root = build_rec(store, &order, formula, 0, &mut assignment)?;
        debug!(
            "build: {} over {} -> root {} ({} nodes in store)",
            formula,
            order,
            root,
            store.num_nodes()
        );

        Ok(Bdd {
            root,
            store: Rc::clone(store),
            order,
        })
    }

    /// The BDD for a single variable: one canonical decision node over the
    /// interned terminals.
    ///
    /// Unlike [`build_in`][Bdd::build_in], this costs one `make` call no
    /// matter how long the order is --- the intended seed for assembling
    /// large functions through apply.
    pub fn var_in(store: &Rc<NodeStore>, order: Rc<VarOrder>, name: &str) -> Result<Bdd> {
        let level = order
            .index(name)
            .ok_or_else(|| Error::UnknownVariable { name: name.to_string() })?;
        let root = store.make(level, NodeId::ZERO, NodeId::ONE);
        Ok(Bdd {
            root,
            store: Rc::clone(store),
            order,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The root handle.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The shared node store.
    pub fn store(&self) -> &Rc<NodeStore> {
        &self.store
    }

    /// The variable order this BDD was built against.
    pub fn order(&self) -> &Rc<VarOrder> {
        &self.order
    }

    /// Checks that `other` lives in the same store under the same order.
    pub(crate) fn check_compatible(&self, other: &Bdd) -> Result<()> {
        if !Rc::ptr_eq(&self.store, &other.store) {
            return Err(Error::StoreMismatch);
        }
        if !Rc::ptr_eq(&self.order, &other.order) && *self.order != *other.order {
            return Err(Error::OrderMismatch);
        }
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Evaluates the BDD under an interpretation by descending from the root.
    ///
    /// Takes the high edge where the interpretation maps the node's variable
    /// to true, the low edge otherwise. O(number of variables).
    pub fn evaluate(&self, interpretation: &Interpretation) -> Result<bool> {
        let mut current = self.root;
        while !current.is_terminal() {
            let node = self.store.node(current);
            let name = self.order.name(node.level);
            let value = interpretation
                .get(name)
                .ok_or_else(|| Error::UndefinedVariable { name: name.to_string() })?;
            current = if value { node.hi } else { node.lo };
        }
        Ok(current.is_one())
    }

    /// Returns true if some interpretation satisfies the function.
    ///
    /// Implemented as a search for a ⊤-reaching path, which is correct before
    /// and after reduction. For a reduced BDD this is just `root ≠ ⊥`.
    pub fn is_satisfiable(&self) -> bool {
        self.has_path_to(true)
    }

    /// Returns true if the function is a tautology.
    ///
    /// Correct before and after reduction; for a reduced BDD this is just
    /// `root = ⊤`.
    pub fn is_valid(&self) -> bool {
        !self.has_path_to(false)
    }

    fn has_path_to(&self, target: bool) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if id.is_terminal() {
                if id.is_one() == target {
                    return true;
                }
                continue;
            }
            if !visited.insert(id) {
                continue;
            }
            let node = self.store.node(id);
            stack.push(node.hi);
            stack.push(node.lo);
        }
        false
    }

    /// Returns true if this BDD encodes the same function as `other`.
    ///
    /// Requires a shared store and equal orders. When both sides are reduced
    /// this is root identity; otherwise the check builds their biconditional
    /// and tests validity.
    pub fn equivalent(&self, other: &Bdd) -> Result<bool> {
        self.check_compatible(other)?;
        if self.is_reduced() && other.is_reduced() {
            return Ok(self.root == other.root);
        }
        Ok(self.apply(crate::apply::Op::Iff, other)?.is_valid())
    }

    /// Number of nodes reachable from the root, terminals included.
    pub fn count_nodes(&self) -> usize {
        let mut visited = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            if !id.is_terminal() {
                let node = self.store.node(id);
                stack.push(node.hi);
                stack.push(node.lo);
            }
        }
        visited.len()
    }

    /// Compact textual rendering: `(var, high-subgraph, low-subgraph)`.
    pub fn to_bracket_string(&self) -> String {
        self.bracket(self.root)
    }

    fn bracket(&self, id: NodeId) -> String {
        if id.is_zero() {
            return "⊥".to_string();
        }
        if id.is_one() {
            return "⊤".to_string();
        }
        let node = self.store.node(id);
        format!(
            "({}, {}, {})",
            self.order.name(node.level),
            self.bracket(node.hi),
            self.bracket(node.lo)
        )
    }
}

impl fmt::Debug for Bdd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bdd")
            .field("root", &self.root)
            .field("nodes", &self.count_nodes())
            .field("order", &format_args!("{}", self.order))
            .finish()
    }
}

fn build_rec(
    store: &NodeStore,
    order: &VarOrder,
    formula: &Formula,
    depth: usize,
    assignment: &mut [bool],
) -> Result<NodeId> {
    if depth == order.len() {
        let value = eval_under(formula, order, assignment)?;
        return Ok(store.terminal(value));
    }

    assignment[depth] = false;
    let lo = build_rec(store, order, formula, depth + 1, assignment)?;
    assignment[depth] = true;
    let hi = build_rec(store, order, formula, depth + 1, assignment)?;

    // fresh, not make: duplicated subgraphs are the Reducer's job.
    Ok(store.fresh(Level::new(depth as u32), lo, hi))
}

/// Formula evaluation against a complete level-indexed assignment, sparing
/// the per-leaf interpretation maps the naive formulation would allocate.
fn eval_under(formula: &Formula, order: &VarOrder, assignment: &[bool]) -> Result<bool> {
    match formula {
        Formula::Const(value) => Ok(*value),
        Formula::Var(name) => {
            let level = order
                .index(name)
                .ok_or_else(|| Error::UnknownVariable { name: name.clone() })?;
            Ok(assignment[level.index()])
        }
        Formula::Not(f) => Ok(!eval_under(f, order, assignment)?),
        Formula::And(lhs, rhs) => {
            Ok(eval_under(lhs, order, assignment)? && eval_under(rhs, order, assignment)?)
        }
        Formula::Or(lhs, rhs) => {
            Ok(eval_under(lhs, order, assignment)? || eval_under(rhs, order, assignment)?)
        }
        Formula::Implies(lhs, rhs) => {
            Ok(!eval_under(lhs, order, assignment)? || eval_under(rhs, order, assignment)?)
        }
        Formula::Iff(lhs, rhs) => {
            Ok(eval_under(lhs, order, assignment)? == eval_under(rhs, order, assignment)?)
        }
    }
}
