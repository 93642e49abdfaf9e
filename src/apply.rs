//! The apply algorithm: binary operations on BDDs via Shannon expansion.
//!
//! `apply(⊕, f, g)` splits both operands on the earliest variable of either
//! root, recurses on the cofactor pairs, and recombines through the store's
//! canonical constructor, so the result is reduced whenever the inputs are.
//! A memo table keyed by `(⊕, f, g)` ensures each node pair is processed at
//! most once, giving the O(|f|·|g|) bound.
//!
//! Both operands must share a store and a variable order; violating either
//! precondition is an error, not a fallback.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::bdd::Bdd;
use crate::cache::OpCache;
use crate::error::Result;
use crate::store::NodeStore;
use crate::types::{Level, NodeId};

/// A binary Boolean operator, dispatched by tag on terminal pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    And,
    Or,
    Xor,
    Implies,
    Iff,
    Nand,
    Nor,
}

impl Op {
    /// All supported operators, for exhaustive tests.
    pub const ALL: [Op; 7] = [Op::And, Op::Or, Op::Xor, Op::Implies, Op::Iff, Op::Nand, Op::Nor];

    /// The operator's truth table.
    pub fn eval(self, a: bool, b: bool) -> bool {
        match self {
            Op::And => a && b,
            Op::Or => a || b,
            Op::Xor => a != b,
            Op::Implies => !a || b,
            Op::Iff => a == b,
            Op::Nand => !(a && b),
            Op::Nor => !(a || b),
        }
    }

    /// Whether `op(a, b) = op(b, a)`; the cache normalizes operand order for
    /// these.
    pub fn is_commutative(self) -> bool {
        !matches!(self, Op::Implies)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Op::And => "AND",
            Op::Or => "OR",
            Op::Xor => "XOR",
            Op::Implies => "IMPLIES",
            Op::Iff => "IFF",
            Op::Nand => "NAND",
            Op::Nor => "NOR",
        };
        write!(f, "{}", s)
    }
}

impl Bdd {
    /// Combines two BDDs under a binary operator.
    ///
    /// Errors with [`StoreMismatch`][crate::error::Error::StoreMismatch] or
    /// [`OrderMismatch`][crate::error::Error::OrderMismatch] when the
    /// operands do not share a store or an order.
    pub fn apply(&self, op: Op, other: &Bdd) -> Result<Bdd> {
        self.check_compatible(other)?;

        let mut cache = OpCache::new();
        let root = apply_rec(&self.store, &mut cache, op, self.root, other.root);
        debug!(
            "apply({}, {}, {}) -> {} ({} hits / {} misses)",
            op,
            self.root,
            other.root,
            root,
            cache.hits(),
            cache.misses()
        );

        Ok(Bdd {
            root,
            store: Rc::clone(&self.store),
            order: Rc::clone(&self.order),
        })
    }

    /// Negation, by flipping terminals in a memoized traversal.
    ///
    /// Never fails: the result lives in the same store under the same order.
    pub fn not(&self) -> Bdd {
        let mut memo = HashMap::new();
        let root = negate_rec(&self.store, &mut memo, self.root);
        Bdd {
            root,
            store: Rc::clone(&self.store),
            order: Rc::clone(&self.order),
        }
    }

    pub fn and(&self, other: &Bdd) -> Result<Bdd> {
        self.apply(Op::And, other)
    }

    pub fn or(&self, other: &Bdd) -> Result<Bdd> {
        self.apply(Op::Or, other)
    }

    pub fn xor(&self, other: &Bdd) -> Result<Bdd> {
        self.apply(Op::Xor, other)
    }

    pub fn implies(&self, other: &Bdd) -> Result<Bdd> {
        self.apply(Op::Implies, other)
    }

    pub fn iff(&self, other: &Bdd) -> Result<Bdd> {
        self.apply(Op::Iff, other)
    }

    pub fn nand(&self, other: &Bdd) -> Result<Bdd> {
        self.apply(Op::Nand, other)
    }

    pub fn nor(&self, other: &Bdd) -> Result<Bdd> {
        self.apply(Op::Nor, other)
    }
}

fn apply_rec(store: &NodeStore, cache: &mut OpCache, op: Op, f: NodeId, g: NodeId) -> NodeId {
    if f.is_terminal() && g.is_terminal() {
        return store.terminal(op.eval(f.is_one(), g.is_one()));
    }

    if let Some(result) = cache.get(op, f, g) {
        return result;
    }

    // Terminals report the sentinel level, so min() picks the earliest
    // decision variable of either operand.
    let level = store.level(f).min(store.level(g));
    let (f0, f1) = cofactors(store, f, level);
    let (g0, g1) = cofactors(store, g, level);

    let lo = apply_rec(store, cache, op, f0, g0);
    let hi = apply_rec(store, cache, op, f1, g1);
    let result = store.make(level, lo, hi);

    cache.insert(op, f, g, result);
    result
}

/// Shannon cofactors of `id` at `level`: the children when the node splits
/// there, the node itself otherwise.
fn cofactors(store: &NodeStore, id: NodeId, level: Level) -> (NodeId, NodeId) {
    if id.is_terminal() || store.level(id) != level {
        (id, id)
    } else {
        let node = store.node(id);
        (node.lo, node.hi)
    }
}

fn negate_rec(store: &NodeStore, memo: &mut HashMap<NodeId, NodeId>, id: NodeId) -> NodeId {
    if id.is_terminal() {
        return store.terminal(id.is_zero());
    }
    if let Some(&result) = memo.get(&id) {
        return result;
    }

    let node = store.node(id);
    let lo = negate_rec(store, memo, node.lo);
    let hi = negate_rec(store, memo, node.hi);
    let result = store.make(node.level, lo, hi);

    memo.insert(id, result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::formula::Formula;
    use crate::order::VarOrder;

    /// Two variable BDDs over the order [p, q], sharing a store.
    fn two_vars() -> (Bdd, Bdd) {
        let store = Rc::new(NodeStore::new());
        let order = Rc::new(VarOrder::new(["p", "q"]));
        let p = Bdd::build_in(&store, Rc::clone(&order), &Formula::var("p")).unwrap();
        let q = Bdd::build_in(&store, Rc::clone(&order), &Formula::var("q")).unwrap();
        (p, q)
    }

    #[test]
    fn test_op_truth_tables() {
        for a in [false, true] {
            for b in [false, true] {
                assert_eq!(Op::And.eval(a, b), a && b);
                assert_eq!(Op::Or.eval(a, b), a || b);
                assert_eq!(Op::Xor.eval(a, b), a != b);
                assert_eq!(Op::Implies.eval(a, b), !a || b);
                assert_eq!(Op::Iff.eval(a, b), a == b);
                assert_eq!(Op::Nand.eval(a, b), !(a && b));
                assert_eq!(Op::Nor.eval(a, b), !(a || b));
            }
        }
    }

    #[test]
    fn test_apply_terminal_pairs() {
        let store = Rc::new(NodeStore::new());
        let order = Rc::new(VarOrder::new(["p"]));
        let t = Bdd::build_in(&store, Rc::clone(&order), &Formula::constant(true)).unwrap();
        let f = Bdd::build_in(&store, Rc::clone(&order), &Formula::constant(false)).unwrap();

        for op in Op::ALL {
            let result = t.apply(op, &f).unwrap();
            assert_eq!(result.root(), store.terminal(op.eval(true, false)));
        }
    }

    #[test]
    fn test_apply_and_or() {
        let (p, q) = two_vars();

        let and = p.and(&q).unwrap();
        assert_eq!(and.to_bracket_string(), "(p, (q, ⊤, ⊥), ⊥)");

        let or = p.or(&q).unwrap();
        assert_eq!(or.to_bracket_string(), "(p, ⊤, (q, ⊤, ⊥))");
    }

    #[test]
    fn test_apply_output_is_canonical() {
        let (p, q) = two_vars();
        let result = p.xor(&q).unwrap();
        assert!(result.is_reduced());

        // Same function twice -> same root, thanks to hash-consing.
        let again = p.xor(&q).unwrap();
        assert_eq!(result.root(), again.root());
    }

    #[test]
    fn test_apply_matches_semantics() {
        let (p, q) = two_vars();
        let interp = |pv: bool, qv: bool| {
            [("p", pv), ("q", qv)].into_iter().collect::<crate::formula::Interpretation>()
        };

        for op in Op::ALL {
            let result = p.apply(op, &q).unwrap();
            for pv in [false, true] {
                for qv in [false, true] {
                    assert_eq!(
                        result.evaluate(&interp(pv, qv)).unwrap(),
                        op.eval(pv, qv),
                        "{} on p={}, q={}",
                        op,
                        pv,
                        qv
                    );
                }
            }
        }
    }

    #[test]
    fn test_not() {
        let (p, q) = two_vars();
        let and = p.and(&q).unwrap();
        let nand = and.not();

        assert_eq!(nand.root(), p.nand(&q).unwrap().root());
        // Double negation restores the very same root.
        assert_eq!(nand.not().root(), and.root());

        // Terminal negation flips the interned terminals.
        let store = Rc::new(NodeStore::new());
        let order = Rc::new(VarOrder::new(["p"]));
        let t = Bdd::build_in(&store, order, &Formula::constant(true)).unwrap();
        assert_eq!(t.not().root(), NodeId::ZERO);
    }

    #[test]
    fn test_implies_is_not_commutative() {
        let (p, q) = two_vars();
        let pq = p.implies(&q).unwrap();
        let qp = q.implies(&p).unwrap();
        assert_ne!(pq.root(), qp.root());
    }
}
