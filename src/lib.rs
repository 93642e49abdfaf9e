//! # robdd-rs: Reduced Ordered Binary Decision Diagrams in Rust
//!
//! **`robdd-rs`** builds **ROBDDs** --- the canonical graph representation of
//! Boolean functions over a fixed variable order --- from propositional
//! formulas, reduces them to canonical form, and combines them under binary
//! Boolean operators.
//!
//! ## Why canonical form matters
//!
//! For a fixed variable order, every Boolean function has exactly one reduced
//! diagram. Once two BDDs in the same store are reduced, they encode the same
//! function **iff their roots are the same handle** --- equivalence checking,
//! satisfiability, and validity all become trivial inspections.
//!
//! ## Key pieces
//!
//! - **Node store with hash-consing**: nodes live in an arena indexed by
//!   lightweight [`NodeId`][crate::types::NodeId] handles; a unique table
//!   interns `(level, lo, hi)` triples so identity comparison is integer
//!   equality.
//! - **Builder**: recursive Shannon expansion of a
//!   [`Formula`][crate::formula::Formula] over a
//!   [`VarOrder`][crate::order::VarOrder], producing a quasi-reduced diagram.
//! - **Reducer**: the classical bottom-up reduction pass restoring full
//!   canonical form, with statistics on removed and merged nodes.
//! - **Apply**: memoized Shannon-expansion combination of two BDDs under
//!   [`Op`][crate::apply::Op], producing canonical output from canonical
//!   input.
//!
//! ## Basic usage
//!
//! ```rust
//! use robdd_rs::bdd::Bdd;
//! use robdd_rs::formula::{Formula, Interpretation};
//!
//! // f = p ∨ (q ∧ r)
//! let f = Formula::or(
//!     Formula::var("p"),
//!     Formula::and(Formula::var("q"), Formula::var("r")),
//! );
//!
//! // Build over the default order [p, q, r] and reduce to canonical form.
//! let mut bdd = Bdd::build(&f, None).unwrap();
//! bdd.reduce();
//!
//! assert_eq!(bdd.count_nodes(), 5);
//! assert!(bdd.is_satisfiable());
//! assert!(!bdd.is_valid());
//!
//! let interp: Interpretation = [("p", false), ("q", true), ("r", true)].into_iter().collect();
//! assert!(bdd.evaluate(&interp).unwrap());
//! ```
//!
//! ## Combining BDDs
//!
//! BDDs interact only within a shared store and order; build them with
//! [`Bdd::build_in`][crate::bdd::Bdd::build_in]:
//!
//! ```rust
//! use std::rc::Rc;
//! use robdd_rs::bdd::Bdd;
//! use robdd_rs::formula::Formula;
//! use robdd_rs::order::VarOrder;
//! use robdd_rs::store::NodeStore;
//!
//! let store = Rc::new(NodeStore::new());
//! let order = Rc::new(VarOrder::new(["p", "q"]));
//!
//! let p = Bdd::build_in(&store, Rc::clone(&order), &Formula::var("p")).unwrap();
//! let q = Bdd::build_in(&store, Rc::clone(&order), &Formula::var("q")).unwrap();
//!
//! let both = p.and(&q).unwrap();
//! let either = p.or(&q).unwrap();
//! assert!(both.implies(&either).unwrap().is_valid());
//! ```
//!
//! ## Scope
//!
//! The crate is single-threaded and purely in-memory: one store must not be
//! shared across execution contexts, and nodes live as long as their store.
//! Surface-syntax parsing, rendering, and dynamic variable reordering are
//! deliberately out of scope.

pub mod apply;
pub mod bdd;
pub mod cache;
pub mod error;
pub mod formula;
pub mod node;
pub mod order;
pub mod reduce;
pub mod store;
pub mod subtable;
pub mod types;
