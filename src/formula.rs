//! Propositional formulas: the input language of the Builder.
//!
//! [`Formula`] is a closed AST over the canonical connective set
//! `{Const, Var, Not, And, Or, Implies, Iff}`. Formulas are immutable trees;
//! the Builder consumes them together with a variable order, and
//! [`Formula::eval`] gives the reference semantics every BDD operation is
//! tested against.
//!
//! The crate does not parse surface syntax --- a front-end producing this AST
//! is expected to live elsewhere.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// A propositional formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    /// A constant: ⊤ or ⊥.
    Const(bool),
    /// A propositional variable.
    Var(String),
    /// Negation: ¬f.
    Not(Box<Formula>),
    /// Conjunction: f ∧ g.
    And(Box<Formula>, Box<Formula>),
    /// Disjunction: f ∨ g.
    Or(Box<Formula>, Box<Formula>),
    /// Implication: f → g.
    Implies(Box<Formula>, Box<Formula>),
    /// Biconditional: f ↔ g.
    Iff(Box<Formula>, Box<Formula>),
}

impl Formula {
    pub fn var(name: impl Into<String>) -> Self {
        Formula::Var(name.into())
    }

    pub fn constant(value: bool) -> Self {
        Formula::Const(value)
    }

    pub fn not(f: Self) -> Self {
        Formula::Not(Box::new(f))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Formula::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Formula::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn implies(lhs: Self, rhs: Self) -> Self {
        Formula::Implies(Box::new(lhs), Box::new(rhs))
    }

    pub fn iff(lhs: Self, rhs: Self) -> Self {
        Formula::Iff(Box::new(lhs), Box::new(rhs))
    }

    /// Evaluates the formula under an interpretation.
    ///
    /// `Implies(a, b)` is `¬a ∨ b`; `Iff` is equality of truth values.
    /// A variable missing from the interpretation yields
    /// [`Error::UndefinedVariable`].
    pub fn eval(&self, interpretation: &Interpretation) -> Result<bool> {
        match self {
            Formula::Const(value) => Ok(*value),
            Formula::Var(name) => interpretation
                .get(name)
                .ok_or_else(|| Error::UndefinedVariable { name: name.clone() }),
            Formula::Not(f) => Ok(!f.eval(interpretation)?),
            Formula::And(lhs, rhs) => Ok(lhs.eval(interpretation)? && rhs.eval(interpretation)?),
            Formula::Or(lhs, rhs) => Ok(lhs.eval(interpretation)? || rhs.eval(interpretation)?),
            Formula::Implies(lhs, rhs) => Ok(!lhs.eval(interpretation)? || rhs.eval(interpretation)?),
            Formula::Iff(lhs, rhs) => Ok(lhs.eval(interpretation)? == rhs.eval(interpretation)?),
        }
    }

    /// Free variables in source order, first occurrence wins.
    ///
    /// This enumeration is the default variable ordering when the caller
    /// supplies none.
    pub fn free_vars(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_vars(&mut vars);
        vars
    }

    fn collect_vars(&self, out: &mut Vec<String>) {
        match self {
            Formula::Const(_) => {}
            Formula::Var(name) => {
                if !out.iter().any(|v| v == name) {
                    out.push(name.clone());
                }
            }
            Formula::Not(f) => f.collect_vars(out),
            Formula::And(lhs, rhs)
            | Formula::Or(lhs, rhs)
            | Formula::Implies(lhs, rhs)
            | Formula::Iff(lhs, rhs) => {
                lhs.collect_vars(out);
                rhs.collect_vars(out);
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Const(true) => write!(f, "⊤"),
            Formula::Const(false) => write!(f, "⊥"),
            Formula::Var(name) => write!(f, "{}", name),
            Formula::Not(inner) => write!(f, "¬{}", inner),
            Formula::And(lhs, rhs) => write!(f, "({} ∧ {})", lhs, rhs),
            Formula::Or(lhs, rhs) => write!(f, "({} ∨ {})", lhs, rhs),
            Formula::Implies(lhs, rhs) => write!(f, "({} → {})", lhs, rhs),
            Formula::Iff(lhs, rhs) => write!(f, "({} ↔ {})", lhs, rhs),
        }
    }
}

/// A finite mapping from variable names to truth values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interpretation {
    map: HashMap<String, bool>,
}

impl Interpretation {
    /// Creates an empty interpretation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a truth value to a variable, replacing any previous value.
    pub fn assign(&mut self, name: impl Into<String>, value: bool) {
        self.map.insert(name.into(), value);
    }

    /// Looks up a variable.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.map.get(name).copied()
    }

    /// Number of assigned variables.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no variables are assigned.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Interpretation {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        let mut interp = Interpretation::new();
        for (name, value) in iter {
            interp.assign(name, value);
        }
        interp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interp(pairs: &[(&str, bool)]) -> Interpretation {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_eval_connectives() {
        let p = || Formula::var("p");
        let q = || Formula::var("q");

        let i_tf = interp(&[("p", true), ("q", false)]);
        let i_tt = interp(&[("p", true), ("q", true)]);

        assert!(!Formula::and(p(), q()).eval(&i_tf).unwrap());
        assert!(Formula::and(p(), q()).eval(&i_tt).unwrap());
        assert!(Formula::or(p(), q()).eval(&i_tf).unwrap());
        assert!(!Formula::implies(p(), q()).eval(&i_tf).unwrap());
        assert!(Formula::implies(p(), q()).eval(&i_tt).unwrap());
        assert!(!Formula::iff(p(), q()).eval(&i_tf).unwrap());
        assert!(Formula::iff(p(), q()).eval(&i_tt).unwrap());
        assert!(!Formula::not(p()).eval(&i_tf).unwrap());
    }

    #[test]
    fn test_eval_constants() {
        let empty = Interpretation::new();
        assert!(Formula::constant(true).eval(&empty).unwrap());
        assert!(!Formula::constant(false).eval(&empty).unwrap());
    }

    #[test]
    fn test_eval_missing_variable() {
        let f = Formula::var("p");
        let err = f.eval(&Interpretation::new()).unwrap_err();
        assert_eq!(err, Error::UndefinedVariable { name: "p".into() });
    }

    #[test]
    fn test_free_vars_source_order() {
        // q appears before p in the source; duplicates are dropped.
        let f = Formula::or(
            Formula::and(Formula::var("q"), Formula::var("p")),
            Formula::var("q"),
        );
        assert_eq!(f.free_vars(), vec!["q".to_string(), "p".to_string()]);
        assert!(Formula::constant(true).free_vars().is_empty());
    }

    #[test]
    fn test_display() {
        let f = Formula::or(
            Formula::var("p"),
            Formula::and(Formula::var("q"), Formula::not(Formula::var("r"))),
        );
        assert_eq!(f.to_string(), "(p ∨ (q ∧ ¬r))");
        assert_eq!(Formula::implies(Formula::var("p"), Formula::constant(false)).to_string(), "(p → ⊥)");
    }
}
