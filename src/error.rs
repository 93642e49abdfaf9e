//! Errors surfaced to callers.
//!
//! Every error here is a caller mistake and is reported, never recovered
//! internally. Violations of the store's own invariants are bugs and panic
//! instead.

use std::fmt;

/// Errors produced by BDD construction, evaluation, and combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A formula mentions a variable absent from the supplied variable order.
    UnknownVariable {
        /// The offending variable name.
        name: String,
    },
    /// An evaluation interpretation omits a variable appearing in the BDD
    /// or formula.
    UndefinedVariable {
        /// The offending variable name.
        name: String,
    },
    /// Two BDDs with different variable orders were combined.
    OrderMismatch,
    /// Two BDDs from distinct node stores were combined.
    StoreMismatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownVariable { name } => {
                write!(f, "variable {:?} is not in the variable order", name)
            }
            Error::UndefinedVariable { name } => {
                write!(f, "variable {:?} is not assigned in the interpretation", name)
            }
            Error::OrderMismatch => {
                write!(f, "operands were built against different variable orders")
            }
            Error::StoreMismatch => {
                write!(f, "operands belong to different node stores")
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::UnknownVariable { name: "p".into() };
        assert!(err.to_string().contains("\"p\""));
        assert!(Error::OrderMismatch.to_string().contains("orders"));
        assert!(Error::StoreMismatch.to_string().contains("stores"));
    }
}
