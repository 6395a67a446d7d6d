//! Errors raised while turning input into a formula.
//!
//! The solver itself never fails: `Unsatisfiable` is a verdict, and bookkeeping
//! bugs panic.

use thiserror::Error;

/// Everything that can go wrong between raw input and a [`Formula`](crate::sat::formula::Formula).
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be read.
    #[error("failed to read instance: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be parsed.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// The header declared a different number of clauses than were supplied.
    #[error("malformed input: header declares {declared} clauses but {found} were supplied")]
    ClauseCountMismatch {
        /// Count given by the header.
        declared: usize,
        /// Clause lines actually read.
        found: usize,
    },

    /// A literal is zero or names a variable above the declared count.
    #[error("literal {literal} is outside the variable range 1..={num_vars}")]
    VariableOutOfRange {
        /// The offending literal.
        literal: i32,
        /// The formula's variable count.
        num_vars: usize,
    },
}

impl Error {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}

/// Result alias used by the loaders and [`Formula::new`](crate::sat::formula::Formula::new).
pub type Result<T> = std::result::Result<T, Error>;
