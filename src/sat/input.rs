//! Reader for the plain two-column instance format.
//!
//! ```text
//! 3          <- N: number of clauses, and also number of variables
//! 1 -2       <- one clause per line, two signed literals
//! -1 3
//! 2 3
//! ```
//!
//! Reading stops at end of input or at the first blank line. Anything after a
//! blank line is ignored.

use crate::sat::error::{Error, Result};
use crate::sat::formula::Formula;
use crate::sat::literal::Literal;
use itertools::Itertools;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Upper bound on clause slots reserved from a header before any line is read.
const MAX_PREALLOCATED: usize = 1 << 16;

/// Raw clause records as produced by a loader, before any core state exists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Instance {
    /// Number of variables; ids run `1..=num_vars`.
    pub num_vars: usize,
    /// Signed literal pairs in input order.
    pub clauses: Vec<(i32, i32)>,
}

impl Instance {
    /// Wraps already-parsed clause records.
    #[must_use]
    pub const fn new(num_vars: usize, clauses: Vec<(i32, i32)>) -> Self {
        Self { num_vars, clauses }
    }

    /// Number of clause records.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Builds the formula for this instance.
    ///
    /// # Errors
    ///
    /// `Error::VariableOutOfRange` if a clause names a variable outside
    /// `1..=num_vars`. Instances produced by the loaders never do.
    pub fn to_formula<L: Literal>(&self) -> Result<Formula<L>> {
        Formula::new(self.num_vars, self.clauses.iter().copied())
    }
}

/// Parses a single literal token, checking it against the variable count.
pub(crate) fn parse_literal(token: &str, line: usize, num_vars: Option<usize>) -> Result<i32> {
    let literal: i32 = token
        .parse()
        .map_err(|e| Error::malformed(line, format!("invalid literal '{token}': {e}")))?;

    if literal == 0 {
        return Err(Error::malformed(line, "literal 0 does not name a variable"));
    }

    if let Some(n) = num_vars {
        if literal.unsigned_abs() as usize > n {
            return Err(Error::malformed(
                line,
                format!("literal {literal} exceeds the variable count {n}"),
            ));
        }
    }

    Ok(literal)
}

/// Parses an instance from any buffered reader.
///
/// # Errors
///
/// - `Error::Io` if reading fails.
/// - `Error::MalformedInput` if the header is missing or not a count, or a clause
///   line does not hold exactly two non-zero literals within `1..=N`.
/// - `Error::ClauseCountMismatch` if the number of clause lines differs from N.
pub fn parse_instance<R: BufRead>(reader: R) -> Result<Instance> {
    let mut lines = reader.lines();

    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| Error::malformed(1, "missing clause count"))?;
    let header = header.trim();
    let declared: usize = header
        .parse()
        .map_err(|e| Error::malformed(1, format!("invalid clause count '{header}': {e}")))?;

    // The header is untrusted until the lines agree with it.
    let mut clauses = Vec::with_capacity(declared.min(MAX_PREALLOCATED));

    for (i, line) in lines.enumerate() {
        let line = line?;
        let line_no = i + 2;
        if line.trim().is_empty() {
            break;
        }

        let tokens = line.split_whitespace().collect_vec();
        let [first, second] = tokens.as_slice() else {
            return Err(Error::malformed(
                line_no,
                format!("expected two literals, found {}", tokens.len()),
            ));
        };

        clauses.push((
            parse_literal(first, line_no, Some(declared))?,
            parse_literal(second, line_no, Some(declared))?,
        ));
    }

    if clauses.len() != declared {
        return Err(Error::ClauseCountMismatch {
            declared,
            found: clauses.len(),
        });
    }

    Ok(Instance::new(declared, clauses))
}

/// Parses an instance held in a string.
///
/// # Errors
///
/// See [`parse_instance`].
pub fn parse_str(input: &str) -> Result<Instance> {
    parse_instance(input.as_bytes())
}

/// Opens and parses an instance file.
///
/// # Errors
///
/// `Error::Io` if the file cannot be opened, otherwise see [`parse_instance`].
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Instance> {
    let file = File::open(path)?;
    parse_instance(BufReader::new(file))
}
