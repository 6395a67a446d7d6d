#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for 2-CNF instances in the DIMACS CNF format.
//!
//! The format typically includes:
//! - Comment lines starting with 'c' (with or without a following space).
//! - A problem line `p cnf <num_variables> <num_clauses>`.
//! - Clause lines: signed integer literals terminated by `0`.
//! - An optional `%` line marking end-of-data (common in competition files).
//!
//! Only clauses of one or two literals are accepted. A unit clause `x` is read as
//! `(x ∨ x)`. Each clause must sit on its own line.

use crate::sat::error::{Error, Result};
use crate::sat::input::{Instance, parse_literal};
use itertools::Itertools;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Largest variable id a signed 32-bit literal can name.
#[allow(clippy::cast_sign_loss)]
const MAX_VARIABLES: usize = i32::MAX as usize;

/// The `p cnf V C` problem line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Problem {
    num_vars: usize,
    num_clauses: usize,
}

fn parse_problem_line(line: &str, line_no: usize) -> Result<Problem> {
    let parts = line.split_whitespace().collect_vec();
    let ["p", "cnf", vars, clauses] = parts.as_slice() else {
        return Err(Error::malformed(
            line_no,
            format!("expected 'p cnf <variables> <clauses>', found '{line}'"),
        ));
    };

    let count = |s: &str| {
        s.parse::<usize>()
            .map_err(|e| Error::malformed(line_no, format!("invalid count '{s}': {e}")))
    };

    let num_vars = count(*vars)?;
    if num_vars > MAX_VARIABLES {
        return Err(Error::malformed(
            line_no,
            format!("{num_vars} variables exceed the limit of {MAX_VARIABLES}"),
        ));
    }

    Ok(Problem {
        num_vars,
        num_clauses: count(*clauses)?,
    })
}

/// Parses DIMACS formatted data from a `BufRead` source.
///
/// Without a problem line the variable count is the largest variable mentioned
/// and the clause count is not checked.
///
/// # Errors
///
/// - `Error::Io` if reading fails.
/// - `Error::MalformedInput` for a bad problem line, an unparsable or zero-less
///   clause line, an empty clause, a clause with more than two literals, or a
///   literal above the declared variable count.
/// - `Error::ClauseCountMismatch` if the problem line's clause count is wrong.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Instance> {
    let mut problem: Option<Problem> = None;
    let mut clauses: Vec<(i32, i32)> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            Some(&"%") => break,
            None => {}
            Some(token) if token.starts_with('c') => {}
            Some(&"p") => problem = Some(parse_problem_line(&line, line_no)?),
            Some(_) => {
                let num_vars = problem.map(|p| p.num_vars);
                let mut literals = Vec::with_capacity(3);
                let mut terminated = false;

                for token in parts {
                    if token == "0" {
                        terminated = true;
                        break;
                    }
                    literals.push(parse_literal(token, line_no, num_vars)?);
                }

                if !terminated {
                    return Err(Error::malformed(line_no, "clause is not terminated by 0"));
                }

                let clause = match literals.as_slice() {
                    [] => return Err(Error::malformed(line_no, "empty clause")),
                    [x] => (*x, *x),
                    [a, b] => (*a, *b),
                    more => {
                        return Err(Error::malformed(
                            line_no,
                            format!("clause has {} literals; only 2-CNF is supported", more.len()),
                        ));
                    }
                };
                clauses.push(clause);
            }
        }
    }

    let num_vars = match problem {
        Some(p) => {
            if p.num_clauses != clauses.len() {
                return Err(Error::ClauseCountMismatch {
                    declared: p.num_clauses,
                    found: clauses.len(),
                });
            }
            p.num_vars
        }
        None => clauses
            .iter()
            .flat_map(|&(a, b)| [a.unsigned_abs(), b.unsigned_abs()])
            .max()
            .map_or(0, |v| v as usize),
    };

    Ok(Instance::new(num_vars, clauses))
}

/// Parses a DIMACS CNF file specified by its path.
///
/// # Errors
///
/// `Error::Io` if the file cannot be opened, otherwise see [`parse_dimacs`].
pub fn parse_file<P: AsRef<Path>>(file_path: P) -> Result<Instance> {
    let file = File::open(file_path)?;
    parse_dimacs(BufReader::new(file))
}
