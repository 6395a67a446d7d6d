#![deny(missing_docs)]
//! A randomized 2-SAT solver.
//!
//! Formulas are simplified by stripping meaningless variables (those occurring in
//! fewer than two clauses, or with only one polarity) and then searched with
//! Papadimitriou's random-walk algorithm.
//!
//! ```
//! use two_sat_solver::sat::formula::Formula;
//! use two_sat_solver::sat::papadimitriou::Papadimitriou;
//! use two_sat_solver::sat::solver::Solver;
//!
//! let formula = Formula::new(3, [(1, 2), (-1, 3)]).unwrap();
//! let mut solver: Papadimitriou = Solver::with_seed(formula, 42);
//! assert!(solver.solve().is_sat());
//! ```

/// The `sat` module implements the 2-SAT solver, its preprocessing and its input
/// formats.
pub mod sat;
