//! The solver contract shared by the engine, the CLI and the benches.

use crate::sat::assignment::{Assignment, Solutions};
use crate::sat::formula::Formula;
use crate::sat::literal::{Literal, PackedLiteral};
use crate::sat::simplify::{MeaninglessVariableElimination, Simplifier, SimplifyStats};
use std::fmt::Debug;
use std::marker::PhantomData;

/// Compile-time choice of literal representation and simplification strategy.
pub trait SolverConfig: Debug + Clone {
    /// Literal encoding used by clauses.
    type Literal: Literal;
    /// Simplification run before the search.
    type Simplifier: Simplifier<Self::Literal> + Default + Clone;
}

/// A `SolverConfig` assembled from its parts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config<L, S>(PhantomData<(L, S)>);

impl<L: Literal, S: Simplifier<L> + Default + Clone> SolverConfig for Config<L, S> {
    type Literal = L;
    type Simplifier = S;
}

/// Packed literals and 60-pass meaningless-variable elimination.
pub type DefaultConfig = Config<PackedLiteral, MeaninglessVariableElimination>;

/// Outcome of a solve.
///
/// `Satisfiable` is always correct. `Unsatisfiable` only means no model was found
/// within the search budget; for a satisfiable formula this happens with bounded,
/// small probability. It is not a proof of unsatisfiability.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Verdict {
    /// A model of the original formula.
    Satisfiable(Assignment),
    /// No model found within the search budget.
    Unsatisfiable,
}

impl Verdict {
    /// `true` for `Satisfiable`.
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    /// `true` for `Unsatisfiable`.
    #[must_use]
    pub const fn is_unsat(&self) -> bool {
        !self.is_sat()
    }

    /// The model, if any.
    #[must_use]
    pub const fn assignment(&self) -> Option<&Assignment> {
        match self {
            Self::Satisfiable(a) => Some(a),
            Self::Unsatisfiable => None,
        }
    }

    /// Consumes the verdict, returning the model if any.
    #[must_use]
    pub fn into_assignment(self) -> Option<Assignment> {
        match self {
            Self::Satisfiable(a) => Some(a),
            Self::Unsatisfiable => None,
        }
    }

    /// The model as signed literals, if any.
    #[must_use]
    pub fn solutions(&self) -> Option<Solutions> {
        self.assignment().map(Assignment::solutions)
    }
}

/// Counters collected over one or more `solve` calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolutionStats {
    /// Random assignments drawn.
    pub restarts: usize,
    /// Variables flipped.
    pub flips: usize,
    /// Scans of the clause list looking for a false clause.
    pub clause_scans: usize,
    /// Variables left in play after simplification.
    pub active_variables: usize,
    /// Live clauses before simplification.
    pub clauses_before: usize,
    /// Live clauses left for the search.
    pub clauses_after: usize,
    /// Simplifier counters.
    pub simplify: SimplifyStats,
}

/// A complete solver over one formula.
pub trait Solver<C: SolverConfig = DefaultConfig> {
    /// A solver seeded from the process entropy source.
    fn new(formula: Formula<C::Literal>) -> Self;
    /// A solver whose random choices are fixed by `seed`.
    fn with_seed(formula: Formula<C::Literal>, seed: u64) -> Self;
    /// Simplifies (first call only) and searches for a model.
    fn solve(&mut self) -> Verdict;
    /// Counters accumulated so far.
    fn stats(&self) -> SolutionStats;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_accessors() {
        let mut assignment = Assignment::new(2);
        assignment.set(1, true);
        let sat = Verdict::Satisfiable(assignment.clone());
        assert!(sat.is_sat());
        assert_eq!(sat.assignment(), Some(&assignment));
        assert_eq!(sat.solutions().map(|s| s.to_string()), Some("1 -2".to_string()));
        assert_eq!(sat.into_assignment(), Some(assignment));

        let unsat = Verdict::Unsatisfiable;
        assert!(unsat.is_unsat());
        assert!(unsat.assignment().is_none());
        assert!(unsat.solutions().is_none());
    }
}
