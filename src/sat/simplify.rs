//! Removal of meaningless variables.
//!
//! A variable is meaningless when it occurs in fewer than two clauses, or when every
//! occurrence across its clauses has the same polarity. Such a variable can always
//! be set to satisfy all of its clauses, so those clauses can be dropped without
//! changing satisfiability. Dropping them may make other variables meaningless,
//! which is why the scan is repeated.
//!
//! The scan runs a fixed number of passes by default (60). `PassLimit::UntilFixedPoint`
//! instead repeats until a pass removes nothing.

use crate::sat::formula::Formula;
use crate::sat::literal::{Literal, Variable};
use std::fmt::Debug;
use tracing::{debug, trace};

/// Number of passes run by the default simplifier.
pub const DEFAULT_PASSES: usize = 60;

/// An in-place, satisfiability-preserving rewrite of a formula.
pub trait Simplifier<L: Literal>: Debug {
    /// Simplifies `formula` in place.
    fn simplify(&self, formula: &mut Formula<L>) -> SimplifyStats;
}

/// What one `simplify` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplifyStats {
    /// Passes run.
    pub passes: usize,
    /// Clauses removed over all passes.
    pub clauses_removed: usize,
    /// Variables whose clauses were removed.
    pub variables_eliminated: usize,
}

/// How long [`MeaninglessVariableElimination`] keeps scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassLimit {
    /// Exactly this many passes, whether or not the last ones change anything.
    Fixed(usize),
    /// Repeat until a pass removes no clause.
    UntilFixedPoint,
}

impl Default for PassLimit {
    fn default() -> Self {
        Self::Fixed(DEFAULT_PASSES)
    }
}

/// Removes every clause of each meaningless variable, pass after pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeaninglessVariableElimination {
    pass_limit: PassLimit,
}

impl MeaninglessVariableElimination {
    /// An eliminator that stops according to `pass_limit`.
    #[must_use]
    pub const fn new(pass_limit: PassLimit) -> Self {
        Self { pass_limit }
    }

    /// The configured stopping rule.
    #[must_use]
    pub const fn pass_limit(&self) -> PassLimit {
        self.pass_limit
    }

    /// Whether `var` is meaningless with respect to the live clauses of `formula`.
    pub fn is_meaningless<L: Literal>(formula: &Formula<L>, var: Variable) -> bool {
        let ids = formula.registry().clauses_of(var);
        if ids.len() < 2 {
            return true;
        }

        let mut polarities = ids
            .iter()
            .flat_map(|&id| formula.clause(id).occurrences(var))
            .map(Literal::polarity);

        match polarities.next() {
            Some(first) => polarities.all(|p| p == first),
            None => true,
        }
    }

    /// One scan over all variables. A variable's check sees every removal made
    /// earlier in the same pass.
    fn run_pass<L: Literal>(formula: &mut Formula<L>, stats: &mut SimplifyStats) -> usize {
        let mut removed = 0;

        for var in formula.registry().variables() {
            if !Self::is_meaningless(formula, var) {
                continue;
            }

            let n = formula.eliminate_variable(var);
            if n > 0 {
                trace!(var, clauses = n, "eliminated meaningless variable");
                stats.variables_eliminated += 1;
                removed += n;
            }
        }

        stats.passes += 1;
        stats.clauses_removed += removed;
        removed
    }
}

impl<L: Literal> Simplifier<L> for MeaninglessVariableElimination {
    fn simplify(&self, formula: &mut Formula<L>) -> SimplifyStats {
        let mut stats = SimplifyStats::default();
        let before = formula.num_clauses();

        match self.pass_limit {
            PassLimit::Fixed(passes) => {
                for pass in 0..passes {
                    let removed = Self::run_pass(formula, &mut stats);
                    if removed > 0 {
                        debug!(pass, removed, remaining = formula.num_clauses(), "simplification pass");
                    }
                }
            }
            PassLimit::UntilFixedPoint => loop {
                let removed = Self::run_pass(formula, &mut stats);
                if removed == 0 {
                    break;
                }
                debug!(pass = stats.passes - 1, removed, remaining = formula.num_clauses(), "simplification pass");
            },
        }

        debug!(
            passes = stats.passes,
            before,
            after = formula.num_clauses(),
            eliminated = stats.variables_eliminated,
            "simplification finished"
        );
        stats
    }
}

/// Leaves the formula untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSimplification;

impl<L: Literal> Simplifier<L> for NoSimplification {
    fn simplify(&self, _: &mut Formula<L>) -> SimplifyStats {
        SimplifyStats::default()
    }
}
