//! Papadimitriou's randomized local search for 2-SAT.
//!
//! ```text
//! repeat ⌊log2 n⌋ + 1 times:
//!     draw a uniformly random assignment
//!     repeat ⌊2n²⌋ times:
//!         if every clause is true, stop: satisfiable
//!         take the first false clause and flip one of its two variables,
//!         chosen uniformly at random
//! report unsatisfiable
//! ```
//!
//! `n` is the number of variables still active after simplification. With `n ≤ 1`
//! the restart count is clamped to one so tiny instances still get searched.
//!
//! A satisfiable formula survives one restart unsolved with probability at most
//! 1/2, so an `Unsatisfiable` verdict is wrong with probability at most
//! `2^-(⌊log2 n⌋ + 1)`. A `Satisfiable` verdict is always right.

use crate::sat::assignment::Assignment;
use crate::sat::formula::Formula;
use crate::sat::literal::Literal;
use crate::sat::simplify::Simplifier;
use crate::sat::solver::{DefaultConfig, SolutionStats, Solver, SolverConfig, Verdict};
use fastrand::Rng;
use tracing::{debug, info, trace};

/// The random-walk engine. Owns its formula, simplifier and random source.
#[derive(Debug, Clone)]
pub struct Papadimitriou<C: SolverConfig = DefaultConfig> {
    /// The formula being solved; simplified in place on the first `solve`.
    pub formula: Formula<C::Literal>,
    /// Strategy run once before the search.
    pub simplifier: C::Simplifier,
    rng: Rng,
    stats: SolutionStats,
    simplified: bool,
}

impl<C: SolverConfig> Papadimitriou<C> {
    /// Builds a solver from explicit parts.
    ///
    /// # Arguments
    ///
    /// * `formula` - The formula to solve. It is simplified in place.
    /// * `simplifier` - Run once, before the first search.
    /// * `rng` - Source of every random choice; a seeded `Rng` makes runs repeatable.
    #[must_use]
    pub fn from_parts(formula: Formula<C::Literal>, simplifier: C::Simplifier, rng: Rng) -> Self {
        Self {
            formula,
            simplifier,
            rng,
            stats: SolutionStats::default(),
            simplified: false,
        }
    }

    /// Random restarts for `n` active variables: `⌊log2 n⌋ + 1`, at least one.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn restart_limit(n: usize) -> usize {
        if n <= 1 {
            return 1;
        }
        (n as f64).log2().floor() as usize + 1
    }

    /// Flips per restart for `n` active variables: `⌊2n²⌋`.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn flip_limit(n: usize) -> usize {
        (2.0 * (n as f64).powi(2)).floor() as usize
    }

    /// Runs the simplifier once; later calls are no-ops.
    fn simplify(&mut self) {
        if self.simplified {
            return;
        }
        self.stats.clauses_before = self.formula.num_clauses();
        self.stats.simplify = self.simplifier.simplify(&mut self.formula);
        self.stats.clauses_after = self.formula.num_clauses();
        self.stats.active_variables = self.formula.active_variables().len();
        self.simplified = true;
    }

    fn search(&mut self) -> Option<Assignment> {
        let n = self.stats.active_variables;
        let restarts = Self::restart_limit(n);
        let flips = Self::flip_limit(n);
        debug!(n, restarts, flips, "starting local search");

        let mut assignment = Assignment::new(self.formula.num_vars());

        for restart in 0..restarts {
            assignment.randomize(&mut self.rng);
            self.stats.restarts += 1;
            trace!(restart, "random restart");

            for _ in 0..flips {
                self.stats.clause_scans += 1;
                let Some(clause) = self.formula.first_unsatisfied(&assignment) else {
                    return Some(assignment);
                };

                let lit = if self.rng.bool() {
                    clause.first()
                } else {
                    clause.second()
                };
                assignment.flip(lit.variable());
                self.stats.flips += 1;
            }
        }

        None
    }
}

impl<C: SolverConfig> Solver<C> for Papadimitriou<C> {
    fn new(formula: Formula<C::Literal>) -> Self {
        Self::from_parts(formula, C::Simplifier::default(), Rng::new())
    }

    fn with_seed(formula: Formula<C::Literal>, seed: u64) -> Self {
        Self::from_parts(formula, C::Simplifier::default(), Rng::with_seed(seed))
    }

    fn solve(&mut self) -> Verdict {
        self.simplify();

        let found = if self.formula.is_empty() {
            Some(Assignment::new(self.formula.num_vars()))
        } else {
            self.search()
        };

        match found {
            Some(mut assignment) => {
                self.formula.extend_model(&mut assignment);
                debug_assert!(self.formula.verify(&assignment));
                info!(restarts = self.stats.restarts, flips = self.stats.flips, "satisfiable");
                Verdict::Satisfiable(assignment)
            }
            None => {
                info!(restarts = self.stats.restarts, flips = self.stats.flips, "no model found");
                Verdict::Unsatisfiable
            }
        }
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}
