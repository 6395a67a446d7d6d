#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A 2-CNF instance: clause arena, variable registry and elimination trail.
//!
//! The arena (`Vec<Clause<L>>`) is the sole owner of every clause. A clause with id
//! `k` lives at index `k - 1` for the whole life of the formula; removal unregisters
//! the clause from the registry and then marks it deleted in place, so handles held
//! elsewhere never dangle and the original instance can still be checked against a
//! model.

use crate::sat::assignment::Assignment;
use crate::sat::clause::{Clause, ClauseId};
use crate::sat::error::{Error, Result};
use crate::sat::literal::{self, Literal, PackedLiteral, Variable};
use crate::sat::registry::{Occurrences, VariableRegistry};
use std::fmt::{self, Display, Formatter};

/// A variable removed by simplification together with the clauses removed with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elimination {
    /// The eliminated variable.
    pub variable: Variable,
    /// Ids of the clauses removed with it, in registry order.
    pub clauses: Occurrences,
}

/// A 2-CNF formula over variables `1..=num_vars`.
///
/// Clauses are never dropped from the arena. `clauses()` yields only the live
/// ones, while `verify` checks all of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formula<L: Literal = PackedLiteral> {
    num_vars: usize,
    clauses: Vec<Clause<L>>,
    registry: VariableRegistry,
    live: usize,
    eliminations: Vec<Elimination>,
}

impl<L: Literal> Formula<L> {
    /// Builds a formula over variables `1..=num_vars` from signed literal pairs.
    ///
    /// Clause ids are assigned from 1 in input order and every clause is registered
    /// with the variables it mentions. `num_vars` is taken as given; it is not
    /// derived from the clauses.
    ///
    /// # Errors
    ///
    /// `Error::VariableOutOfRange` if a literal is `0` or names a variable above
    /// `num_vars`.
    pub fn new<I>(num_vars: usize, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut formula = Self {
            num_vars,
            clauses: Vec::new(),
            registry: VariableRegistry::new(num_vars),
            live: 0,
            eliminations: Vec::new(),
        };

        for (first, second) in pairs {
            for literal in [first, second] {
                if literal == 0 || literal.unsigned_abs() as usize > num_vars {
                    return Err(Error::VariableOutOfRange { literal, num_vars });
                }
            }
            formula.push(first, second);
        }

        Ok(formula)
    }

    fn push(&mut self, first: i32, second: i32) {
        let id = ClauseId::try_from(self.clauses.len() + 1).unwrap_or(ClauseId::MAX);
        let clause = Clause::new(id, first, second);
        self.registry.register(&clause);
        self.clauses.push(clause);
        self.live += 1;
    }

    /// Declared number of variables.
    #[must_use]
    pub const fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of live (not yet removed) clauses.
    #[must_use]
    pub const fn num_clauses(&self) -> usize {
        self.live
    }

    /// Number of clauses the formula was built with, removed ones included.
    #[must_use]
    pub fn total_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// `true` when no live clause is left.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// # Panics
    ///
    /// If `id` was never assigned by this formula.
    #[must_use]
    pub fn clause(&self, id: ClauseId) -> &Clause<L> {
        &self.clauses[id as usize - 1]
    }

    /// Live clauses in arena order.
    pub fn clauses(&self) -> impl Iterator<Item = &Clause<L>> {
        self.clauses.iter().filter(|c| !c.is_deleted())
    }

    /// Every clause ever added, removed ones included.
    #[must_use]
    pub fn all_clauses(&self) -> &[Clause<L>] {
        &self.clauses
    }

    /// Per-variable index of live clauses.
    #[must_use]
    pub const fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    /// Variables that still appear in a live clause.
    #[must_use]
    pub fn active_variables(&self) -> Vec<Variable> {
        self.registry.active_variables()
    }

    /// Variables removed by simplification, in removal order.
    #[must_use]
    pub fn eliminations(&self) -> &[Elimination] {
        &self.eliminations
    }

    /// Unregisters clause `id` and marks it deleted.
    ///
    /// # Panics
    ///
    /// If the clause was already removed.
    pub fn remove_clause(&mut self, id: ClauseId) {
        let clause = &mut self.clauses[id as usize - 1];
        self.registry.unregister(clause);
        clause.delete();
        self.live -= 1;
    }

    /// Removes every live clause mentioning `var` and records the elimination.
    /// Returns the number of clauses removed.
    pub fn eliminate_variable(&mut self, var: Variable) -> usize {
        let ids = Occurrences::from_slice(self.registry.clauses_of(var));
        if ids.is_empty() {
            return 0;
        }

        for &id in &ids {
            self.remove_clause(id);
        }

        let removed = ids.len();
        self.eliminations.push(Elimination {
            variable: var,
            clauses: ids,
        });
        removed
    }

    /// The first live clause, in arena order, that is false under `assignment`.
    #[must_use]
    pub fn first_unsatisfied(&self, assignment: &Assignment) -> Option<&Clause<L>> {
        self.clauses().find(|c| !c.is_satisfied(assignment))
    }

    /// Every live clause is true under `assignment`.
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.first_unsatisfied(assignment).is_none()
    }

    /// Every clause the formula was built with, removed ones included, is true
    /// under `assignment`.
    #[must_use]
    pub fn verify(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied(assignment))
    }

    /// Extends a model of the live clauses to a model of the original formula.
    ///
    /// Eliminations are replayed newest first. Each eliminated variable occurs with
    /// a single polarity in the clauses removed with it (or in only one clause), so
    /// setting it to satisfy the first of them that is false satisfies them all.
    /// Clauses removed earlier that also mention it are fixed later in the replay.
    pub fn extend_model(&self, assignment: &mut Assignment) {
        for elimination in self.eliminations.iter().rev() {
            for &id in &elimination.clauses {
                let clause = self.clause(id);
                if clause.is_satisfied(assignment) {
                    continue;
                }
                if let Some(lit) = clause.occurrences(elimination.variable).next() {
                    assignment.set(elimination.variable, lit.polarity());
                }
            }
        }
    }

    /// Re-encodes the formula with another literal representation.
    #[must_use]
    pub fn convert<U: Literal>(&self) -> Formula<U> {
        Formula {
            num_vars: self.num_vars,
            clauses: self
                .clauses
                .iter()
                .map(|c| Clause {
                    literals: [
                        literal::convert(&c.literals[0]),
                        literal::convert(&c.literals[1]),
                    ],
                    id: c.id,
                    deleted: c.deleted,
                })
                .collect(),
            registry: self.registry.clone(),
            live: self.live,
            eliminations: self.eliminations.clone(),
        }
    }
}

/// Live clauses in DIMACS form.
impl<L: Literal> Display for Formula<L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.live)?;
        for clause in self.clauses() {
            let (a, b) = clause.values();
            writeln!(f, "{a} {b} 0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::NegativeLiteral;

    fn formula(num_vars: usize, pairs: &[(i32, i32)]) -> Formula {
        Formula::new(num_vars, pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_new_assigns_sequential_ids() {
        let f = formula(3, &[(1, -2), (-1, 3), (2, 3)]);
        assert_eq!(f.num_vars(), 3);
        assert_eq!(f.num_clauses(), 3);
        let ids: Vec<_> = f.clauses().map(Clause::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(f.clause(2).values(), (-1, 3));
        assert_eq!(f.registry().clauses_of(3), &[2, 3]);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        let err = Formula::<PackedLiteral>::new(2, [(1, 3)]).unwrap_err();
        assert!(matches!(
            err,
            Error::VariableOutOfRange {
                literal: 3,
                num_vars: 2
            }
        ));

        let err = Formula::<PackedLiteral>::new(2, [(0, 1)]).unwrap_err();
        assert!(matches!(err, Error::VariableOutOfRange { literal: 0, .. }));
    }

    #[test]
    fn test_empty() {
        let f = formula(0, &[]);
        assert!(f.is_empty());
        assert!(f.active_variables().is_empty());
        assert!(f.is_satisfied_by(&Assignment::new(0)));
    }

    #[test]
    fn test_remove_clause() {
        let mut f = formula(3, &[(1, -2), (-1, 3)]);
        f.remove_clause(1);

        assert_eq!(f.num_clauses(), 1);
        assert_eq!(f.total_clauses(), 2);
        assert!(f.clause(1).is_deleted());
        assert_eq!(f.registry().clauses_of(1), &[2]);
        assert!(f.registry().clauses_of(2).is_empty());
        assert_eq!(f.active_variables(), vec![1, 3]);
    }

    #[test]
    #[should_panic(expected = "is not registered")]
    fn test_remove_clause_twice_panics() {
        let mut f = formula(2, &[(1, 2)]);
        f.remove_clause(1);
        f.remove_clause(1);
    }

    #[test]
    fn test_eliminate_variable_records_trail() {
        let mut f = formula(3, &[(1, 2), (1, -3), (-2, 3)]);
        assert_eq!(f.eliminate_variable(1), 2);
        assert_eq!(f.eliminate_variable(1), 0);

        assert_eq!(f.num_clauses(), 1);
        assert_eq!(f.eliminations().len(), 1);
        assert_eq!(f.eliminations()[0].variable, 1);
        assert_eq!(f.eliminations()[0].clauses.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_first_unsatisfied_in_arena_order() {
        let f = formula(2, &[(1, 2), (-1, 2), (1, -2)]);
        let mut assignment = Assignment::new(2);
        assert_eq!(f.first_unsatisfied(&assignment).map(Clause::id), Some(1));

        assignment.set(2, true);
        assert_eq!(f.first_unsatisfied(&assignment).map(Clause::id), Some(3));

        assignment.set(1, true);
        assert!(f.is_satisfied_by(&assignment));
    }

    #[test]
    fn test_extend_model() {
        // x1 only ever appears positively.
        let mut f = formula(3, &[(1, 2), (1, -3), (2, 3), (-2, 3)]);
        f.eliminate_variable(1);

        let mut assignment = Assignment::new(3);
        assignment.set(3, true);
        assert!(f.is_satisfied_by(&assignment));
        assert!(!f.verify(&assignment));

        f.extend_model(&mut assignment);
        assert!(assignment.value(1));
        assert!(f.verify(&assignment));
    }

    #[test]
    fn test_convert_and_display() {
        let mut f = formula(2, &[(1, -2), (2, 2)]);
        f.remove_clause(2);
        let g: Formula<NegativeLiteral> = f.convert();
        assert_eq!(g.num_clauses(), 1);
        assert_eq!(g.clause(1).values(), (1, -2));
        assert_eq!(g.to_string(), "p cnf 2 1\n1 -2 0\n");
    }
}
