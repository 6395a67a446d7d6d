#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Per-variable clause membership.
//!
//! For every variable the registry keeps the ids of the live clauses that mention
//! it, in registration order. Entries are plain `ClauseId` handles into the
//! formula's clause arena; the registry never owns a clause.

use crate::sat::clause::{Clause, ClauseId};
use crate::sat::literal::{Literal, Variable};
use smallvec::SmallVec;
use std::ops::{Index, RangeInclusive};

/// Clause ids mentioning one variable.
pub type Occurrences = SmallVec<[ClauseId; 4]>;

/// Clause lists indexed by variable id. Slot `0` is unused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariableRegistry(Vec<Occurrences>);

impl VariableRegistry {
    /// An empty list for each of the variables `1..=num_vars`.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![SmallVec::new(); num_vars + 1])
    }

    /// Number of variables tracked.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// All variable ids `1..=num_vars`.
    pub fn variables(&self) -> RangeInclusive<Variable> {
        let n = Variable::try_from(self.num_vars()).unwrap_or(Variable::MAX);
        1..=n
    }

    /// Appends `clause` to the list of each distinct variable it mentions.
    pub fn register<L: Literal>(&mut self, clause: &Clause<L>) {
        for var in clause.variables() {
            self.0[var as usize].push(clause.id());
        }
    }

    /// Removes `clause` from the list of each distinct variable it mentions,
    /// keeping the remaining entries in order.
    ///
    /// # Panics
    ///
    /// If the clause is not registered with one of its variables. That means the
    /// registry and the clause arena have gone out of sync.
    pub fn unregister<L: Literal>(&mut self, clause: &Clause<L>) {
        for var in clause.variables() {
            let list = &mut self.0[var as usize];
            let pos = list
                .iter()
                .position(|&id| id == clause.id())
                .unwrap_or_else(|| {
                    panic!(
                        "clause {} {clause} is not registered with variable {var}",
                        clause.id()
                    )
                });
            list.remove(pos);
        }
    }

    /// Live clause ids mentioning `var`, in registration order.
    #[must_use]
    pub fn clauses_of(&self, var: Variable) -> &[ClauseId] {
        &self.0[var as usize]
    }

    /// `var` still occurs in a live clause.
    #[must_use]
    pub fn is_active(&self, var: Variable) -> bool {
        !self.0[var as usize].is_empty()
    }

    /// Variables whose clause list is non-empty, ascending.
    #[must_use]
    pub fn active_variables(&self) -> Vec<Variable> {
        self.variables().filter(|&var| self.is_active(var)).collect()
    }
}

impl Index<Variable> for VariableRegistry {
    type Output = Occurrences;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.0[index as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::PackedLiteral;

    fn clause(id: ClauseId, a: i32, b: i32) -> Clause<PackedLiteral> {
        Clause::new(id, a, b)
    }

    #[test]
    fn test_register() {
        let mut registry = VariableRegistry::new(3);
        registry.register(&clause(1, 1, -2));
        registry.register(&clause(2, -1, 3));

        assert_eq!(registry.clauses_of(1), &[1, 2]);
        assert_eq!(registry.clauses_of(2), &[1]);
        assert_eq!(registry[3].as_slice(), &[2]);
        assert_eq!(registry.num_vars(), 3);
    }

    #[test]
    fn test_self_referential_registers_once() {
        let mut registry = VariableRegistry::new(1);
        registry.register(&clause(1, 1, 1));
        registry.register(&clause(2, -1, -1));
        assert_eq!(registry.clauses_of(1), &[1, 2]);
    }

    #[test]
    fn test_unregister_keeps_order() {
        let mut registry = VariableRegistry::new(2);
        let clauses = [clause(1, 1, 2), clause(2, -1, 2), clause(3, 1, -2)];
        for c in &clauses {
            registry.register(c);
        }

        registry.unregister(&clauses[1]);

        assert_eq!(registry.clauses_of(1), &[1, 3]);
        assert_eq!(registry.clauses_of(2), &[1, 3]);
    }

    #[test]
    #[should_panic(expected = "is not registered with variable")]
    fn test_unregister_missing_panics() {
        let mut registry = VariableRegistry::new(2);
        let c = clause(1, 1, 2);
        registry.register(&c);
        registry.unregister(&c);
        registry.unregister(&c);
    }

    #[test]
    fn test_active_variables() {
        let mut registry = VariableRegistry::new(4);
        assert!(registry.active_variables().is_empty());

        let a = clause(1, 4, -2);
        registry.register(&a);
        registry.register(&clause(2, 2, 2));
        assert_eq!(registry.active_variables(), vec![2, 4]);

        registry.unregister(&a);
        assert_eq!(registry.active_variables(), vec![2]);
        assert!(!registry.is_active(4));
    }
}
