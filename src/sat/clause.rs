#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Two-literal clauses.

use crate::sat::assignment::Assignment;
use crate::sat::literal::{Literal, PackedLiteral, Variable};
use core::ops::Index;
use smallvec::{SmallVec, smallvec};
use std::fmt::{self, Display, Formatter};

/// Identifier of a clause in a formula's arena. Assigned sequentially from 1.
pub type ClauseId = u32;

/// A disjunction of exactly two literals.
///
/// Clauses are owned by the formula's arena. Removing a clause from the formula
/// only marks it `deleted` so that ids stay valid as arena indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Clause<L: Literal = PackedLiteral> {
    /// The two sides of the disjunction, in input order.
    pub literals: [L; 2],
    /// Position-derived id; see [`ClauseId`].
    pub id: ClauseId,
    /// Set once the clause is removed from its formula.
    pub deleted: bool,
}

impl<L: Literal> Clause<L> {
    /// Builds a clause from two signed literals, e.g. `Clause::new(1, 1, -2)` is `(x1 ∨ ¬x2)`.
    #[must_use]
    pub fn new(id: ClauseId, first: i32, second: i32) -> Self {
        Self::from_literals(id, [L::from_i32(first), L::from_i32(second)])
    }

    /// Builds a live clause from already-encoded literals.
    #[must_use]
    pub const fn from_literals(id: ClauseId, literals: [L; 2]) -> Self {
        Self {
            literals,
            id,
            deleted: false,
        }
    }

    /// The clause id.
    #[must_use]
    pub const fn id(&self) -> ClauseId {
        self.id
    }

    /// The left-hand literal.
    #[must_use]
    pub const fn first(&self) -> L {
        self.literals[0]
    }

    /// The right-hand literal.
    #[must_use]
    pub const fn second(&self) -> L {
        self.literals[1]
    }

    /// Signed forms of both sides.
    #[must_use]
    pub fn values(&self) -> (i32, i32) {
        (self.first().to_i32(), self.second().to_i32())
    }

    /// Both sides mention the same variable, e.g. `(x ∨ x)` or `(x ∨ ¬x)`.
    #[must_use]
    pub fn is_self_referential(&self) -> bool {
        self.first().variable() == self.second().variable()
    }

    /// `(x ∨ ¬x)`: true under every assignment.
    #[must_use]
    pub fn is_tautology(&self) -> bool {
        self.first() == self.second().negated()
    }

    /// The distinct variables mentioned, in literal order.
    #[must_use]
    pub fn variables(&self) -> SmallVec<[Variable; 2]> {
        let a = self.first().variable();
        let b = self.second().variable();
        if a == b { smallvec![a] } else { smallvec![a, b] }
    }

    /// Literals of this clause that refer to `var` (zero, one or two of them).
    pub fn occurrences(&self, var: Variable) -> impl Iterator<Item = L> + '_ {
        self.literals
            .iter()
            .copied()
            .filter(move |lit| lit.variable() == var)
    }

    /// Both literals, first then second.
    pub fn iter(&self) -> impl Iterator<Item = &L> {
        self.literals.iter()
    }

    /// At least one literal is true under `assignment`.
    #[must_use]
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.literals.iter().any(|&lit| assignment.literal_value(lit))
    }

    /// `true` once the clause has been removed.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Marks the clause as removed. Registry bookkeeping is the formula's job.
    pub const fn delete(&mut self) {
        self.deleted = true;
    }
}

impl<L: Literal> Index<usize> for Clause<L> {
    type Output = L;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl<L: Literal> Display for Clause<L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (a, b) = self.values();
        write!(f, "({a} ∨ {b})")
    }
}
