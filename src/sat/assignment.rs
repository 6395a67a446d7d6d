#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Total truth assignments and the printable model derived from them.

use crate::sat::literal::{Literal, Variable};
use bit_vec::BitVec;
use fastrand::Rng;
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

/// A value for every variable `1..=num_vars`, packed one bit per variable.
///
/// Slot `0` exists but is never read, so variable ids index directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(BitVec);

impl Assignment {
    /// All variables `false`.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(BitVec::from_elem(num_vars + 1, false))
    }

    /// Every variable drawn uniformly at random.
    #[must_use]
    pub fn random(num_vars: usize, rng: &mut Rng) -> Self {
        let mut assignment = Self::new(num_vars);
        assignment.randomize(rng);
        assignment
    }

    /// Redraws every variable uniformly at random, in place.
    pub fn randomize(&mut self, rng: &mut Rng) {
        for i in 1..self.0.len() {
            self.0.set(i, rng.bool());
        }
    }

    /// Number of variables covered, not counting the unused slot `0`.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Current value of `var`.
    ///
    /// # Panics
    ///
    /// If `var` is above `num_vars()`.
    #[must_use]
    pub fn value(&self, var: Variable) -> bool {
        self.0[var as usize]
    }

    /// Sets `var` to `value`.
    pub fn set(&mut self, var: Variable, value: bool) {
        self.0.set(var as usize, value);
    }

    /// Negates the value of `var`.
    pub fn flip(&mut self, var: Variable) {
        let i = var as usize;
        let value = self.0[i];
        self.0.set(i, !value);
    }

    /// Truth value of `lit` under this assignment.
    #[must_use]
    pub fn literal_value<L: Literal>(&self, lit: L) -> bool {
        lit.eval(self.value(lit.variable()))
    }

    /// `(variable, value)` pairs in ascending variable order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.0
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, b)| (Variable::try_from(i).unwrap_or(Variable::MAX), b))
    }

    /// The model as signed literals: `i` when variable `i` is true, `-i` otherwise.
    #[must_use]
    pub fn solutions(&self) -> Solutions {
        Solutions(
            self.iter()
                .map(|(var, b)| {
                    let var = i32::try_from(var).unwrap_or(i32::MAX);
                    if b { var } else { -var }
                })
                .collect(),
        )
    }
}

/// A satisfying model written as one signed literal per variable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Solutions(Vec<i32>);

impl Solutions {
    /// The signed literals in variable order.
    pub fn iter(&self) -> impl Iterator<Item = &i32> {
        self.0.iter()
    }

    /// Whether the literal `lit` holds in this model.
    #[must_use]
    pub fn check(&self, lit: i32) -> bool {
        self.0.contains(&lit)
    }

    /// Number of variables in the model.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for a model over zero variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Solutions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::PackedLiteral;

    #[test]
    fn test_new_is_all_false() {
        let assignment = Assignment::new(4);
        assert_eq!(assignment.num_vars(), 4);
        assert!(assignment.iter().all(|(_, b)| !b));
        assert_eq!(assignment.iter().count(), 4);
    }

    #[test]
    fn test_set_and_flip() {
        let mut assignment = Assignment::new(3);
        assignment.set(2, true);
        assert!(assignment.value(2));
        assignment.flip(2);
        assert!(!assignment.value(2));
        assignment.flip(3);
        assert!(assignment.value(3));
    }

    #[test]
    fn test_literal_value() {
        let mut assignment = Assignment::new(2);
        assignment.set(1, true);
        assert!(assignment.literal_value(PackedLiteral::from_i32(1)));
        assert!(!assignment.literal_value(PackedLiteral::from_i32(-1)));
        assert!(assignment.literal_value(PackedLiteral::from_i32(-2)));
    }

    #[test]
    fn test_random_is_seed_deterministic() {
        let a = Assignment::random(64, &mut Rng::with_seed(7));
        let b = Assignment::random(64, &mut Rng::with_seed(7));
        assert_eq!(a, b);
        assert_eq!(a.num_vars(), 64);
    }

    #[test]
    fn test_solutions() {
        let mut assignment = Assignment::new(3);
        assignment.set(1, true);
        assignment.set(3, true);
        let solutions = assignment.solutions();
        assert_eq!(solutions.len(), 3);
        assert!(solutions.check(1));
        assert!(solutions.check(-2));
        assert!(!solutions.check(2));
        assert_eq!(solutions.to_string(), "1 -2 3");
    }

    #[test]
    fn test_empty() {
        let assignment = Assignment::new(0);
        assert_eq!(assignment.num_vars(), 0);
        assert!(assignment.solutions().is_empty());
    }
}
