#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literal representations.
//!
//! A literal is a variable id paired with a polarity. `polarity() == true` means the
//! literal is the variable itself, `false` means its negation. Literals are always
//! built from signed integers in the usual convention: `3` is `x3`, `-3` is `¬x3`.

use core::ops::{Neg, Not};
use std::fmt::Debug;
use std::hash::Hash;

/// A 1-based variable id.
pub type Variable = u32;

/// Common interface over the concrete literal encodings.
pub trait Literal: Copy + Debug + Eq + Hash + Default {
    /// Builds a literal from a variable and a polarity (`true` = not negated).
    fn new(var: Variable, polarity: bool) -> Self;
    /// The variable this literal refers to.
    fn variable(self) -> Variable;
    /// `true` if the literal is the plain variable, `false` if negated.
    fn polarity(self) -> bool;

    /// The same variable with the opposite polarity.
    #[must_use]
    fn negated(self) -> Self;

    /// `true` if the literal is negated.
    fn is_negated(self) -> bool {
        !self.polarity()
    }

    /// `true` if the literal is not negated.
    fn is_positive(self) -> bool {
        self.polarity()
    }

    /// Builds a literal from its signed integer form. `0` is not a literal and
    /// yields variable `0`, which no formula registers.
    #[must_use]
    fn from_i32(value: i32) -> Self {
        let polarity = value.is_positive();
        let var = value.unsigned_abs();
        Self::new(var, polarity)
    }

    /// Signed integer form: `-id` when negated, `id` otherwise.
    #[allow(clippy::cast_possible_wrap)]
    fn to_i32(self) -> i32 {
        let var = self.variable() as i32;
        if self.polarity() { var } else { -var }
    }

    /// Truth value of the literal given the value of its variable.
    fn eval(self, var_value: bool) -> bool {
        var_value == self.polarity()
    }
}

/// Variable id in the low 31 bits, polarity in the high bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PackedLiteral(u32);

impl Literal for PackedLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        Self(var & 0x7FFF_FFFF | ((u32::from(polarity)) << 31))
    }

    fn variable(self) -> Variable {
        self.0 & 0x7FFF_FFFF
    }

    fn polarity(self) -> bool {
        (self.0 >> 31) != 0
    }

    fn negated(self) -> Self {
        Self(self.0 ^ 0x8000_0000)
    }
}

/// The DIMACS-style signed integer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NegativeLiteral(i32);

impl Literal for NegativeLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        let var = i32::try_from(var).unwrap_or(i32::MAX);

        if polarity { Self(var) } else { Self(-var) }
    }

    fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    fn polarity(self) -> bool {
        self.0.is_positive()
    }

    fn negated(self) -> Self {
        Self(-self.0)
    }

    fn to_i32(self) -> i32 {
        self.0
    }
}

impl Neg for PackedLiteral {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for PackedLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Neg for NegativeLiteral {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for NegativeLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

/// Re-encodes a literal in another representation.
pub fn convert<L: Literal, U: Literal>(lit: &L) -> U {
    U::new(lit.variable(), lit.polarity())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_neg() {
        assert_eq!(
            PackedLiteral::new(1, false).negated(),
            PackedLiteral::new(1, true)
        );
        assert_eq!(
            PackedLiteral::new(1, true).negated(),
            PackedLiteral::new(1, false)
        );
        assert_eq!(-NegativeLiteral::new(4, true), NegativeLiteral::new(4, false));
        assert_eq!(!PackedLiteral::from_i32(-7), PackedLiteral::from_i32(7));
    }

    fn check_signed_forms<L: Literal>() {
        for value in [1, -1, 2, -25, 13, 5, -1_000_000] {
            let lit = L::from_i32(value);
            assert_eq!(lit.to_i32(), value);
            assert_eq!(lit.variable(), value.unsigned_abs());
            assert_eq!(lit.is_negated(), value < 0);
            assert_eq!(lit.is_positive(), value > 0);
        }
    }

    #[test]
    fn test_signed_forms() {
        check_signed_forms::<PackedLiteral>();
        check_signed_forms::<NegativeLiteral>();
    }

    #[test]
    fn test_eval() {
        let x = PackedLiteral::from_i32(3);
        let not_x = PackedLiteral::from_i32(-3);
        assert!(x.eval(true));
        assert!(!x.eval(false));
        assert!(not_x.eval(false));
        assert!(!not_x.eval(true));
    }

    #[test]
    fn test_convert() {
        let lit = NegativeLiteral::from_i32(-9);
        let packed: PackedLiteral = convert(&lit);
        assert_eq!(packed.to_i32(), -9);
    }
}
