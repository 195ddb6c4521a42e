// OSPF-Synth: Synthesizing OSPF Link Weights for Path Requirements
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Symbolic variables, linear expressions and constraints.

use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Index of a declared variable in the solver session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(pub(crate) usize);

/// Variable of boolean sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoolVar(pub(crate) Var);

/// Variable of integer sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntVar(pub(crate) Var);

/// Sort of a declared variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    /// Boolean
    Bool,
    /// Integer
    Int,
}

/// # Linear expression
///
/// Sum of integer variables, each multiplied by a constant coefficient, plus a constant. Terms
/// with a coefficient of zero are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinExpr {
    terms: BTreeMap<Var, i64>,
    constant: i64,
}

impl LinExpr {
    /// Expression consisting only of a constant
    pub fn constant(value: i64) -> Self {
        Self { terms: BTreeMap::new(), constant: value }
    }

    /// Add `coef * var` to the expression.
    pub fn add_term(&mut self, var: IntVar, coef: i64) {
        let c = self.terms.entry(var.0).or_insert(0);
        *c += coef;
        if *c == 0 {
            self.terms.remove(&var.0);
        }
    }

    /// Iterate over all terms `(variable, coefficient)`.
    pub fn terms(&self) -> impl Iterator<Item = (Var, i64)> + '_ {
        self.terms.iter().map(|(v, c)| (*v, *c))
    }

    /// The constant part of the expression
    pub fn constant_term(&self) -> i64 {
        self.constant
    }

    /// Returns true if the expression contains no variable.
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate the expression, given a value for every variable. Returns `None` if any variable
    /// has no value.
    pub fn eval<F: Fn(Var) -> Option<i64>>(&self, value: F) -> Option<i64> {
        self.terms().try_fold(self.constant, |acc, (v, c)| Some(acc + c * value(v)?))
    }

    /// Constraint `self < rhs`. Since all variables are integers, this is encoded as
    /// `self - rhs + 1 <= 0`.
    pub fn lt(self, rhs: LinExpr) -> Constraint {
        Constraint::AtMostZero(self - rhs + 1)
    }

    /// Constraint `self <= rhs`
    pub fn le(self, rhs: LinExpr) -> Constraint {
        Constraint::AtMostZero(self - rhs)
    }

    /// Constraint `self >= rhs`
    pub fn ge(self, rhs: LinExpr) -> Constraint {
        Constraint::AtMostZero(rhs - self)
    }

    /// Constraint `self == rhs`
    pub fn equals(self, rhs: LinExpr) -> Constraint {
        Constraint::Zero(self - rhs)
    }
}

impl From<IntVar> for LinExpr {
    fn from(var: IntVar) -> Self {
        let mut e = Self::default();
        e.add_term(var, 1);
        e
    }
}

impl From<i64> for LinExpr {
    fn from(value: i64) -> Self {
        Self::constant(value)
    }
}

impl Add<LinExpr> for LinExpr {
    type Output = LinExpr;

    fn add(mut self, rhs: LinExpr) -> LinExpr {
        self += rhs;
        self
    }
}

impl Add<IntVar> for LinExpr {
    type Output = LinExpr;

    fn add(mut self, rhs: IntVar) -> LinExpr {
        self += rhs;
        self
    }
}

impl Add<i64> for LinExpr {
    type Output = LinExpr;

    fn add(mut self, rhs: i64) -> LinExpr {
        self.constant += rhs;
        self
    }
}

impl AddAssign<LinExpr> for LinExpr {
    fn add_assign(&mut self, rhs: LinExpr) {
        for (v, c) in rhs.terms {
            self.add_term(IntVar(v), c);
        }
        self.constant += rhs.constant;
    }
}

impl AddAssign<IntVar> for LinExpr {
    fn add_assign(&mut self, rhs: IntVar) {
        self.add_term(rhs, 1);
    }
}

impl AddAssign<i64> for LinExpr {
    fn add_assign(&mut self, rhs: i64) {
        self.constant += rhs;
    }
}

impl Neg for LinExpr {
    type Output = LinExpr;

    fn neg(self) -> LinExpr {
        LinExpr {
            terms: self.terms.into_iter().map(|(v, c)| (v, -c)).collect(),
            constant: -self.constant,
        }
    }
}

impl Sub<LinExpr> for LinExpr {
    type Output = LinExpr;

    fn sub(self, rhs: LinExpr) -> LinExpr {
        self + (-rhs)
    }
}

impl Sum<LinExpr> for LinExpr {
    fn sum<I: Iterator<Item = LinExpr>>(iter: I) -> Self {
        iter.fold(LinExpr::default(), |acc, e| acc + e)
    }
}

/// Constraint asserted into the solver session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// The expression is less than or equal to zero
    AtMostZero(LinExpr),
    /// The expression is equal to zero
    Zero(LinExpr),
    /// The boolean variable has the given value
    Bool(BoolVar, bool),
}

impl Constraint {
    /// Constraint forcing `var` to be true
    pub fn holds(var: BoolVar) -> Self {
        Self::Bool(var, true)
    }

    /// Constraint forcing `var` to be false
    pub fn fails(var: BoolVar) -> Self {
        Self::Bool(var, false)
    }

    /// If the constraint contains no variable, return whether it is satisfied.
    pub fn trivial(&self) -> Option<bool> {
        match self {
            Self::AtMostZero(e) if e.is_constant() => Some(e.constant_term() <= 0),
            Self::Zero(e) if e.is_constant() => Some(e.constant_term() == 0),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cancelling_terms() {
        let x = IntVar(Var(0));
        let y = IntVar(Var(1));
        let e = LinExpr::from(x) + LinExpr::from(y) + 3 - (LinExpr::from(x) + 1);
        assert_eq!(e.terms().collect::<Vec<_>>(), vec![(Var(1), 1)]);
        assert_eq!(e.constant_term(), 2);
    }

    #[test]
    fn strict_inequality() {
        let x = IntVar(Var(0));
        let c = LinExpr::from(x).lt(LinExpr::constant(5));
        match c {
            Constraint::AtMostZero(e) => {
                assert_eq!(e.eval(|_| Some(4)), Some(0));
                assert_eq!(e.eval(|_| Some(5)), Some(1));
            }
            c => panic!("unexpected constraint: {:?}", c),
        }
        assert_eq!(LinExpr::constant(3).lt(LinExpr::constant(3)).trivial(), Some(false));
        assert_eq!(LinExpr::constant(2).lt(LinExpr::constant(3)).trivial(), Some(true));
    }
}
