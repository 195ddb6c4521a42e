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

//! Test the solver session on its own, without any topology.

use crate::solver::*;
use crate::topology::{VertexRegistry, VertexType};
use std::time::Duration;

#[test]
fn test_empty_session() {
    let mut s = SolverSession::new();
    assert!(s.check(None).is_ok());
    assert_eq!(s.num_vars(), 0);
}

#[test]
fn test_bool_constraints() {
    let mut s = SolverSession::new();
    let a = s.declare_bool("a");
    let b = s.declare_bool("b");
    s.assert_baseline(Constraint::holds(a));
    s.assert_baseline(Constraint::fails(b));

    let model = s.check(None).unwrap();
    assert_eq!(model.eval_bool(a), Some(true));
    assert_eq!(model.eval_bool(b), Some(false));

    s.push();
    s.assert_scoped(Constraint::holds(b)).unwrap();
    assert_eq!(s.check(None).unwrap_err(), SolverError::Unsatisfiable);
}

#[test]
fn test_strict_inequality() {
    let mut s = SolverSession::new();
    let x = s.declare_int("x", Some(0), None);
    let y = s.declare_int("y", Some(0), None);
    let z = s.declare_int("z", Some(0), Some(10));

    s.assert_baseline(LinExpr::from(x).equals(LinExpr::constant(5)));
    s.assert_baseline((LinExpr::from(y) + z).lt(LinExpr::from(x)));
    s.assert_baseline(LinExpr::from(z).ge(LinExpr::constant(2)));

    let model = s.check(None).unwrap().clone();
    let x = model.eval_int(x).unwrap();
    let y = model.eval_int(y).unwrap();
    let z = model.eval_int(z).unwrap();
    assert_eq!(x, 5);
    assert!(y + z < x);
    assert!(z >= 2);
}

#[test]
fn test_upper_bound() {
    let mut s = SolverSession::new();
    let x = s.declare_int("x", Some(0), Some(3));
    s.assert_baseline(LinExpr::from(x).ge(LinExpr::constant(4)));
    assert_eq!(s.check(None).unwrap_err(), SolverError::Unsatisfiable);
}

#[test]
fn test_trivial_constraints() {
    let mut s = SolverSession::new();
    s.assert_baseline(LinExpr::constant(1).lt(LinExpr::constant(2)));
    assert!(s.check(None).is_ok());
    s.assert_baseline(LinExpr::constant(2).lt(LinExpr::constant(2)));
    assert_eq!(s.check(None).unwrap_err(), SolverError::Unsatisfiable);
}

#[test]
fn test_push_pop() {
    let mut s = SolverSession::new();
    let x = s.declare_int("x", Some(0), None);
    s.assert_baseline(LinExpr::from(x).ge(LinExpr::constant(1)));
    assert_eq!(s.num_scopes(), 0);

    assert_eq!(s.assert_scoped(Constraint::Zero(LinExpr::from(x))), Err(SolverError::NoOpenScope));
    assert_eq!(s.pop(), Err(SolverError::NoOpenScope));

    s.push();
    s.assert_scoped(LinExpr::from(x).le(LinExpr::constant(0))).unwrap();
    assert_eq!(s.num_scopes(), 1);
    assert_eq!(s.num_constraints(), 2);
    assert_eq!(s.check(None).unwrap_err(), SolverError::Unsatisfiable);

    s.pop().unwrap();
    assert_eq!(s.num_constraints(), 1);
    assert_eq!(s.check(None).unwrap().eval_int(x), Some(1));
}

#[test]
fn test_model_invalidated() {
    let mut s = SolverSession::new();
    let x = s.declare_int("x", Some(0), None);
    assert_eq!(s.model().unwrap_err(), SolverError::NoModel);

    s.check(None).unwrap();
    assert!(s.model().is_ok());

    s.push();
    assert_eq!(s.model().unwrap_err(), SolverError::NoModel);
    s.check(None).unwrap();
    s.assert_scoped(LinExpr::from(x).ge(LinExpr::constant(1))).unwrap();
    assert_eq!(s.model().unwrap_err(), SolverError::NoModel);
    s.check(None).unwrap();
    s.pop().unwrap();
    assert_eq!(s.model().unwrap_err(), SolverError::NoModel);
}

#[test]
fn test_check_with_time_limit() {
    let mut s = SolverSession::new();
    let x = s.declare_int("x", Some(0), None);
    s.assert_baseline(LinExpr::from(x).ge(LinExpr::constant(3)));
    assert_eq!(s.check(Some(Duration::from_secs(60))).unwrap().eval_int(x), Some(3));
}

#[test]
fn test_model_eval() {
    let mut s = SolverSession::new();
    let x = s.declare_int("x", Some(0), None);
    let y = s.declare_int("y", Some(0), None);
    s.assert_baseline(LinExpr::from(x).equals(LinExpr::constant(2)));
    s.assert_baseline(LinExpr::from(y).equals(LinExpr::constant(3)));
    let model = s.check(None).unwrap();
    assert_eq!(model.eval(&(LinExpr::from(x) + y + 4)), Some(9));
    assert_eq!(model.eval(&(LinExpr::from(x) - LinExpr::from(y))), Some(-1));
}

#[test]
fn test_describe() {
    let mut s = SolverSession::new();
    let x = s.declare_int("x", Some(0), None);
    let b = s.declare_bool("b");
    assert_eq!(s.describe(&LinExpr::from(x).lt(LinExpr::constant(3))), "x + -2 <= 0");
    assert_eq!(s.describe(&Constraint::fails(b)), "!b");
    assert_eq!(s.name(x.0), "x");
}

#[test]
fn test_pair_function() {
    let mut registry = VertexRegistry::new();
    let a = registry.get_or_create("A", VertexType::Router);
    let b = registry.get_or_create("B", VertexType::Router);

    let mut s = SolverSession::new();
    let mut f: PairFunction<IntVar> = PairFunction::new("cost");
    assert!(f.is_empty());

    let ab = f.apply(&mut s, &registry, a, b);
    assert_eq!(f.apply(&mut s, &registry, a, b), ab);
    let ba = f.apply(&mut s, &registry, b, a);
    assert_ne!(ab, ba);

    assert_eq!(f.len(), 2);
    assert_eq!(s.num_vars(), 2);
    assert_eq!(f.get(a, b), Some(ab));
    assert_eq!(f.get(a, a), None);
    assert_eq!(s.name(ba.0), "cost(B, A)");
}
