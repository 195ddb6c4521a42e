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

#![deny(missing_docs, missing_debug_implementations)]

//! # Solver Session
//!
//! This module wraps the constraint solver. The session stores declarations of boolean and
//! integer variables, and constraints over them. Constraints are either part of the *baseline*,
//! which is never retracted, or part of a *scope*. Scopes are stacked: [`SolverSession::push`]
//! opens a new scope, and [`SolverSession::pop`] discards the most recent one, together with all
//! constraints asserted into it.
//!
//! Checking the session translates all active constraints into an integer linear program, which
//! is solved with [`good_lp`] using the `microlp` backend. The objective minimizes the sum of all
//! integer variables, such that the resulting model is deterministic. If the program is feasible,
//! the resulting [`Model`] is stored in the session until the next modification.
//!
//! ```rust
//! use ospf_synth::solver::{Constraint, LinExpr, SolverSession};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut s = SolverSession::new();
//!     let x = s.declare_int("x", Some(0), None);
//!     let y = s.declare_int("y", Some(0), None);
//!
//!     s.assert_baseline(LinExpr::from(x).equals(LinExpr::constant(3)));
//!     s.push();
//!     s.assert_scoped(LinExpr::from(x).lt(LinExpr::from(y)))?;
//!
//!     let model = s.check(None)?;
//!     assert_eq!(model.eval_int(y), Some(4));
//!
//!     s.pop()?;
//!     assert_eq!(s.check(None)?.eval_int(y), Some(0));
//!     Ok(())
//! }
//! ```

mod expr;
mod function;

pub use expr::{BoolVar, Constraint, IntVar, LinExpr, Sort, Var};
pub use function::{PairFunction, Symbol};

use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use log::*;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Solver Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The constraints admit no solution
    #[error("The constraints are unsatisfiable")]
    Unsatisfiable,
    /// The solver did not finish within the time limit
    #[error("The solver did not finish in time")]
    Timeout,
    /// A model was requested, but there is no satisfiable check since the last modification
    #[error("No model available")]
    NoModel,
    /// A scoped constraint was asserted or popped, but no scope is open
    #[error("No scope is open")]
    NoOpenScope,
    /// Error reported by the underlying solver
    #[error("Solver backend error: {0}")]
    Backend(String),
}

/// Declaration of a variable
#[derive(Debug, Clone, PartialEq)]
struct Declaration {
    name: String,
    sort: Sort,
    min: Option<i64>,
    max: Option<i64>,
}

/// # Model
///
/// Concrete value of every declared variable, after a satisfiable check. Boolean variables are
/// stored as `0` or `1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    values: Vec<i64>,
}

impl Model {
    /// Value of a boolean variable
    pub fn eval_bool(&self, var: BoolVar) -> Option<bool> {
        self.values.get((var.0).0).map(|v| *v != 0)
    }

    /// Value of an integer variable
    pub fn eval_int(&self, var: IntVar) -> Option<i64> {
        self.values.get((var.0).0).copied()
    }

    /// Value of a linear expression
    pub fn eval(&self, expr: &LinExpr) -> Option<i64> {
        expr.eval(|v| self.values.get(v.0).copied())
    }
}

/// # Solver Session
///
/// Incremental constraint store with a baseline and a stack of scopes. See the
/// [module documentation](self) for details.
#[derive(Debug, Clone, Default)]
pub struct SolverSession {
    decls: Vec<Declaration>,
    baseline: Vec<Constraint>,
    scopes: Vec<Vec<Constraint>>,
    model: Option<Model>,
}

impl SolverSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new boolean variable
    pub fn declare_bool<S: Into<String>>(&mut self, name: S) -> BoolVar {
        BoolVar(self.declare(name.into(), Sort::Bool, None, None))
    }

    /// Declare a new integer variable with optional bounds.
    pub fn declare_int<S: Into<String>>(
        &mut self,
        name: S,
        min: Option<i64>,
        max: Option<i64>,
    ) -> IntVar {
        IntVar(self.declare(name.into(), Sort::Int, min, max))
    }

    fn declare(&mut self, name: String, sort: Sort, min: Option<i64>, max: Option<i64>) -> Var {
        self.model = None;
        let var = Var(self.decls.len());
        self.decls.push(Declaration { name, sort, min, max });
        var
    }

    /// Name of a declared variable. **Panics** if the variable was declared in another session.
    pub fn name(&self, var: Var) -> &str {
        &self.decls[var.0].name
    }

    /// Number of declared variables
    pub fn num_vars(&self) -> usize {
        self.decls.len()
    }

    /// Number of active constraints (baseline and all open scopes)
    pub fn num_constraints(&self) -> usize {
        self.baseline.len() + self.scopes.iter().map(|s| s.len()).sum::<usize>()
    }

    /// Number of open scopes
    pub fn num_scopes(&self) -> usize {
        self.scopes.len()
    }

    /// Assert a constraint into the baseline. Baseline constraints are never retracted.
    pub fn assert_baseline(&mut self, constraint: Constraint) {
        trace!("assert (baseline) {}", self.describe(&constraint));
        self.model = None;
        self.baseline.push(constraint);
    }

    /// Open a new scope.
    pub fn push(&mut self) {
        self.model = None;
        self.scopes.push(Vec::new());
    }

    /// Assert a constraint into the most recent scope.
    pub fn assert_scoped(&mut self, constraint: Constraint) -> Result<(), SolverError> {
        trace!("assert (scope {}) {}", self.scopes.len(), self.describe(&constraint));
        self.model = None;
        self.scopes.last_mut().ok_or(SolverError::NoOpenScope)?.push(constraint);
        Ok(())
    }

    /// Discard the most recent scope, including all constraints asserted into it.
    pub fn pop(&mut self) -> Result<(), SolverError> {
        self.model = None;
        self.scopes.pop().map(|_| ()).ok_or(SolverError::NoOpenScope)
    }

    /// Check satisfiability of all active constraints. If `time_limit` is set, the solver runs on
    /// a separate thread, and [`SolverError::Timeout`] is returned once the time limit is reached.
    /// In that case, the solver thread is detached and its result is discarded. The detached
    /// thread cannot be interrupted, and keeps running until the backend finishes.
    pub fn check(&mut self, time_limit: Option<Duration>) -> Result<&Model, SolverError> {
        self.model = None;
        let problem = Problem {
            decls: self.decls.clone(),
            constraints: self.baseline.iter().chain(self.scopes.iter().flatten()).cloned().collect(),
        };
        debug!(
            "Checking {} constraints over {} variables",
            problem.constraints.len(),
            problem.decls.len()
        );

        let start = Instant::now();
        let result = match time_limit {
            None => problem.solve(),
            Some(limit) => {
                let (tx, rx) = mpsc::channel();
                thread::spawn(move || tx.send(problem.solve()).ok());
                match rx.recv_timeout(limit) {
                    Ok(result) => result,
                    Err(RecvTimeoutError::Timeout) => Err(SolverError::Timeout),
                    Err(RecvTimeoutError::Disconnected) => {
                        Err(SolverError::Backend(String::from("solver thread terminated")))
                    }
                }
            }
        };
        debug!("Solver finished after {:?}", start.elapsed());

        let model = result?;
        Ok(self.model.get_or_insert(model))
    }

    /// Get the model of the last satisfiable check. Fails if the session was modified since.
    pub fn model(&self) -> Result<&Model, SolverError> {
        self.model.as_ref().ok_or(SolverError::NoModel)
    }

    /// Format a constraint using the names of the variables.
    pub fn describe(&self, constraint: &Constraint) -> String {
        let expr = |e: &LinExpr| {
            let mut s = e
                .terms()
                .map(|(v, c)| match c {
                    1 => self.name(v).to_string(),
                    -1 => format!("-{}", self.name(v)),
                    c => format!("{} * {}", c, self.name(v)),
                })
                .collect::<Vec<_>>()
                .join(" + ");
            if e.constant_term() != 0 || s.is_empty() {
                if !s.is_empty() {
                    s.push_str(" + ");
                }
                s.push_str(&e.constant_term().to_string());
            }
            s
        };
        match constraint {
            Constraint::AtMostZero(e) => format!("{} <= 0", expr(e)),
            Constraint::Zero(e) => format!("{} == 0", expr(e)),
            Constraint::Bool(v, true) => self.name(v.0).to_string(),
            Constraint::Bool(v, false) => format!("!{}", self.name(v.0)),
        }
    }
}

/// Snapshot of all declarations and active constraints, which can be moved to another thread.
#[derive(Debug)]
struct Problem {
    decls: Vec<Declaration>,
    constraints: Vec<Constraint>,
}

impl Problem {
    fn solve(self) -> Result<Model, SolverError> {
        // constraints without variables are decided right away
        let mut constraints = Vec::with_capacity(self.constraints.len());
        for c in self.constraints {
            match c.trivial() {
                Some(true) => {}
                Some(false) => return Err(SolverError::Unsatisfiable),
                None => constraints.push(c),
            }
        }

        if self.decls.is_empty() {
            return Ok(Model::default());
        }

        let mut vars = ProblemVariables::new();
        let lp_vars: Vec<Variable> = self
            .decls
            .iter()
            .map(|d| match d.sort {
                Sort::Bool => vars.add(variable().binary()),
                Sort::Int => {
                    let mut def = variable().integer();
                    if let Some(min) = d.min {
                        def = def.min(min as f64);
                    }
                    if let Some(max) = d.max {
                        def = def.max(max as f64);
                    }
                    vars.add(def)
                }
            })
            .collect();

        let objective = self
            .decls
            .iter()
            .zip(lp_vars.iter())
            .filter(|(d, _)| d.sort == Sort::Int)
            .fold(Expression::from(0), |acc, (_, v)| acc + *v);

        let mut problem = vars.minimise(objective).using(microlp);
        for c in constraints {
            match c {
                Constraint::AtMostZero(e) => {
                    let e = to_expression(&e, &lp_vars);
                    problem.add_constraint(constraint!(e <= 0));
                }
                Constraint::Zero(e) => {
                    let e = to_expression(&e, &lp_vars);
                    problem.add_constraint(constraint!(e == 0));
                }
                Constraint::Bool(v, value) => {
                    let x = lp_vars[(v.0).0];
                    let value = if value { 1 } else { 0 };
                    problem.add_constraint(constraint!(x == value));
                }
            }
        }

        match problem.solve() {
            Ok(solution) => Ok(Model {
                values: lp_vars.iter().map(|v| solution.value(*v).round() as i64).collect(),
            }),
            Err(ResolutionError::Infeasible) => Err(SolverError::Unsatisfiable),
            Err(e) => Err(SolverError::Backend(e.to_string())),
        }
    }
}

fn to_expression(expr: &LinExpr, vars: &[Variable]) -> Expression {
    expr.terms().fold(Expression::from(expr.constant_term() as f64), |acc, (v, c)| {
        acc + (c as f64) * vars[v.0]
    })
}
