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

//! Symbolic functions over pairs of vertices.

use super::{BoolVar, IntVar, SolverSession};
use crate::topology::{VertexId, VertexRegistry};

use std::collections::HashMap;

/// Variable that can be declared in a [`SolverSession`]
pub trait Symbol: Copy {
    /// Declare a new variable with the given name.
    fn declare(session: &mut SolverSession, name: String) -> Self;
}

impl Symbol for BoolVar {
    fn declare(session: &mut SolverSession, name: String) -> Self {
        session.declare_bool(name)
    }
}

impl Symbol for IntVar {
    /// Integer pair functions represent link costs, which are never negative.
    fn declare(session: &mut SolverSession, name: String) -> Self {
        session.declare_int(name, Some(0), None)
    }
}

/// # Pair Function
///
/// Symbolic function taking two vertices as arguments. Every application to a new pair of
/// vertices declares a new variable in the solver session, which is memoized such that applying
/// the function to the same pair again returns the same variable.
#[derive(Debug, Clone)]
pub struct PairFunction<S> {
    name: String,
    decls: HashMap<(VertexId, VertexId), S>,
}

impl<S: Symbol> PairFunction<S> {
    /// Create a new function, without any applications yet.
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self { name: name.into(), decls: HashMap::new() }
    }

    /// Name of the function
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the function to `(src, dst)`, declaring the variable if necessary.
    pub fn apply(
        &mut self,
        session: &mut SolverSession,
        registry: &VertexRegistry,
        src: VertexId,
        dst: VertexId,
    ) -> S {
        let name = &self.name;
        *self.decls.entry((src, dst)).or_insert_with(|| {
            S::declare(
                session,
                format!("{}({}, {})", name, registry.get_name(src), registry.get_name(dst)),
            )
        })
    }

    /// Get the variable of a previous application to `(src, dst)`.
    pub fn get(&self, src: VertexId, dst: VertexId) -> Option<S> {
        self.decls.get(&(src, dst)).copied()
    }

    /// Number of pairs to which the function was applied
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Returns true if the function was never applied.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}
