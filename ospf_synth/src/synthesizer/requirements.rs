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

//! Requirement engine: path requirements, symbolic path costs and the strict-inequality
//! constraints against every alternative path.

use super::OspfSynthesizer;
use crate::solver::{Constraint, LinExpr};
use crate::topology::{Path, PathEnumerator};
use crate::Error;

use itertools::Itertools;
use log::*;
use std::time::{Duration, Instant};

/// # Path Requirement
///
/// Ordered sequence of node names, which must become the unique shortest path from its first to
/// its last node. Counterexamples are alternative paths found while verifying a solution, which
/// are added to the enumerated alternatives the next time the requirement is pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRequirement {
    path: Path,
    counterexamples: Vec<Path>,
}

impl PathRequirement {
    /// Create a new path requirement. Fails if the path has less than two nodes.
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(path: I) -> Result<Self, Error> {
        let path: Path = path.into_iter().map(|s| s.into()).collect();
        if path.len() < 2 {
            return Err(Error::RequirementTooShort(path.len()));
        }
        Ok(Self { path, counterexamples: Vec::new() })
    }

    /// The required path
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// First node of the path
    pub fn source(&self) -> &str {
        &self.path[0]
    }

    /// Last node of the path
    pub fn destination(&self) -> &str {
        &self.path[self.path.len() - 1]
    }

    /// Alternatives added by refinement
    pub fn counterexamples(&self) -> &[Path] {
        &self.counterexamples
    }

    /// Add an alternative path, unless it is already known.
    pub(super) fn add_counterexample(&mut self, path: Path) -> bool {
        if path == self.path || self.counterexamples.contains(&path) {
            false
        } else {
            self.counterexamples.push(path);
            true
        }
    }
}

impl OspfSynthesizer {
    /// Add a path requirement. The requirement is only asserted with the next call to
    /// [`OspfSynthesizer::push_requirements`]. Fails if the source or destination is not a router
    /// of the topology. The intermediate nodes are not checked: a requirement along links that do
    /// not exist makes the constraints unsatisfiable.
    pub fn add_requirement(&mut self, requirement: PathRequirement) -> Result<(), Error> {
        for endpoint in [requirement.source(), requirement.destination()].iter() {
            if !self.topology.is_router(endpoint) {
                return Err(Error::UnknownEndpoint(endpoint.to_string()));
            }
        }
        debug!("Adding requirement {}", requirement.path().join(" -> "));
        self.requirements.push(requirement);
        Ok(())
    }

    /// Create and add a path requirement.
    pub fn add_path_requirement<S: Into<String>, I: IntoIterator<Item = S>>(
        &mut self,
        path: I,
    ) -> Result<(), Error> {
        self.add_requirement(PathRequirement::new(path)?)
    }

    /// Push all requirements into a new scope of the solver. For each requirement, the cost of the
    /// required path must be strictly smaller than the cost of every alternative simple path
    /// between its endpoints, as enumerated by the configured
    /// [`PathEnumeration`](crate::PathEnumeration). Every link of the required path must exist.
    ///
    /// Returns the time spent. Fails with [`Error::RequirementsAlreadyPushed`] if the
    /// requirements are already pushed, and with [`Error::Timeout`] if the enumeration exceeds its
    /// time limit. On failure, the scope is discarded again.
    pub fn push_requirements(&mut self) -> Result<Duration, Error> {
        if self.pushed {
            return Err(Error::RequirementsAlreadyPushed);
        }
        let start = Instant::now();
        self.session.push();
        self.pushed = true;

        match self.assert_requirements() {
            Ok(num_constraints) => {
                let elapsed = start.elapsed();
                info!(
                    "Pushed {} requirements as {} constraints in {:?}",
                    self.requirements.len(),
                    num_constraints,
                    elapsed
                );
                Ok(elapsed)
            }
            Err(e) => {
                warn!("Could not push the requirements: {}", e);
                self.pop_requirements()?;
                Err(e)
            }
        }
    }

    fn assert_requirements(&mut self) -> Result<usize, Error> {
        let deadline = self.config.enumeration_time_limit.map(|l| Instant::now() + l);
        let requirements = self.requirements.clone();
        let mut num_constraints = 0;

        for req in requirements.iter() {
            let required_cost = self.path_cost(req.path())?;

            // the required path must exist
            for (src, dst) in req.path().iter().tuple_windows() {
                if !self.topology.has_link(src, dst) {
                    warn!("Requirement uses the link {} -> {}, which does not exist", src, dst);
                }
                let u = self.registry.get_vertex(src)?;
                let v = self.registry.get_vertex(dst)?;
                let e = self.functions.exists.apply(&mut self.session, &self.registry, u, v);
                self.session.assert_scoped(Constraint::holds(e))?;
            }

            let mut alternatives =
                PathEnumerator::new(self.topology.graph(), self.config.path_enumeration)
                    .with_deadline(deadline)
                    .alternatives(req.path())?;
            for cex in req.counterexamples() {
                if !alternatives.contains(cex) {
                    alternatives.push(cex.clone());
                }
            }
            debug!(
                "Requirement {} has {} alternatives",
                req.path().join(" -> "),
                alternatives.len()
            );

            for alt in alternatives.iter() {
                let alt_cost = self.path_cost(alt)?;
                self.session.assert_scoped(required_cost.clone().lt(alt_cost))?;
                num_constraints += 1;
            }
        }

        Ok(num_constraints)
    }

    /// Symbolic cost of a path: the sum of the fixed cost of every link along the path that has
    /// one, and of the cost function of every other pair.
    pub(super) fn path_cost(&mut self, path: &[String]) -> Result<LinExpr, Error> {
        let mut cost = LinExpr::default();
        for (src, dst) in path.iter().tuple_windows() {
            match self.topology.fixed_cost(src, dst) {
                Some(fixed) => cost += i64::from(fixed),
                None => {
                    let u = self.registry.get_vertex(src)?;
                    let v = self.registry.get_vertex(dst)?;
                    cost += self.functions.cost.apply(&mut self.session, &self.registry, u, v);
                }
            }
        }
        Ok(cost)
    }
}
