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

//! Verification of a solution against every simple path, and refinement of the requirements with
//! the violating paths.

use super::OspfSynthesizer;
use crate::solver::Model;
use crate::topology::{Path, PathEnumeration, PathEnumerator, TopologyError};
use crate::Error;

use itertools::Itertools;
use log::*;
use std::time::Duration;

/// Alternative path that is not strictly more expensive than the required path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Index of the violated requirement
    pub requirement: usize,
    /// Synthesized cost of the required path
    pub required_cost: u64,
    /// The violating alternative
    pub path: Path,
    /// Synthesized cost of the alternative
    pub cost: u64,
}

impl OspfSynthesizer {
    /// Check the current solution against every simple path, regardless of the configured
    /// [`PathEnumeration`]. Returns all alternatives that are not strictly more expensive than
    /// their required path. If the path enumeration is exhaustive, the result is always empty.
    pub fn verify(&self) -> Result<Vec<Violation>, Error> {
        let model = self.model()?;
        let enumerator = PathEnumerator::new(self.topology.graph(), PathEnumeration::Exhaustive)
            .with_time_limit(self.config.enumeration_time_limit);

        let mut violations = Vec::new();
        for (i, req) in self.requirements.iter().enumerate() {
            let required_cost = self.concrete_path_cost(model, req.path())?;
            for path in enumerator.alternatives(req.path())? {
                let cost = self.concrete_path_cost(model, &path)?;
                if cost <= required_cost {
                    trace!("Violation: {} with cost {}", path.join(" -> "), cost);
                    violations.push(Violation { requirement: i, required_cost, path, cost });
                }
            }
        }

        debug!("Found {} violations", violations.len());
        Ok(violations)
    }

    /// Add the violating paths as counterexamples to their requirements, push the requirements
    /// again and solve. Fails with [`Error::RefinementExhausted`] if none of the violations adds a
    /// new counterexample, since solving again would yield the same result. Returns the time spent
    /// pushing the refined requirements.
    pub fn refine(&mut self, violations: &[Violation]) -> Result<Duration, Error> {
        let mut num_new = 0;
        for v in violations {
            if let Some(req) = self.requirements.get_mut(v.requirement) {
                if req.add_counterexample(v.path.clone()) {
                    num_new += 1;
                }
            }
        }
        if num_new == 0 {
            return Err(Error::RefinementExhausted(0));
        }
        info!("Refining the requirements with {} counterexamples", num_new);

        if self.pushed {
            self.pop_requirements()?;
        }
        let push_time = self.push_requirements()?;
        self.solve()?;
        Ok(push_time)
    }

    fn concrete_path_cost(&self, model: &Model, path: &[String]) -> Result<u64, Error> {
        let mut cost = 0;
        for (src, dst) in path.iter().tuple_windows() {
            let u = self.registry.get_vertex(src)?;
            let v = self.registry.get_vertex(dst)?;
            cost += match self.topology.fixed_cost(src, dst) {
                Some(fixed) => u64::from(fixed),
                None => match self.resolved_cost(model, u, v) {
                    Ok(c) => u64::from(c),
                    Err(Error::NoModel) => {
                        return Err(
                            TopologyError::LinkNotFound(src.to_string(), dst.to_string()).into()
                        )
                    }
                    Err(e) => return Err(e),
                },
            };
        }
        Ok(cost)
    }
}
