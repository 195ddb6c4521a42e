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

//! # Simple path enumeration
//!
//! Enumerating all simple paths between two nodes is exponential in the size of the graph for
//! general (dense or cyclic) topologies. This is the dominant scalability risk of the synthesis,
//! since every enumerated path becomes one constraint. [`PathEnumeration`] selects between the
//! exhaustive enumeration (which guarantees correctness), and two approximations which bound the
//! number of paths. Solutions obtained with an approximation must be verified against all paths
//! (see [`OspfSynthesizer::verify`](crate::OspfSynthesizer::verify)).

use super::{NamedGraph, NodeId, Path, TopologyError};

use log::*;
use std::iter;
use std::time::{Duration, Instant};

/// Strategy for enumerating the alternative paths of a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEnumeration {
    /// Enumerate every simple path.
    Exhaustive,
    /// Enumerate only simple paths with at most `max_hops` links.
    BoundedLength {
        /// Maximum number of links on an enumerated path
        max_hops: usize,
    },
    /// Enumerate the `k` alternative paths with the fewest number of links.
    FewestHops {
        /// Number of alternatives
        k: usize,
    },
}

impl Default for PathEnumeration {
    fn default() -> Self {
        Self::Exhaustive
    }
}

impl PathEnumeration {
    /// Returns true if the strategy enumerates every simple path.
    pub fn is_exhaustive(&self) -> bool {
        matches!(self, Self::Exhaustive)
    }
}

/// Enumerates alternative simple paths in a graph, according to the chosen [`PathEnumeration`].
#[derive(Debug)]
pub struct PathEnumerator<'a, E> {
    graph: &'a NamedGraph<E>,
    strategy: PathEnumeration,
    deadline: Option<Instant>,
}

impl<'a, E> PathEnumerator<'a, E> {
    /// Create a new enumerator without time limit.
    pub fn new(graph: &'a NamedGraph<E>, strategy: PathEnumeration) -> Self {
        Self { graph, strategy, deadline: None }
    }

    /// Stop the enumeration with [`TopologyError::EnumerationTimeout`] once `deadline` has passed.
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Stop the enumeration once `limit` has passed, starting from now.
    pub fn with_time_limit(self, limit: Option<Duration>) -> Self {
        self.with_deadline(limit.map(|l| Instant::now() + l))
    }

    /// Enumerate all simple paths from the first to the last node of `required`, except
    /// `required` itself.
    pub fn alternatives(&self, required: &[String]) -> Result<Vec<Path>, TopologyError> {
        let (source, target) = match (required.first(), required.last()) {
            (Some(s), Some(t)) => (s, t),
            _ => return Ok(Vec::new()),
        };
        let s = self.graph.node_id(source)?;
        let t = self.graph.node_id(target)?;

        let paths = match self.strategy {
            PathEnumeration::Exhaustive => self.collect(s, t, 0, None, required, None)?,
            PathEnumeration::BoundedLength { max_hops } => {
                if max_hops == 0 {
                    Vec::new()
                } else {
                    self.collect(s, t, 0, Some(max_hops - 1), required, None)?
                }
            }
            PathEnumeration::FewestHops { k } => {
                let mut paths = Vec::new();
                // a simple path has at most n - 2 intermediate nodes
                let max_intermediate = self.graph.node_count().saturating_sub(2);
                for intermediate in 0..=max_intermediate {
                    if paths.len() >= k {
                        break;
                    }
                    let remaining = k - paths.len();
                    paths.extend(self.collect(
                        s,
                        t,
                        intermediate,
                        Some(intermediate),
                        required,
                        Some(remaining),
                    )?);
                }
                paths
            }
        };

        trace!("Found {} alternatives for {}", paths.len(), required.join(" -> "));
        Ok(paths)
    }

    /// Depth-first search over all simple paths from `source` to `target` with a number of
    /// intermediate nodes between `min_intermediate` and `max_intermediate`. The deadline is
    /// checked at every step of the search, including dead ends that never reach the target.
    fn collect(
        &self,
        source: NodeId,
        target: NodeId,
        min_intermediate: usize,
        max_intermediate: Option<usize>,
        required: &[String],
        limit: Option<usize>,
    ) -> Result<Vec<Path>, TopologyError> {
        let graph = self.graph.inner();
        let mut result = Vec::new();
        if limit == Some(0) {
            return Ok(result);
        }

        let mut visited: Vec<NodeId> = vec![source];
        let mut stack = vec![graph.neighbors(source)];

        while let Some(children) = stack.last_mut() {
            if self.deadline.map(|d| Instant::now() > d).unwrap_or(false) {
                return Err(TopologyError::EnumerationTimeout);
            }
            let child = match children.next() {
                Some(child) => child,
                None => {
                    stack.pop();
                    visited.pop();
                    continue;
                }
            };
            let intermediate = visited.len() - 1;
            if child == target {
                if intermediate >= min_intermediate {
                    let path: Path = visited
                        .iter()
                        .chain(iter::once(&target))
                        .map(|n| graph[*n].name.clone())
                        .collect();
                    if path.as_slice() != required {
                        result.push(path);
                        if limit.map(|l| result.len() >= l).unwrap_or(false) {
                            break;
                        }
                    }
                }
            } else if max_intermediate.map(|m| intermediate < m).unwrap_or(true)
                && !visited.contains(&child)
            {
                visited.push(child);
                stack.push(graph.neighbors(child));
            }
        }
        Ok(result)
    }
}
