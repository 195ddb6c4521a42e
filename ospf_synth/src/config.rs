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

//! # Synthesis Configuration
//!
//! This module contains the inputs of the synthesis besides the topology:
//!
//! - [`EdgeCost`]: A fixed OSPF cost of a single directed link. The same structure is used for the
//!   resulting cost assignment.
//! - [`SynthesisConfig`]: Parameters controlling the synthesis, like the path enumeration strategy,
//!   the time limits, and the range of allowed link costs.
//!
//! ```rust
//! use ospf_synth::{PathEnumeration, SynthesisConfig};
//! use std::time::Duration;
//!
//! let config = SynthesisConfig::default()
//!     .with_path_enumeration(PathEnumeration::BoundedLength { max_hops: 4 })
//!     .with_solve_time_limit(Duration::from_secs(60))
//!     .with_cost_range(1, Some(65535));
//! assert_eq!(config.min_cost, 1);
//! ```

use crate::topology::{Cost, PathEnumeration};

use std::time::Duration;

/// Cost of a single directed link
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeCost {
    /// Source router
    pub src: String,
    /// Target router (or destination network)
    pub dst: String,
    /// OSPF cost
    pub cost: Cost,
}

impl EdgeCost {
    /// Create a new edge cost
    pub fn new<S: Into<String>, T: Into<String>>(src: S, dst: T, cost: Cost) -> Self {
        Self { src: src.into(), dst: dst.into(), cost }
    }
}

/// Largest cost the synthesizer chooses for a link if no `max_cost` is configured. Every
/// synthesized cost is representable as a [`Cost`].
pub const MAX_COST: Cost = Cost::MAX;

/// Default number of refinement rounds for approximate path enumeration strategies.
pub const DEFAULT_MAX_REFINEMENTS: usize = 10;

/// Parameters of the synthesis
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisConfig {
    /// Strategy for enumerating the alternatives of each requirement.
    pub path_enumeration: PathEnumeration,
    /// Time limit for enumerating the alternatives of all requirements.
    pub enumeration_time_limit: Option<Duration>,
    /// Time limit for a single satisfiability check.
    pub solve_time_limit: Option<Duration>,
    /// Smallest cost the synthesizer may choose for a link.
    pub min_cost: Cost,
    /// Largest cost the synthesizer may choose for a link. If `None`, costs are bounded by
    /// [`MAX_COST`].
    pub max_cost: Option<Cost>,
    /// Maximum number of refinement rounds, if the path enumeration is not exhaustive.
    pub max_refinements: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            path_enumeration: PathEnumeration::Exhaustive,
            enumeration_time_limit: None,
            solve_time_limit: None,
            min_cost: 0,
            max_cost: None,
            max_refinements: DEFAULT_MAX_REFINEMENTS,
        }
    }
}

impl SynthesisConfig {
    /// Configuration restricting the link costs to the range allowed by OSPF (1 to 65535).
    pub fn ospf() -> Self {
        Self::default().with_cost_range(1, Some(u16::MAX as Cost))
    }

    /// Set the path enumeration strategy
    pub fn with_path_enumeration(mut self, strategy: PathEnumeration) -> Self {
        self.path_enumeration = strategy;
        self
    }

    /// Set the time limit of the path enumeration
    pub fn with_enumeration_time_limit(mut self, limit: Duration) -> Self {
        self.enumeration_time_limit = Some(limit);
        self
    }

    /// Set the time limit of the solver. When the limit is reached, the synthesis returns
    /// [`Error::Timeout`](crate::Error::Timeout) right away, but the solver thread is detached
    /// and keeps running (and occupying one CPU core) until the solver finishes on its own. Its
    /// result is discarded.
    pub fn with_solve_time_limit(mut self, limit: Duration) -> Self {
        self.solve_time_limit = Some(limit);
        self
    }

    /// Set the range of costs the synthesizer may choose. Fixed costs are not affected.
    pub fn with_cost_range(mut self, min_cost: Cost, max_cost: Option<Cost>) -> Self {
        self.min_cost = min_cost;
        self.max_cost = max_cost;
        self
    }

    /// Set the maximum number of refinement rounds
    pub fn with_max_refinements(mut self, rounds: usize) -> Self {
        self.max_refinements = rounds;
        self
    }
}
