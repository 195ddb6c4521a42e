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

//! # OSPF Synthesizer
//!
//! The synthesizer computes OSPF link costs, such that a set of required paths become the unique
//! shortest paths between their endpoints. It works in the following steps:
//!
//! 1. **Construction** ([`OspfSynthesizer::new`]): The input network is filtered to the
//!    [`TopologyGraph`], fixed costs are applied, and every network element is registered in the
//!    [`VertexRegistry`]. Then, the topology is encoded into the baseline of the
//!    [`SolverSession`]: For every pair of vertices, the edge-existence function `EdgePhyOSPF` is
//!    fixed to the physical topology, and the edge-cost function `OSPFEdgeCost` is either fixed
//!    or left free (but non-negative). The solver only ever chooses costs, never the topology.
//! 2. **Requirements** ([`OspfSynthesizer::add_requirement`]): Path requirements are collected
//!    without interacting with the solver.
//! 3. **Push** ([`OspfSynthesizer::push_requirements`]): All requirements are asserted into a
//!    single scope. For each requirement, the cost of the required path must be strictly smaller
//!    than the cost of every alternative simple path between the same endpoints.
//! 4. **Solve** ([`OspfSynthesizer::solve`]): Check satisfiability.
//! 5. **Extract**: Read the cost assignment ([`OspfSynthesizer::read_edge_costs`]), the topology
//!    with resolved costs ([`OspfSynthesizer::read_topology_graph`]), or the shortest-path tree
//!    towards each destination network ([`OspfSynthesizer::read_routing_trees`]).
//!
//! The requirement scope can be discarded with [`OspfSynthesizer::pop_requirements`], after which
//! requirements may be added and pushed again. Pushing twice without popping is rejected.
//!
//! ```rust
//! use ospf_synth::topology::NetworkGraph;
//! use ospf_synth::{Error, OspfSynthesizer, SynthesisConfig};
//!
//! fn main() -> Result<(), Error> {
//!     let mut net = NetworkGraph::new();
//!     let a = net.add_router("A");
//!     let b = net.add_router("B");
//!     let c = net.add_router("C");
//!     net.add_link(a, b);
//!     net.add_link(b, c);
//!     net.add_link(a, c);
//!
//!     let mut synth = OspfSynthesizer::new(&net, &[], SynthesisConfig::default())?;
//!     synth.add_path_requirement(vec!["A", "B", "C"])?;
//!     synth.push_requirements()?;
//!     synth.solve()?;
//!
//!     let g = synth.read_topology_graph()?;
//!     assert!(g.cost("A", "B").unwrap() + g.cost("B", "C").unwrap() < g.cost("A", "C").unwrap());
//!     Ok(())
//! }
//! ```

mod encoder;
mod extract;
mod requirements;
mod verify;

pub use requirements::PathRequirement;
pub use verify::Violation;

use crate::config::{EdgeCost, SynthesisConfig};
use crate::solver::{Model, SolverSession};
use crate::topology::{NetworkGraph, TopologyGraph, VertexRegistry};
use crate::Error;
use encoder::EdgeFunctions;

use log::*;

/// # OSPF Synthesizer
///
/// Owns the topology, the vertex registry and the solver session of one synthesis session. See
/// the [module documentation](self) for the workflow.
#[derive(Debug)]
pub struct OspfSynthesizer {
    topology: TopologyGraph,
    registry: VertexRegistry,
    session: SolverSession,
    functions: EdgeFunctions,
    requirements: Vec<PathRequirement>,
    config: SynthesisConfig,
    pushed: bool,
}

impl OspfSynthesizer {
    /// Create a new synthesizer. The network is filtered to the routers, the fixed costs are
    /// applied, and the baseline constraints are asserted. This fails if the network contains
    /// nodes without a type, or if a fixed cost refers to a link that does not exist.
    pub fn new(
        network: &NetworkGraph,
        fixed_costs: &[EdgeCost],
        config: SynthesisConfig,
    ) -> Result<Self, Error> {
        let mut topology = TopologyGraph::load(network)?;
        for c in fixed_costs {
            topology.set_cost(&c.src, &c.dst, c.cost)?;
        }

        let registry = VertexRegistry::from_topology(&topology);
        let mut session = SolverSession::new();
        let functions = encoder::encode(&mut session, &registry, &topology, &config);

        info!(
            "Encoded topology with {} vertices using {} baseline constraints",
            registry.len(),
            session.num_constraints()
        );

        Ok(Self {
            topology,
            registry,
            session,
            functions,
            requirements: Vec::new(),
            config,
            pushed: false,
        })
    }

    /// The filtered topology
    pub fn topology(&self) -> &TopologyGraph {
        &self.topology
    }

    /// The vertex registry
    pub fn registry(&self) -> &VertexRegistry {
        &self.registry
    }

    /// The solver session
    pub fn session(&self) -> &SolverSession {
        &self.session
    }

    /// The configuration
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// All registered requirements
    pub fn requirements(&self) -> &[PathRequirement] {
        &self.requirements
    }

    /// Returns true if the requirements are currently pushed to the solver.
    pub fn is_pushed(&self) -> bool {
        self.pushed
    }

    /// Discard all constraints of the requirements from the solver. The baseline remains.
    pub fn pop_requirements(&mut self) -> Result<(), Error> {
        if !self.pushed {
            return Err(Error::NoRequirementsPushed);
        }
        self.session.pop()?;
        self.pushed = false;
        debug!("Popped the requirement scope");
        Ok(())
    }

    /// Check if the pushed requirements are satisfiable. Returns [`Error::NoCostAssignment`] if no
    /// cost assignment satisfies the requirements, and [`Error::Timeout`] if the solver did not
    /// finish within the configured time limit.
    pub fn solve(&mut self) -> Result<(), Error> {
        if !self.pushed {
            return Err(Error::NoRequirementsPushed);
        }
        match self.session.check(self.config.solve_time_limit) {
            Ok(_) => {
                info!("Found a cost assignment satisfying all requirements");
                Ok(())
            }
            Err(e) => {
                let e = Error::from(e);
                warn!("Could not solve the requirements: {}", e);
                Err(e)
            }
        }
    }

    /// Returns true if a model is available.
    pub fn is_solved(&self) -> bool {
        self.session.model().is_ok()
    }

    fn model(&self) -> Result<&Model, Error> {
        Ok(self.session.model()?)
    }
}
